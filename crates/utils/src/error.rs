use serde::{Deserialize, Serialize};
use std::{backtrace::Backtrace, fmt, fmt::Debug};
use strum::{Display, EnumIter};

#[derive(Display, Debug, Serialize, Deserialize, Clone, PartialEq, EnumIter)]
#[serde(tag = "error", content = "message", rename_all = "camelCase")]
#[non_exhaustive]
pub enum CleanJobErrorType {
  /// Referenced booking does not exist.
  NotFound,
  /// Actor lacks permission for the requested transition.
  Forbidden,
  /// Requested status is not reachable from the booking's current status.
  InvalidTransition {
    from: String,
    to: String,
  },
  /// Cancellation attempted inside the protected time window.
  CancellationWindowClosed,
  /// Wallet/ledger write failed during confirmation; the whole transition is rolled back.
  CommissionApplicationFailed,
  /// Booking has no assigned cleaner yet.
  BookingNotAssigned,
  CleanerMustDifferFromClient,
  WalletNotFound,
  WalletAlreadyExists,
  WalletInvariantViolated,
  NegativeAmount,
  ZeroAmount,
  AlreadyReviewed,
  /// Review rating must be between 1 and 5.
  InvalidRating,
  BookingNotConfirmed,
  CommissionAlreadyExists,
  CouldntCreateBooking,
  CouldntUpdateBooking,
  CouldntCreateBookingEvent,
  CouldntUpdateCleanerAccount,
  CouldntCreateWallet,
  CouldntUpdateWallet,
  CouldntCreateWalletTransaction,
  CouldntCreateCommission,
  CouldntUpdateCommission,
  CouldntCreateReview,
  CouldntCreateFraudFlag,
  DatabaseError,
  InvalidField(String),
  Unknown(String),
}

pub type CleanJobResult<T> = Result<T, CleanJobError>;

pub struct CleanJobError {
  pub error_type: CleanJobErrorType,
  pub inner: anyhow::Error,
  pub context: Backtrace,
}

impl<T> From<T> for CleanJobError
where
  T: Into<anyhow::Error>,
{
  fn from(t: T) -> Self {
    let cause = t.into();
    CleanJobError {
      error_type: CleanJobErrorType::Unknown(format!("{}", &cause)),
      inner: cause,
      context: Backtrace::capture(),
    }
  }
}

impl Debug for CleanJobError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CleanJobError")
      .field("message", &self.error_type)
      .field("inner", &self.inner)
      .field("context", &self.context)
      .finish()
  }
}

impl fmt::Display for CleanJobError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{}", self.inner)?;
    fmt::Display::fmt(&self.context, f)
  }
}

impl From<CleanJobErrorType> for CleanJobError {
  fn from(error_type: CleanJobErrorType) -> Self {
    let inner = anyhow::anyhow!("{}", error_type);
    CleanJobError {
      error_type,
      inner,
      context: Backtrace::capture(),
    }
  }
}

pub trait CleanJobErrorExt<T, E: Into<anyhow::Error>> {
  fn with_cleanjob_type(self, error_type: CleanJobErrorType) -> CleanJobResult<T>;
}

impl<T, E: Into<anyhow::Error>> CleanJobErrorExt<T, E> for Result<T, E> {
  fn with_cleanjob_type(self, error_type: CleanJobErrorType) -> CleanJobResult<T> {
    self.map_err(|error| CleanJobError {
      error_type,
      inner: error.into(),
      context: Backtrace::capture(),
    })
  }
}

pub trait CleanJobErrorExt2<T> {
  fn with_cleanjob_type(self, error_type: CleanJobErrorType) -> CleanJobResult<T>;
  fn into_anyhow(self) -> Result<T, anyhow::Error>;
}

impl<T> CleanJobErrorExt2<T> for CleanJobResult<T> {
  fn with_cleanjob_type(self, error_type: CleanJobErrorType) -> CleanJobResult<T> {
    self.map_err(|mut e| {
      e.error_type = error_type;
      e
    })
  }

  fn into_anyhow(self) -> Result<T, anyhow::Error> {
    self.map_err(|e| e.inner)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn serializes_with_message() {
    let err = CleanJobErrorType::InvalidField("booking already assigned".into());
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(
      &json,
      "{\"error\":\"invalidField\",\"message\":\"booking already assigned\"}"
    );
  }

  #[test]
  fn keeps_inner_cause_when_retyped() {
    let res: CleanJobResult<()> = Err(CleanJobErrorType::WalletNotFound.into());
    let retyped = res.with_cleanjob_type(CleanJobErrorType::CommissionApplicationFailed);
    let err = retyped.unwrap_err();
    assert_eq!(
      err.error_type,
      CleanJobErrorType::CommissionApplicationFailed
    );
    assert_eq!(err.inner.to_string(), "WalletNotFound");
  }
}
