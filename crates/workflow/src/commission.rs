use crate::config::WorkflowConfig;
use cleanjob_db_schema::{
  enums::CommissionStatus,
  source::{
    booking::Booking, cleaner_account::CleanerAccount, commission::CommissionInsertForm,
    commission::Commission, wallet::Wallet,
  },
  utils::DbTables,
};
use chrono::Utc;
use cleanjob_utils::error::{CleanJobErrorType, CleanJobResult};
use serde_json::json;

/// What the ledger did for one confirmed booking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedCommission {
  pub commission_amount: f64,
  pub is_free_job: bool,
}

fn round2(x: f64) -> f64 {
  (x * 100.0).round() / 100.0
}

pub struct CommissionLedger;

impl CommissionLedger {
  /// Compute and apply the commission for a booking entering ClientConfirmed.
  /// Runs inside the caller's transaction; any error here rolls the whole
  /// transition back, so a booking never ends up confirmed without its
  /// commission.
  ///
  /// Order matters: the job counter moves first, eligibility is decided from
  /// the pre-increment free_jobs_used, and the commission row reaches Applied
  /// in the same step that journals the wallet debit.
  pub fn apply_on(
    tables: &mut DbTables,
    booking: &Booking,
    config: &WorkflowConfig,
  ) -> CleanJobResult<AppliedCommission> {
    let cleaner_id = booking
      .cleaner_id
      .ok_or(CleanJobErrorType::BookingNotAssigned)?;

    let (job_number, is_free_job) = {
      let account = CleanerAccount::ensure_for_cleaner_on(tables, cleaner_id);
      account.completed_jobs_count += 1;
      let is_free_job = account.free_jobs_used < config.free_job_threshold;
      if is_free_job {
        // capped: never exceeds the threshold
        account.free_jobs_used = (account.free_jobs_used + 1).min(config.free_job_threshold);
      }
      account.updated_at = Some(Utc::now());
      (account.completed_jobs_count, is_free_job)
    };

    let commission_amount = if is_free_job {
      0.0
    } else {
      round2(booking.total_price * config.commission_rate)
    };

    // A zero fee (free job, or a rounded-down total) has no wallet debit to
    // wait for, so its commission row is Applied from the start.
    let charges_wallet = !is_free_job && commission_amount > 0.0;

    let commission = Commission::create_on(
      tables,
      &CommissionInsertForm {
        cleaner_id,
        booking_id: booking.id,
        // round at the write site: 0.07 * 100.0 is 7.000000000000001 in f64
        percentage: if is_free_job {
          0.0
        } else {
          round2(config.commission_rate * 100.0)
        },
        commission_amount,
        status: Some(if charges_wallet {
          CommissionStatus::Pending
        } else {
          CommissionStatus::Applied
        }),
      },
    )?;

    if charges_wallet {
      let meta = json!({
        "jobNumber": job_number,
        "commissionRate": config.commission_rate,
        "isFreeJob": false,
      });
      Wallet::commission_debit_on(tables, cleaner_id, commission_amount, booking.id, meta)?;
      Commission::set_applied_on(tables, commission.id)?;
    } else {
      let meta = json!({
        "jobNumber": job_number,
        "isFreeJob": is_free_job,
      });
      Wallet::free_job_marker_on(tables, cleaner_id, booking.id, meta)?;
    }

    Ok(AppliedCommission {
      commission_amount,
      is_free_job,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn rounds_to_cents() {
    assert_eq!(round2(1000.0 * 0.07), 70.0);
    assert_eq!(round2(333.33 * 0.07), 23.33);
    assert_eq!(round2(0.005), 0.01);
  }

  #[test]
  fn percentage_is_exact_in_points() {
    // the raw product carries float noise; the stored value must not
    assert_ne!(0.07 * 100.0, 7.0);
    assert_eq!(round2(0.07 * 100.0), 7.0);
  }
}
