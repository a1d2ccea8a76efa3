use crate::{
  enums::FraudSeverity,
  newtypes::{BookingId, FraudFlagId, PersonId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A side observation about possibly abusive behaviour, never blocking.
pub struct FraudFlag {
  pub id: FraudFlagId,
  pub person_id: PersonId,
  pub booking_id: Option<BookingId>,
  pub severity: FraudSeverity,
  pub reason: String,
  pub created_at: DateTime<Utc>,
}

#[derive(Clone, derive_new::new)]
pub struct FraudFlagInsertForm {
  pub person_id: PersonId,
  pub severity: FraudSeverity,
  pub reason: String,
  #[new(default)]
  pub booking_id: Option<BookingId>,
}
