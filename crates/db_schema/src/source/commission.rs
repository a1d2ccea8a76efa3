use crate::{
  enums::CommissionStatus,
  newtypes::{BookingId, CommissionId, PersonId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// The fee applied to one confirmed booking. At most one per booking; status
/// only ever moves Pending -> Applied, within the same transaction that
/// journals the matching wallet debit.
pub struct Commission {
  pub id: CommissionId,
  pub cleaner_id: PersonId,
  pub booking_id: BookingId,
  /// Percentage points, 0 for free jobs
  pub percentage: f64,
  pub commission_amount: f64,
  pub status: CommissionStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, derive_new::new)]
pub struct CommissionInsertForm {
  pub cleaner_id: PersonId,
  pub booking_id: BookingId,
  pub percentage: f64,
  pub commission_amount: f64,
  #[new(default)]
  pub status: Option<CommissionStatus>,
}
