use crate::newtypes::{BookingId, PersonId, ReviewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A client's review of a confirmed booking. At most one per booking, only
/// writable once the booking reached ClientConfirmed.
pub struct Review {
  pub id: ReviewId,
  pub booking_id: BookingId,
  pub client_id: PersonId,
  pub cleaner_id: PersonId,
  pub rating: i16,
  pub comment: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Clone, derive_new::new)]
pub struct ReviewInsertForm {
  pub booking_id: BookingId,
  pub client_id: PersonId,
  pub cleaner_id: PersonId,
  pub rating: i16,
  #[new(default)]
  pub comment: Option<String>,
}
