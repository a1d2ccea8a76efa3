use crate::{
  enums::BookingStatus,
  newtypes::{BookingEventId, BookingId, PersonId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Immutable audit record of one transition (or assignment action). Append-only.
pub struct BookingEvent {
  pub id: BookingEventId,
  pub booking_id: BookingId,
  pub actor_id: PersonId,
  pub old_status: BookingStatus,
  pub new_status: BookingStatus,
  pub meta: Option<Value>,
  pub created_at: DateTime<Utc>,
}

#[derive(Clone, derive_new::new)]
pub struct BookingEventInsertForm {
  pub booking_id: BookingId,
  pub actor_id: PersonId,
  pub old_status: BookingStatus,
  pub new_status: BookingStatus,
  #[new(default)]
  pub meta: Option<Value>,
}
