use crate::{
  enums::BookingStatus,
  newtypes::{BookingId, PersonId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One service engagement. Mutated exclusively through lifecycle transitions,
/// never deleted (terminal states are retained for audit).
pub struct Booking {
  pub id: BookingId,
  pub client_id: PersonId,
  /// Unset until a cleaner is assigned; required before any transition beyond Requested
  pub cleaner_id: Option<PersonId>,
  pub status: BookingStatus,
  pub scheduled_at: DateTime<Utc>,
  pub base_price: f64,
  pub addons_total: f64,
  /// Always base_price + addons_total
  pub total_price: f64,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, derive_new::new)]
pub struct BookingInsertForm {
  pub client_id: PersonId,
  pub scheduled_at: DateTime<Utc>,
  pub base_price: f64,
  #[new(default)]
  pub addons_total: f64,
  #[new(default)]
  pub cleaner_id: Option<PersonId>,
  #[new(default)]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Default)]
pub struct BookingUpdateForm {
  pub status: Option<BookingStatus>,
  pub cleaner_id: Option<Option<PersonId>>,
  pub scheduled_at: Option<DateTime<Utc>>,
  pub updated_at: Option<DateTime<Utc>>,
}
