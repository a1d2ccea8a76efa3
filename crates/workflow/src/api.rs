use cleanjob_db_schema::{
  enums::{ActorRole, BookingStatus},
  newtypes::{BookingId, PersonId},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// The already-authenticated caller. Threaded explicitly through every
/// operation; there is no ambient current-user state.
pub struct Actor {
  pub id: PersonId,
  pub role: ActorRole,
}

impl Actor {
  pub fn new(id: PersonId, role: ActorRole) -> Self {
    Actor { id, role }
  }

  /// The background sweep's identity.
  pub fn system() -> Self {
    Actor {
      id: PersonId(0),
      role: ActorRole::System,
    }
  }
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Request one status transition.
pub struct UpdateBookingStatus {
  pub booking_id: BookingId,
  pub new_status: BookingStatus,
  pub meta: Option<Value>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Cancel a booking, subject to the timing guard.
pub struct CancelBooking {
  pub booking_id: BookingId,
  pub reason: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Confirm a completed booking, optionally leaving a review.
pub struct ConfirmBooking {
  pub booking_id: BookingId,
  pub rating: Option<i16>,
  pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Assign a cleaner to a requested booking.
pub struct AssignCleaner {
  pub booking_id: BookingId,
  pub cleaner_id: PersonId,
}
