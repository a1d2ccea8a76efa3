use crate::{
  newtypes::BookingId,
  source::booking_event::{BookingEvent, BookingEventInsertForm},
  utils::{get_conn, DbPool, DbTables},
};
use chrono::Utc;
use cleanjob_utils::error::CleanJobResult;

impl BookingEvent {
  /// Append one audit row. Events are append-only; there is no update path.
  pub fn create_on(tables: &mut DbTables, form: &BookingEventInsertForm) -> CleanJobResult<Self> {
    let event = BookingEvent {
      id: tables.next_booking_event_id(),
      booking_id: form.booking_id,
      actor_id: form.actor_id,
      old_status: form.old_status,
      new_status: form.new_status,
      meta: form.meta.clone(),
      created_at: Utc::now(),
    };
    tables.booking_events.push(event.clone());
    Ok(event)
  }

  /// Ordered history for one booking. Ids are monotonic, so id order is
  /// creation order.
  pub fn list_for_booking_on(tables: &DbTables, booking_id: BookingId) -> Vec<Self> {
    let mut events: Vec<Self> = tables
      .booking_events
      .iter()
      .filter(|e| e.booking_id == booking_id)
      .cloned()
      .collect();
    events.sort_by_key(|e| e.id.0);
    events
  }

  pub async fn list_for_booking(pool: &DbPool, booking_id: BookingId) -> CleanJobResult<Vec<Self>> {
    let conn = get_conn(pool).await?;
    Ok(Self::list_for_booking_on(&conn, booking_id))
  }
}
