use crate::{
  enums::BookingStatus,
  newtypes::BookingId,
  source::booking::{Booking, BookingInsertForm, BookingUpdateForm},
  traits::Crud,
  utils::{get_conn, DbPool, DbTables},
};
use chrono::{DateTime, Utc};
use cleanjob_utils::error::{CleanJobErrorType, CleanJobResult};

impl Booking {
  pub fn create_on(tables: &mut DbTables, form: &BookingInsertForm) -> CleanJobResult<Self> {
    if form.base_price < 0.0 || form.addons_total < 0.0 {
      return Err(CleanJobErrorType::NegativeAmount.into());
    }
    let id = tables.next_booking_id();
    let booking = Booking {
      id,
      client_id: form.client_id,
      cleaner_id: form.cleaner_id,
      status: BookingStatus::Requested,
      scheduled_at: form.scheduled_at,
      base_price: form.base_price,
      addons_total: form.addons_total,
      // invariant: total is derived, never supplied
      total_price: form.base_price + form.addons_total,
      created_at: form.created_at.unwrap_or_else(Utc::now),
      updated_at: None,
    };
    tables.bookings.insert(id, booking.clone());
    Ok(booking)
  }

  pub fn read_on(tables: &DbTables, id: BookingId) -> CleanJobResult<Self> {
    tables
      .bookings
      .get(&id)
      .cloned()
      .ok_or_else(|| CleanJobErrorType::NotFound.into())
  }

  pub fn update_on(
    tables: &mut DbTables,
    id: BookingId,
    form: &BookingUpdateForm,
  ) -> CleanJobResult<Self> {
    let booking = tables
      .bookings
      .get_mut(&id)
      .ok_or(CleanJobErrorType::NotFound)?;
    if let Some(status) = form.status {
      booking.status = status;
    }
    if let Some(cleaner_id) = form.cleaner_id {
      booking.cleaner_id = cleaner_id;
    }
    if let Some(scheduled_at) = form.scheduled_at {
      booking.scheduled_at = scheduled_at;
    }
    if let Some(updated_at) = form.updated_at {
      booking.updated_at = Some(updated_at);
    }
    Ok(booking.clone())
  }

  /// Candidate scan for the auto-confirm sweep: Completed bookings whose last
  /// update is older than the cutoff. Falls back to created_at when a booking
  /// was never touched after creation.
  pub fn list_completed_before_on(tables: &DbTables, cutoff: DateTime<Utc>) -> Vec<BookingId> {
    let mut ids: Vec<BookingId> = tables
      .bookings
      .values()
      .filter(|b| b.status == BookingStatus::Completed)
      .filter(|b| b.updated_at.unwrap_or(b.created_at) < cutoff)
      .map(|b| b.id)
      .collect();
    ids.sort();
    ids
  }
}

impl Crud for Booking {
  type InsertForm = BookingInsertForm;
  type UpdateForm = BookingUpdateForm;
  type IdType = BookingId;

  async fn create(pool: &DbPool, form: &Self::InsertForm) -> CleanJobResult<Self> {
    let mut conn = get_conn(pool).await?;
    conn.run_transaction(|tables| Self::create_on(tables, form))
  }

  async fn read(pool: &DbPool, id: Self::IdType) -> CleanJobResult<Self> {
    let conn = get_conn(pool).await?;
    Self::read_on(&conn, id)
  }

  async fn update(
    pool: &DbPool,
    id: Self::IdType,
    form: &Self::UpdateForm,
  ) -> CleanJobResult<Self> {
    let mut conn = get_conn(pool).await?;
    conn.run_transaction(|tables| Self::update_on(tables, id, form))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;
  use pretty_assertions::assert_eq;

  #[tokio::test]
  async fn derives_total_price() -> CleanJobResult<()> {
    let pool = DbPool::new();
    let mut form = BookingInsertForm::new(crate::newtypes::PersonId(1), Utc::now(), 800.0);
    form.addons_total = 200.0;
    let booking = Booking::create(&pool, &form).await?;
    assert_eq!(booking.total_price, 1000.0);
    assert_eq!(booking.status, BookingStatus::Requested);
    assert_eq!(booking.cleaner_id, None);
    Ok(())
  }

  #[tokio::test]
  async fn sweep_scan_uses_last_update() -> CleanJobResult<()> {
    let pool = DbPool::new();
    let form = BookingInsertForm::new(crate::newtypes::PersonId(1), Utc::now(), 100.0);
    let stale = Booking::create(&pool, &form).await?;
    let fresh = Booking::create(&pool, &form).await?;
    let stale_update = BookingUpdateForm {
      status: Some(BookingStatus::Completed),
      updated_at: Some(Utc::now() - Duration::hours(49)),
      ..Default::default()
    };
    Booking::update(&pool, stale.id, &stale_update).await?;
    let fresh_update = BookingUpdateForm {
      status: Some(BookingStatus::Completed),
      updated_at: Some(Utc::now() - Duration::hours(10)),
      ..Default::default()
    };
    Booking::update(&pool, fresh.id, &fresh_update).await?;

    let cutoff = Utc::now() - Duration::hours(48);
    let conn = get_conn(&pool).await?;
    assert_eq!(Booking::list_completed_before_on(&conn, cutoff), vec![stale.id]);
    Ok(())
  }
}
