use crate::{
  newtypes::BookingId,
  source::review::{Review, ReviewInsertForm},
  utils::{get_conn, DbPool, DbTables},
};
use chrono::Utc;
use cleanjob_utils::error::{CleanJobErrorType, CleanJobResult};

impl Review {
  pub fn create_on(tables: &mut DbTables, form: &ReviewInsertForm) -> CleanJobResult<Self> {
    if !(1..=5).contains(&form.rating) {
      return Err(CleanJobErrorType::InvalidRating.into());
    }
    if tables
      .reviews
      .iter()
      .any(|r| r.booking_id == form.booking_id)
    {
      return Err(CleanJobErrorType::AlreadyReviewed.into());
    }
    let review = Review {
      id: tables.next_review_id(),
      booking_id: form.booking_id,
      client_id: form.client_id,
      cleaner_id: form.cleaner_id,
      rating: form.rating,
      comment: form.comment.clone(),
      created_at: Utc::now(),
    };
    tables.reviews.push(review.clone());
    Ok(review)
  }

  pub fn get_by_booking_on(tables: &DbTables, booking_id: BookingId) -> Option<Self> {
    tables
      .reviews
      .iter()
      .find(|r| r.booking_id == booking_id)
      .cloned()
  }

  pub async fn get_by_booking(pool: &DbPool, booking_id: BookingId) -> CleanJobResult<Option<Self>> {
    let conn = get_conn(pool).await?;
    Ok(Self::get_by_booking_on(&conn, booking_id))
  }
}
