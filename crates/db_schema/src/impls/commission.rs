use crate::{
  enums::CommissionStatus,
  newtypes::{BookingId, CommissionId},
  source::commission::{Commission, CommissionInsertForm},
  utils::{get_conn, DbPool, DbTables},
};
use chrono::Utc;
use cleanjob_utils::error::{CleanJobErrorType, CleanJobResult};

impl Commission {
  /// At most one commission per booking.
  pub fn create_on(tables: &mut DbTables, form: &CommissionInsertForm) -> CleanJobResult<Self> {
    if tables
      .commissions
      .iter()
      .any(|c| c.booking_id == form.booking_id)
    {
      return Err(CleanJobErrorType::CommissionAlreadyExists.into());
    }
    let commission = Commission {
      id: tables.next_commission_id(),
      cleaner_id: form.cleaner_id,
      booking_id: form.booking_id,
      percentage: form.percentage,
      commission_amount: form.commission_amount,
      status: form.status.unwrap_or_default(),
      created_at: Utc::now(),
      updated_at: None,
    };
    tables.commissions.push(commission.clone());
    Ok(commission)
  }

  /// Pending -> Applied, the only legal status move.
  pub fn set_applied_on(tables: &mut DbTables, id: CommissionId) -> CleanJobResult<Self> {
    let commission = tables
      .commissions
      .iter_mut()
      .find(|c| c.id == id)
      .ok_or(CleanJobErrorType::CouldntUpdateCommission)?;
    commission.status = CommissionStatus::Applied;
    commission.updated_at = Some(Utc::now());
    Ok(commission.clone())
  }

  pub fn get_by_booking_on(tables: &DbTables, booking_id: BookingId) -> Option<Self> {
    tables
      .commissions
      .iter()
      .find(|c| c.booking_id == booking_id)
      .cloned()
  }

  pub async fn get_by_booking(pool: &DbPool, booking_id: BookingId) -> CleanJobResult<Option<Self>> {
    let conn = get_conn(pool).await?;
    Ok(Self::get_by_booking_on(&conn, booking_id))
  }
}
