//! The booking lifecycle: who may move a booking where, and the financial
//! side effects that ride along. Every mutation happens inside one store
//! transaction, so a status write, its audit event and the commission ledger
//! either all land or none do.

pub mod api;
pub mod commission;
pub mod config;
pub mod transitions;

use crate::{
  api::{Actor, AssignCleaner, CancelBooking, ConfirmBooking, UpdateBookingStatus},
  commission::CommissionLedger,
  config::WorkflowConfig,
  transitions::{check_transition, role_may_target},
};
use chrono::{Duration, Utc};
use cleanjob_db_schema::{
  enums::{ActorRole, BookingStatus, FraudSeverity},
  newtypes::BookingId,
  source::{
    booking::{Booking, BookingUpdateForm},
    booking_event::{BookingEvent, BookingEventInsertForm},
    fraud_flag::{FraudFlag, FraudFlagInsertForm},
    review::{Review, ReviewInsertForm},
  },
  utils::{get_conn, DbPool, DbTables},
};
use cleanjob_utils::error::{CleanJobErrorExt2, CleanJobErrorType, CleanJobResult};
use serde_json::{json, Value};

pub struct BookingLifecycle {
  config: WorkflowConfig,
}

impl BookingLifecycle {
  pub fn new(config: WorkflowConfig) -> Self {
    BookingLifecycle { config }
  }

  pub fn config(&self) -> &WorkflowConfig {
    &self.config
  }

  /// Drive one transition. Load, permission check, transition check and all
  /// writes happen against a consistently-read booking inside one
  /// transaction, so concurrent callers cannot both pass the table check on
  /// a stale status.
  pub async fn update_status(
    &self,
    pool: &DbPool,
    data: UpdateBookingStatus,
    actor: Actor,
  ) -> CleanJobResult<Booking> {
    let mut conn = get_conn(pool).await?;
    let booking = conn.run_transaction(|tables| {
      self.update_status_on(tables, data.booking_id, data.new_status, &actor, data.meta)
    })?;
    Self::notify_transition(&booking);
    Ok(booking)
  }

  fn update_status_on(
    &self,
    tables: &mut DbTables,
    booking_id: BookingId,
    new_status: BookingStatus,
    actor: &Actor,
    meta: Option<Value>,
  ) -> CleanJobResult<Booking> {
    let booking = Booking::read_on(tables, booking_id)?;
    check_actor(&booking, actor, new_status)?;
    check_transition(booking.status, new_status)?;
    if booking.cleaner_id.is_none() && new_status != BookingStatus::Cancelled {
      return Err(CleanJobErrorType::BookingNotAssigned.into());
    }

    let old_status = booking.status;
    let updated = Booking::update_on(
      tables,
      booking_id,
      &BookingUpdateForm {
        status: Some(new_status),
        updated_at: Some(Utc::now()),
        ..Default::default()
      },
    )?;
    BookingEvent::create_on(
      tables,
      &BookingEventInsertForm {
        booking_id,
        actor_id: actor.id,
        old_status,
        new_status,
        meta,
      },
    )?;
    if new_status == BookingStatus::ClientConfirmed {
      CommissionLedger::apply_on(tables, &updated, &self.config)
        .with_cleanjob_type(CleanJobErrorType::CommissionApplicationFailed)?;
    }
    Ok(updated)
  }

  /// Cancellation with the timing guard: inside the protected window before
  /// scheduled_at only still-unassigned (Requested) bookings may cancel.
  pub async fn cancel_with_timing_guard(
    &self,
    pool: &DbPool,
    data: CancelBooking,
    actor: Actor,
  ) -> CleanJobResult<Booking> {
    let window = Duration::hours(self.config.cancellation_window_hours);
    let mut conn = get_conn(pool).await?;
    let booking = conn.run_transaction(|tables| {
      let booking = Booking::read_on(tables, data.booking_id)?;
      if booking.status != BookingStatus::Requested && booking.scheduled_at - Utc::now() < window {
        return Err(CleanJobErrorType::CancellationWindowClosed.into());
      }
      let meta = data.reason.map(|reason| json!({ "reason": reason }));
      self.update_status_on(tables, data.booking_id, BookingStatus::Cancelled, &actor, meta)
    })?;
    Self::notify_transition(&booking);
    Ok(booking)
  }

  /// Client confirmation, optionally recording a review in the same
  /// transaction. The review only exists if the confirmation (and its
  /// commission) committed, and vice versa.
  pub async fn confirm_with_review(
    &self,
    pool: &DbPool,
    data: ConfirmBooking,
    actor: Actor,
  ) -> CleanJobResult<Booking> {
    let mut conn = get_conn(pool).await?;
    let booking = conn.run_transaction(|tables| {
      let updated = self.update_status_on(
        tables,
        data.booking_id,
        BookingStatus::ClientConfirmed,
        &actor,
        None,
      )?;
      if let Some(rating) = data.rating {
        let cleaner_id = updated
          .cleaner_id
          .ok_or(CleanJobErrorType::BookingNotAssigned)?;
        Review::create_on(
          tables,
          &ReviewInsertForm {
            booking_id: updated.id,
            client_id: updated.client_id,
            cleaner_id,
            rating,
            comment: data.comment,
          },
        )?;
      }
      Ok(updated)
    })?;
    Self::notify_transition(&booking);
    Ok(booking)
  }

  /// Attach a cleaner to a Requested booking and journal the assignment as an
  /// audit event. Admins (or the booking's own client) assign.
  pub async fn assign_cleaner(
    &self,
    pool: &DbPool,
    data: AssignCleaner,
    actor: Actor,
  ) -> CleanJobResult<Booking> {
    let mut conn = get_conn(pool).await?;
    conn.run_transaction(|tables| {
      let booking = Booking::read_on(tables, data.booking_id)?;
      let may_assign = matches!(actor.role, ActorRole::Admin | ActorRole::System)
        || (actor.role == ActorRole::Client && booking.client_id == actor.id);
      if !may_assign {
        return Err(CleanJobErrorType::Forbidden.into());
      }
      if booking.status != BookingStatus::Requested {
        return Err(
          CleanJobErrorType::InvalidField("booking is no longer assignable".into()).into(),
        );
      }
      if booking.client_id == data.cleaner_id {
        return Err(CleanJobErrorType::CleanerMustDifferFromClient.into());
      }
      let updated = Booking::update_on(
        tables,
        data.booking_id,
        &BookingUpdateForm {
          cleaner_id: Some(Some(data.cleaner_id)),
          updated_at: Some(Utc::now()),
          ..Default::default()
        },
      )?;
      BookingEvent::create_on(
        tables,
        &BookingEventInsertForm {
          booking_id: data.booking_id,
          actor_id: actor.id,
          old_status: booking.status,
          new_status: booking.status,
          meta: Some(json!({ "assignedCleanerId": data.cleaner_id })),
        },
      )?;
      Ok(updated)
    })
  }

  /// Ordered audit trail for one booking.
  pub async fn get_status_history(
    &self,
    pool: &DbPool,
    booking_id: BookingId,
  ) -> CleanJobResult<Vec<BookingEvent>> {
    let conn = get_conn(pool).await?;
    Booking::read_on(&conn, booking_id)?;
    Ok(BookingEvent::list_for_booking_on(&conn, booking_id))
  }

  /// Force stale Completed bookings into ClientConfirmed on behalf of
  /// unresponsive clients. Runs from an external scheduler; per-booking
  /// failures are logged and skipped so one bad booking cannot halt the
  /// batch. A booking that raced out of Completed simply fails its
  /// transition check here and is skipped like any other failure.
  pub async fn auto_confirm_expired_bookings(&self, pool: &DbPool) -> CleanJobResult<()> {
    let cutoff = Utc::now() - Duration::hours(self.config.auto_confirm_window_hours);
    let candidates = {
      let conn = get_conn(pool).await?;
      Booking::list_completed_before_on(&conn, cutoff)
    };

    for booking_id in candidates {
      let data = UpdateBookingStatus {
        booking_id,
        new_status: BookingStatus::ClientConfirmed,
        meta: Some(json!({ "autoConfirmed": true })),
      };
      match self.update_status(pool, data, Actor::system()).await {
        Ok(booking) => {
          // A client who sat out the confirmation window may be dodging
          // reviews; record it, but never let that block the confirmation.
          let flag = FraudFlagInsertForm {
            person_id: booking.client_id,
            severity: FraudSeverity::Low,
            reason: "booking auto-confirmed after client inactivity".into(),
            booking_id: Some(booking_id),
          };
          if let Err(e) = FraudFlag::create(pool, &flag).await {
            tracing::warn!(booking_id = %booking_id, "couldnt record fraud flag: {e}");
          }
        }
        Err(e) => {
          tracing::warn!(booking_id = %booking_id, "auto-confirm skipped: {e}");
        }
      }
    }
    Ok(())
  }

  /// Best-effort notification hook; delivery lives outside this crate.
  fn notify_transition(booking: &Booking) {
    tracing::debug!(
      booking_id = %booking.id,
      status = %booking.status,
      "dispatching transition notification",
    );
  }
}

fn check_actor(booking: &Booking, actor: &Actor, target: BookingStatus) -> CleanJobResult<()> {
  let allowed = match actor.role {
    ActorRole::Admin | ActorRole::System => true,
    ActorRole::Client => booking.client_id == actor.id && role_may_target(actor.role, target),
    ActorRole::Cleaner => {
      booking.cleaner_id == Some(actor.id) && role_may_target(actor.role, target)
    }
  };
  if allowed {
    Ok(())
  } else {
    Err(CleanJobErrorType::Forbidden.into())
  }
}
