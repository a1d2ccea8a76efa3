use crate::{
  newtypes::{
    BookingEventId, BookingId, CommissionId, FraudFlagId, PersonId, ReviewId, WalletId,
    WalletTransactionId,
  },
  source::{
    booking::Booking, booking_event::BookingEvent, cleaner_account::CleanerAccount,
    commission::Commission, fraud_flag::FraudFlag, review::Review, wallet::Wallet,
    wallet::WalletTransaction,
  },
};
use cleanjob_utils::error::{CleanJobErrorType, CleanJobResult};
use std::{
  collections::HashMap,
  ops::{Deref, DerefMut},
  sync::{Arc, Mutex, MutexGuard},
};

/// The in-process tables behind a [`DbPool`]. Row invariants (ledgered balance
/// changes, append-only events) are upheld by the `impls` helpers; seeding in
/// tests goes through the same helpers.
#[derive(Default, Clone)]
pub struct DbTables {
  pub bookings: HashMap<BookingId, Booking>,
  pub booking_events: Vec<BookingEvent>,
  pub cleaner_accounts: HashMap<PersonId, CleanerAccount>,
  pub wallets: HashMap<WalletId, Wallet>,
  pub wallet_transactions: Vec<WalletTransaction>,
  pub commissions: Vec<Commission>,
  pub reviews: Vec<Review>,
  pub fraud_flags: Vec<FraudFlag>,
  booking_id_seq: i32,
  booking_event_id_seq: i32,
  wallet_id_seq: i32,
  wallet_transaction_id_seq: i32,
  commission_id_seq: i32,
  review_id_seq: i32,
  fraud_flag_id_seq: i32,
}

impl DbTables {
  pub fn next_booking_id(&mut self) -> BookingId {
    self.booking_id_seq += 1;
    BookingId(self.booking_id_seq)
  }

  pub fn next_booking_event_id(&mut self) -> BookingEventId {
    self.booking_event_id_seq += 1;
    BookingEventId(self.booking_event_id_seq)
  }

  pub fn next_wallet_id(&mut self) -> WalletId {
    self.wallet_id_seq += 1;
    WalletId(self.wallet_id_seq)
  }

  pub fn next_wallet_transaction_id(&mut self) -> WalletTransactionId {
    self.wallet_transaction_id_seq += 1;
    WalletTransactionId(self.wallet_transaction_id_seq)
  }

  pub fn next_commission_id(&mut self) -> CommissionId {
    self.commission_id_seq += 1;
    CommissionId(self.commission_id_seq)
  }

  pub fn next_review_id(&mut self) -> ReviewId {
    self.review_id_seq += 1;
    ReviewId(self.review_id_seq)
  }

  pub fn next_fraud_flag_id(&mut self) -> FraudFlagId {
    self.fraud_flag_id_seq += 1;
    FraudFlagId(self.fraud_flag_id_seq)
  }
}

/// Cloneable handle to the shared store, the persistence seam the lifecycle
/// operates against. A real deployment swaps this for a database pool with
/// row-level locking; the contract it must keep is the one `run_transaction`
/// provides: all-or-nothing writes, and load-check-write on one booking as a
/// critical section.
#[derive(Default, Clone)]
pub struct DbPool {
  inner: Arc<Mutex<DbTables>>,
}

impl DbPool {
  pub fn new() -> Self {
    Self::default()
  }
}

/// An acquired connection. Holds the store lock until dropped.
pub struct DbConn<'a> {
  tables: MutexGuard<'a, DbTables>,
}

pub async fn get_conn(pool: &DbPool) -> CleanJobResult<DbConn<'_>> {
  let tables = pool
    .inner
    .lock()
    .map_err(|_| CleanJobErrorType::DatabaseError)?;
  Ok(DbConn { tables })
}

impl DbConn<'_> {
  /// Run `f` atomically: on error every write it made is rolled back.
  pub fn run_transaction<T, F>(&mut self, f: F) -> CleanJobResult<T>
  where
    F: FnOnce(&mut DbTables) -> CleanJobResult<T>,
  {
    let snapshot = self.tables.clone();
    match f(&mut self.tables) {
      Ok(v) => Ok(v),
      Err(e) => {
        *self.tables = snapshot;
        Err(e)
      }
    }
  }
}

impl Deref for DbConn<'_> {
  type Target = DbTables;

  fn deref(&self) -> &Self::Target {
    &self.tables
  }
}

impl DerefMut for DbConn<'_> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.tables
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[tokio::test]
  async fn rolls_back_on_error() -> CleanJobResult<()> {
    let pool = DbPool::new();
    let mut conn = get_conn(&pool).await?;
    let res: CleanJobResult<()> = conn.run_transaction(|tables| {
      tables.next_booking_id();
      tables.next_booking_id();
      Err(CleanJobErrorType::DatabaseError.into())
    });
    assert!(res.is_err());
    assert_eq!(conn.next_booking_id(), BookingId(1));
    Ok(())
  }

  #[tokio::test]
  async fn commits_on_ok() -> CleanJobResult<()> {
    let pool = DbPool::new();
    let mut conn = get_conn(&pool).await?;
    conn.run_transaction(|tables| {
      tables.next_booking_id();
      Ok(())
    })?;
    assert_eq!(conn.next_booking_id(), BookingId(2));
    Ok(())
  }
}
