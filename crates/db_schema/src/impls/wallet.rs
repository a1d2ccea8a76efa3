use crate::{
  enums::TxKind,
  newtypes::{BookingId, PersonId},
  source::wallet::{Wallet, WalletTransaction, WalletTransactionInsertForm},
  utils::{get_conn, DbPool, DbTables},
};
use chrono::Utc;
use cleanjob_utils::error::{CleanJobErrorType, CleanJobResult};
use serde_json::Value;

const BALANCE_EPSILON: f64 = 1e-9;

impl Wallet {
  fn validate_positive_amount(amount: f64) -> CleanJobResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
      return Err(CleanJobErrorType::NegativeAmount.into());
    }
    Ok(())
  }

  /// Create an empty wallet for an owner on the given transaction.
  pub fn create_for_owner_on(tables: &mut DbTables, owner_id: PersonId) -> CleanJobResult<Self> {
    if tables.wallets.values().any(|w| w.owner_id == owner_id) {
      return Err(CleanJobErrorType::WalletAlreadyExists.into());
    }
    let id = tables.next_wallet_id();
    let wallet = Wallet {
      id,
      owner_id,
      balance: 0.0,
      created_at: Utc::now(),
      updated_at: None,
    };
    tables.wallets.insert(id, wallet.clone());
    Ok(wallet)
  }

  pub async fn create_for_owner(pool: &DbPool, owner_id: PersonId) -> CleanJobResult<Self> {
    let mut conn = get_conn(pool).await?;
    conn.run_transaction(|tables| Self::create_for_owner_on(tables, owner_id))
  }

  pub fn by_owner_on(tables: &DbTables, owner_id: PersonId) -> CleanJobResult<Self> {
    tables
      .wallets
      .values()
      .find(|w| w.owner_id == owner_id)
      .cloned()
      .ok_or_else(|| CleanJobErrorType::WalletNotFound.into())
  }

  pub async fn get_by_owner(pool: &DbPool, owner_id: PersonId) -> CleanJobResult<Self> {
    let conn = get_conn(pool).await?;
    Self::by_owner_on(&conn, owner_id)
  }

  /// Insert a ledger row. All balance movement funnels through here so the
  /// reconciliation invariant cannot be broken by a missing journal entry.
  pub fn insert_tx_on(
    tables: &mut DbTables,
    form: &WalletTransactionInsertForm,
  ) -> CleanJobResult<WalletTransaction> {
    if !tables.wallets.contains_key(&form.wallet_id) {
      return Err(CleanJobErrorType::WalletNotFound.into());
    }
    let tx = WalletTransaction {
      id: tables.next_wallet_transaction_id(),
      wallet_id: form.wallet_id,
      kind: form.kind,
      amount: form.amount,
      booking_id: form.booking_id,
      description: form.description.clone(),
      meta: form.meta.clone(),
      created_at: Utc::now(),
    };
    tables.wallet_transactions.push(tx.clone());
    Ok(tx)
  }

  /// Debit the owner's wallet for a commission and journal the matching
  /// negative ledger row, in one step. No floor: the balance may go negative.
  pub fn commission_debit_on(
    tables: &mut DbTables,
    owner_id: PersonId,
    amount: f64,
    booking_id: BookingId,
    meta: Value,
  ) -> CleanJobResult<(Self, WalletTransaction)> {
    Self::validate_positive_amount(amount)?;
    let wallet_id = Self::by_owner_on(tables, owner_id)?.id;
    let form = WalletTransactionInsertForm {
      wallet_id,
      kind: TxKind::Commission,
      amount: -amount,
      description: format!("commission for booking #{booking_id}"),
      booking_id: Some(booking_id),
      meta: Some(meta),
    };
    let tx = Self::insert_tx_on(tables, &form)?;
    let wallet = tables
      .wallets
      .get_mut(&wallet_id)
      .ok_or(CleanJobErrorType::WalletNotFound)?;
    wallet.balance += tx.amount;
    wallet.updated_at = Some(Utc::now());
    Ok((wallet.clone(), tx))
  }

  /// Journal a zero-amount row for a free job, keeping one ledger line per
  /// confirmed booking.
  pub fn free_job_marker_on(
    tables: &mut DbTables,
    owner_id: PersonId,
    booking_id: BookingId,
    meta: Value,
  ) -> CleanJobResult<WalletTransaction> {
    let wallet_id = Self::by_owner_on(tables, owner_id)?.id;
    let form = WalletTransactionInsertForm {
      wallet_id,
      kind: TxKind::Commission,
      amount: 0.0,
      description: format!("free job for booking #{booking_id}"),
      booking_id: Some(booking_id),
      meta: Some(meta),
    };
    Self::insert_tx_on(tables, &form)
  }

  /// Manual admin credit or debit. Signed, non-zero, always journaled.
  pub fn apply_adjustment_on(
    tables: &mut DbTables,
    owner_id: PersonId,
    amount: f64,
    description: String,
  ) -> CleanJobResult<(Self, WalletTransaction)> {
    if !amount.is_finite() || amount.abs() < BALANCE_EPSILON {
      return Err(CleanJobErrorType::ZeroAmount.into());
    }
    let wallet_id = Self::by_owner_on(tables, owner_id)?.id;
    let form = WalletTransactionInsertForm {
      wallet_id,
      kind: TxKind::Adjustment,
      amount,
      description,
      booking_id: None,
      meta: None,
    };
    let tx = Self::insert_tx_on(tables, &form)?;
    let wallet = tables
      .wallets
      .get_mut(&wallet_id)
      .ok_or(CleanJobErrorType::WalletNotFound)?;
    wallet.balance += amount;
    wallet.updated_at = Some(Utc::now());
    Ok((wallet.clone(), tx))
  }

  pub async fn apply_adjustment(
    pool: &DbPool,
    owner_id: PersonId,
    amount: f64,
    description: String,
  ) -> CleanJobResult<Self> {
    let mut conn = get_conn(pool).await?;
    let (wallet, _) =
      conn.run_transaction(|tables| Self::apply_adjustment_on(tables, owner_id, amount, description))?;
    Ok(wallet)
  }

  /// Reconciliation invariant: the sum of a wallet's ledger rows equals its
  /// balance.
  pub fn reconcile_on(tables: &DbTables, owner_id: PersonId) -> CleanJobResult<bool> {
    let wallet = Self::by_owner_on(tables, owner_id)?;
    let sum: f64 = tables
      .wallet_transactions
      .iter()
      .filter(|t| t.wallet_id == wallet.id)
      .map(|t| t.amount)
      .sum();
    Ok((sum - wallet.balance).abs() < BALANCE_EPSILON)
  }

  pub async fn reconcile(pool: &DbPool, owner_id: PersonId) -> CleanJobResult<bool> {
    let conn = get_conn(pool).await?;
    Self::reconcile_on(&conn, owner_id)
  }
}

impl WalletTransaction {
  pub fn list_for_booking_on(tables: &DbTables, booking_id: BookingId) -> Vec<Self> {
    tables
      .wallet_transactions
      .iter()
      .filter(|t| t.booking_id == Some(booking_id))
      .cloned()
      .collect()
  }

  pub async fn list_for_booking(pool: &DbPool, booking_id: BookingId) -> CleanJobResult<Vec<Self>> {
    let conn = get_conn(pool).await?;
    Ok(Self::list_for_booking_on(&conn, booking_id))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  #[tokio::test]
  async fn debit_pairs_balance_and_ledger() -> CleanJobResult<()> {
    let pool = DbPool::new();
    let owner = PersonId(7);
    Wallet::create_for_owner(&pool, owner).await?;
    let mut conn = get_conn(&pool).await?;
    let (wallet, tx) = conn.run_transaction(|tables| {
      Wallet::commission_debit_on(tables, owner, 70.0, BookingId(1), json!({"jobNumber": 21}))
    })?;
    assert_eq!(wallet.balance, -70.0);
    assert_eq!(tx.amount, -70.0);
    assert_eq!(tx.kind, TxKind::Commission);
    assert!(Wallet::reconcile_on(&conn, owner)?);
    Ok(())
  }

  #[tokio::test]
  async fn adjustment_rejects_zero() -> CleanJobResult<()> {
    let pool = DbPool::new();
    let owner = PersonId(7);
    Wallet::create_for_owner(&pool, owner).await?;
    let res = Wallet::apply_adjustment(&pool, owner, 0.0, "noop".into()).await;
    assert!(matches!(
      res.unwrap_err().error_type,
      CleanJobErrorType::ZeroAmount
    ));
    Ok(())
  }

  #[tokio::test]
  async fn missing_wallet_is_an_error() -> CleanJobResult<()> {
    let pool = DbPool::new();
    let mut conn = get_conn(&pool).await?;
    let res = conn.run_transaction(|tables| {
      Wallet::commission_debit_on(tables, PersonId(9), 10.0, BookingId(1), json!({}))
    });
    assert!(matches!(
      res.unwrap_err().error_type,
      CleanJobErrorType::WalletNotFound
    ));
    Ok(())
  }

  #[tokio::test]
  async fn one_wallet_per_owner() -> CleanJobResult<()> {
    let pool = DbPool::new();
    let owner = PersonId(3);
    Wallet::create_for_owner(&pool, owner).await?;
    let res = Wallet::create_for_owner(&pool, owner).await;
    assert!(matches!(
      res.unwrap_err().error_type,
      CleanJobErrorType::WalletAlreadyExists
    ));
    Ok(())
  }
}
