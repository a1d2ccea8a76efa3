use crate::{
  enums::TxKind,
  newtypes::{BookingId, PersonId, WalletId, WalletTransactionId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A cleaner's running balance. The balance changes only through
/// WalletTransaction rows; it may go negative (commission debits are not
/// floored, the debt limit gates new bookings elsewhere).
pub struct Wallet {
  pub id: WalletId,
  pub owner_id: PersonId,
  pub balance: f64,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
}

#[skip_serializing_none]
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Immutable ledger line. The sum of a wallet's transaction amounts always
/// equals its current balance.
pub struct WalletTransaction {
  pub id: WalletTransactionId,
  pub wallet_id: WalletId,
  pub kind: TxKind,
  /// Signed; commission debits are negative, free jobs journal a zero row
  pub amount: f64,
  pub booking_id: Option<BookingId>,
  pub description: String,
  pub meta: Option<Value>,
  pub created_at: DateTime<Utc>,
}

#[derive(Clone, derive_new::new)]
pub struct WalletTransactionInsertForm {
  pub wallet_id: WalletId,
  pub kind: TxKind,
  pub amount: f64,
  pub description: String,
  #[new(default)]
  pub booking_id: Option<BookingId>,
  #[new(default)]
  pub meta: Option<Value>,
}
