use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
  EnumString, Display, EnumIter, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default,
  Hash,
)]
/// The booking lifecycle states.
pub enum BookingStatus {
  /// Created by the client, no cleaner assigned yet
  #[default]
  Requested,
  /// The assigned cleaner accepted the job
  Accepted,
  /// Cleaner is on the way to the address
  OnTheWay,
  /// Cleaner arrived at the address
  Arrived,
  /// Service under way
  InProgress,
  /// Cleaner finished, waiting for the client to confirm
  Completed,
  /// Client confirmed the work (terminal); commission is applied on this transition
  ClientConfirmed,
  /// Client disputed the completed work; an admin resolves it
  Disputed,
  /// Cancelled before completion (terminal)
  Cancelled,
}

#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Hash,
)]
/// Who is asking for a status change. Supplied by the (out of scope) auth layer.
pub enum ActorRole {
  /// The client who created the booking
  #[default]
  Client,
  /// The cleaner assigned to the booking
  Cleaner,
  /// Marketplace staff, may drive any legal transition
  Admin,
  /// Background jobs acting with admin-equivalent permission
  System,
}

#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Hash,
)]
/// The wallet ledger entry kinds.
pub enum TxKind {
  /// Marketplace commission debited on client confirmation
  #[default]
  Commission,
  /// Manual admin credit or debit, always journaled
  Adjustment,
}

#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Hash,
)]
/// A commission record's state. Only ever moves Pending -> Applied.
pub enum CommissionStatus {
  /// Fee computed, wallet debit not yet journaled
  #[default]
  Pending,
  /// Wallet debit journaled (or the job was free)
  Applied,
}

#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Hash,
)]
/// Severity of a fraud observation. The auto-confirm sweep raises Low flags.
pub enum FraudSeverity {
  #[default]
  Low,
  Medium,
  High,
}
