use crate::newtypes::PersonId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Aggregate cleaner-side state relevant to commission. Mutated only by the
/// commission ledger on confirmation.
pub struct CleanerAccount {
  pub cleaner_id: PersonId,
  /// Monotonic counter of confirmed jobs
  pub completed_jobs_count: i32,
  /// Monotonic, capped at the configured free-job threshold
  pub free_jobs_used: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, derive_new::new)]
pub struct CleanerAccountInsertForm {
  pub cleaner_id: PersonId,
  #[new(default)]
  pub completed_jobs_count: Option<i32>,
  #[new(default)]
  pub free_jobs_used: Option<i32>,
  #[new(default)]
  pub created_at: Option<DateTime<Utc>>,
}
