use crate::{
  newtypes::PersonId,
  source::cleaner_account::{CleanerAccount, CleanerAccountInsertForm},
  utils::{get_conn, DbPool, DbTables},
};
use chrono::Utc;
use cleanjob_utils::error::{CleanJobErrorType, CleanJobResult};

impl CleanerAccount {
  pub fn create_on(tables: &mut DbTables, form: &CleanerAccountInsertForm) -> CleanJobResult<Self> {
    if tables.cleaner_accounts.contains_key(&form.cleaner_id) {
      return Err(CleanJobErrorType::CouldntUpdateCleanerAccount.into());
    }
    let account = CleanerAccount {
      cleaner_id: form.cleaner_id,
      completed_jobs_count: form.completed_jobs_count.unwrap_or(0),
      free_jobs_used: form.free_jobs_used.unwrap_or(0),
      created_at: form.created_at.unwrap_or_else(Utc::now),
      updated_at: None,
    };
    tables
      .cleaner_accounts
      .insert(form.cleaner_id, account.clone());
    Ok(account)
  }

  /// Get-or-create with zeroed counters; first confirmation provisions the
  /// account.
  pub fn ensure_for_cleaner_on(tables: &mut DbTables, cleaner_id: PersonId) -> &mut Self {
    tables
      .cleaner_accounts
      .entry(cleaner_id)
      .or_insert_with(|| CleanerAccount {
        cleaner_id,
        completed_jobs_count: 0,
        free_jobs_used: 0,
        created_at: Utc::now(),
        updated_at: None,
      })
  }

  pub fn read_by_cleaner_on(tables: &DbTables, cleaner_id: PersonId) -> CleanJobResult<Self> {
    tables
      .cleaner_accounts
      .get(&cleaner_id)
      .cloned()
      .ok_or_else(|| CleanJobErrorType::NotFound.into())
  }

  pub async fn read_by_cleaner(pool: &DbPool, cleaner_id: PersonId) -> CleanJobResult<Self> {
    let conn = get_conn(pool).await?;
    Self::read_by_cleaner_on(&conn, cleaner_id)
  }
}
