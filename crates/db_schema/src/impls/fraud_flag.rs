use crate::{
  newtypes::PersonId,
  source::fraud_flag::{FraudFlag, FraudFlagInsertForm},
  utils::{get_conn, DbPool, DbTables},
};
use chrono::Utc;
use cleanjob_utils::error::CleanJobResult;

impl FraudFlag {
  pub fn create_on(tables: &mut DbTables, form: &FraudFlagInsertForm) -> CleanJobResult<Self> {
    let flag = FraudFlag {
      id: tables.next_fraud_flag_id(),
      person_id: form.person_id,
      booking_id: form.booking_id,
      severity: form.severity,
      reason: form.reason.clone(),
      created_at: Utc::now(),
    };
    tables.fraud_flags.push(flag.clone());
    Ok(flag)
  }

  pub async fn create(pool: &DbPool, form: &FraudFlagInsertForm) -> CleanJobResult<Self> {
    let mut conn = get_conn(pool).await?;
    conn.run_transaction(|tables| Self::create_on(tables, form))
  }

  pub async fn list_for_person(pool: &DbPool, person_id: PersonId) -> CleanJobResult<Vec<Self>> {
    let conn = get_conn(pool).await?;
    Ok(
      conn
        .fraud_flags
        .iter()
        .filter(|f| f.person_id == person_id)
        .cloned()
        .collect(),
    )
  }
}
