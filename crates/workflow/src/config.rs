use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Tunables for the booking workflow. Supplied by the deployment's settings
/// layer; every field has a production default.
pub struct WorkflowConfig {
  /// How many confirmed jobs per cleaner are exempt from commission
  pub free_job_threshold: i32,
  /// Marketplace cut of total_price, as a fraction
  pub commission_rate: f64,
  /// Completed bookings older than this are force-confirmed by the sweep
  pub auto_confirm_window_hours: i64,
  /// Cancellations this close to scheduled_at are rejected (unless Requested)
  pub cancellation_window_hours: i64,
}

impl Default for WorkflowConfig {
  fn default() -> Self {
    WorkflowConfig {
      free_job_threshold: 20,
      commission_rate: 0.07,
      auto_confirm_window_hours: 48,
      cancellation_window_hours: 2,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn partial_json_keeps_defaults() {
    let config: WorkflowConfig = serde_json::from_str("{\"commissionRate\":0.1}").unwrap();
    assert_eq!(config.commission_rate, 0.1);
    assert_eq!(config.free_job_threshold, 20);
    assert_eq!(config.auto_confirm_window_hours, 48);
    assert_eq!(config.cancellation_window_hours, 2);
  }
}
