//! The booking state machine as data: one table from current status to the
//! statuses it may legally move to, one table from actor role to the statuses
//! that role may target. Keeping both as plain tables makes the machine
//! independently testable (closure, acyclicity, terminal states).

use cleanjob_db_schema::enums::{ActorRole, BookingStatus};
use cleanjob_utils::error::{CleanJobErrorType, CleanJobResult};

pub fn allowed_targets(from: BookingStatus) -> &'static [BookingStatus] {
  use BookingStatus::*;
  match from {
    Requested => &[Accepted, Cancelled],
    Accepted => &[OnTheWay, Cancelled],
    OnTheWay => &[Arrived, Cancelled],
    Arrived => &[InProgress],
    InProgress => &[Completed],
    Completed => &[ClientConfirmed, Disputed],
    // terminal
    ClientConfirmed => &[],
    // admin resolution path
    Disputed => &[ClientConfirmed],
    // terminal
    Cancelled => &[],
  }
}

pub fn is_terminal(status: BookingStatus) -> bool {
  allowed_targets(status).is_empty()
}

/// Statuses a role may request as a target. `None` means unrestricted
/// (Admin, and the sweep's System actor).
pub fn role_targets(role: ActorRole) -> Option<&'static [BookingStatus]> {
  use BookingStatus::*;
  match role {
    ActorRole::Admin | ActorRole::System => None,
    ActorRole::Client => Some(&[ClientConfirmed, Cancelled, Disputed]),
    ActorRole::Cleaner => Some(&[Accepted, OnTheWay, Arrived, InProgress, Completed, Cancelled]),
  }
}

pub fn role_may_target(role: ActorRole, target: BookingStatus) -> bool {
  match role_targets(role) {
    None => true,
    Some(targets) => targets.contains(&target),
  }
}

pub fn check_transition(from: BookingStatus, to: BookingStatus) -> CleanJobResult<()> {
  if allowed_targets(from).contains(&to) {
    Ok(())
  } else {
    Err(
      CleanJobErrorType::InvalidTransition {
        from: from.to_string(),
        to: to.to_string(),
      }
      .into(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use std::collections::HashSet;
  use strum::IntoEnumIterator;

  #[test]
  fn exactly_two_terminal_states() {
    let terminals: Vec<BookingStatus> = BookingStatus::iter().filter(|s| is_terminal(*s)).collect();
    assert_eq!(
      terminals,
      vec![BookingStatus::ClientConfirmed, BookingStatus::Cancelled]
    );
  }

  #[test]
  fn table_is_acyclic() {
    // DFS from every state; a back edge to the current path is a cycle.
    fn visit(state: BookingStatus, path: &mut Vec<BookingStatus>) {
      assert!(!path.contains(&state), "cycle through {state}");
      path.push(state);
      for next in allowed_targets(state) {
        visit(*next, path);
      }
      path.pop();
    }
    for state in BookingStatus::iter() {
      visit(state, &mut Vec::new());
    }
  }

  #[test]
  fn every_status_is_reachable_from_requested() {
    let mut seen = HashSet::from([BookingStatus::Requested]);
    let mut stack = vec![BookingStatus::Requested];
    while let Some(state) = stack.pop() {
      for next in allowed_targets(state) {
        if seen.insert(*next) {
          stack.push(*next);
        }
      }
    }
    for state in BookingStatus::iter() {
      assert!(seen.contains(&state), "{state} unreachable");
    }
  }

  #[test]
  fn rejects_everything_not_in_the_table() {
    for from in BookingStatus::iter() {
      for to in BookingStatus::iter() {
        let allowed = allowed_targets(from).contains(&to);
        assert_eq!(check_transition(from, to).is_ok(), allowed);
      }
    }
  }

  #[test]
  fn role_tables_match_permission_matrix() {
    assert!(role_may_target(ActorRole::Admin, BookingStatus::Arrived));
    assert!(role_may_target(ActorRole::System, BookingStatus::ClientConfirmed));
    assert!(role_may_target(ActorRole::Client, BookingStatus::Disputed));
    assert!(!role_may_target(ActorRole::Client, BookingStatus::Accepted));
    assert!(role_may_target(ActorRole::Cleaner, BookingStatus::Completed));
    assert!(!role_may_target(ActorRole::Cleaner, BookingStatus::ClientConfirmed));
  }
}
