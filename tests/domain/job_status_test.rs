use std::str::FromStr;

use kargoline::domain::JobStatus;

#[test]
fn given_accepted_job_when_walking_the_trip_then_sequence_ends_at_completed() {
    let mut status = JobStatus::Accepted;
    let mut visited = vec![status];
    while let Some(next) = status.next() {
        visited.push(next);
        status = next;
    }

    assert_eq!(
        visited,
        vec![
            JobStatus::Accepted,
            JobStatus::EnRouteToPickup,
            JobStatus::EnRouteToDropoff,
            JobStatus::Completed,
        ]
    );
}

#[test]
fn given_pending_or_terminal_status_when_asking_next_then_none() {
    assert_eq!(JobStatus::Pending.next(), None);
    assert_eq!(JobStatus::Completed.next(), None);
    assert_eq!(JobStatus::Cancelled.next(), None);
}

#[test]
fn given_statuses_when_checking_cancellable_then_only_pending_and_accepted() {
    assert!(JobStatus::Pending.is_cancellable());
    assert!(JobStatus::Accepted.is_cancellable());
    assert!(!JobStatus::EnRouteToPickup.is_cancellable());
    assert!(!JobStatus::EnRouteToDropoff.is_cancellable());
    assert!(!JobStatus::Completed.is_cancellable());
    assert!(!JobStatus::Cancelled.is_cancellable());
}

#[test]
fn given_statuses_when_checking_terminal_then_completed_and_cancelled() {
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Cancelled.is_terminal());
    assert!(!JobStatus::EnRouteToDropoff.is_terminal());
}

#[test]
fn given_display_name_when_parsing_then_returns_status() {
    assert_eq!(
        JobStatus::from_str("En Route to Dropoff").unwrap(),
        JobStatus::EnRouteToDropoff
    );
    assert!(JobStatus::from_str("IN_PROGRESS").is_err());
}

#[test]
fn given_status_when_serialized_then_uses_display_name() {
    let json = serde_json::to_string(&JobStatus::EnRouteToPickup).unwrap();
    assert_eq!(json, "\"En Route to Pickup\"");
    assert_eq!(JobStatus::EnRouteToPickup.to_string(), "En Route to Pickup");
}
