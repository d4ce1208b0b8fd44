use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Europe::Kyiv;

use super::*;
use crate::error::NotifyError;
use crate::fake::{no_outage_status, outage_status, Call, FakeSource, FakeTransport};
use crate::notifier::DeliveryAction;

fn clock() -> SiteClock {
    SiteClock::fixed(Kyiv, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap())
}

fn monitor(
    source: FakeSource,
    transport: FakeTransport,
    dir: &tempfile::TempDir,
) -> Monitor<FakeSource, FakeTransport> {
    Monitor::new(
        source,
        transport,
        StateStore::new(dir.path().join("last_message.json")),
        ClassifierKeywords::default(),
        clock(),
    )
    .with_recheck_delay(RecheckDelay::from_secs(0, 0))
}

fn outage_record(hash: String) -> NotificationState {
    NotificationState::published(
        "500".to_string(),
        true,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        hash,
    )
}

#[tokio::test]
async fn no_outage_evidence_is_idle_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let monitor = monitor(FakeSource::with([no_outage_status()]), transport.clone(), &dir);

    let outcome = monitor.run_cycle().await.unwrap();

    assert_eq!(outcome, CycleOutcome::Idle);
    assert!(transport.calls().is_empty());
    assert!(!monitor.store().path().exists());
}

#[tokio::test]
async fn first_outage_sends_once() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let monitor = monitor(FakeSource::with([outage_status()]), transport.clone(), &dir);

    let outcome = monitor.run_cycle().await.unwrap();

    let CycleOutcome::Published(delivery) = outcome else {
        panic!("expected Published, got {outcome:?}");
    };
    assert_eq!(delivery.action, DeliveryAction::Sent);
    assert!(monitor.store().load().unwrap().is_outage);
    assert!(matches!(&transport.calls()[..], [Call::Send { .. }]));
}

#[tokio::test]
async fn outage_after_recovery_sends_instead_of_editing() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let monitor = monitor(FakeSource::with([outage_status()]), transport.clone(), &dir);
    let recovered = NotificationState::published(
        "500".to_string(),
        false,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        fingerprint(&no_outage_status()),
    );
    monitor.store().save(&recovered).unwrap();

    let outcome = monitor.run_cycle().await.unwrap();

    let CycleOutcome::Published(delivery) = outcome else {
        panic!("expected Published, got {outcome:?}");
    };
    assert_eq!(delivery.action, DeliveryAction::Sent);
    assert!(matches!(&transport.calls()[..], [Call::Send { .. }]));

    let stored = monitor.store().load().unwrap();
    assert!(stored.reports_outage());
    assert_ne!(stored.message_id.as_deref(), Some("500"));
}

#[tokio::test]
async fn unchanged_outage_makes_no_transport_calls() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let monitor = monitor(FakeSource::with([outage_status()]), transport.clone(), &dir);
    let record = outage_record(fingerprint(&outage_status()));
    monitor.store().save(&record).unwrap();

    let outcome = monitor.run_cycle().await.unwrap();

    assert_eq!(outcome, CycleOutcome::Unchanged);
    assert!(transport.calls().is_empty());
    assert_eq!(monitor.store().load().unwrap(), record);
}

#[tokio::test]
async fn changed_outage_edits_existing_message() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let monitor = monitor(FakeSource::with([outage_status()]), transport.clone(), &dir);
    monitor
        .store()
        .save(&outage_record("older".to_string()))
        .unwrap();

    let outcome = monitor.run_cycle().await.unwrap();

    assert!(matches!(
        outcome,
        CycleOutcome::Published(Delivery {
            action: DeliveryAction::Edited,
            ..
        })
    ));
    assert!(matches!(&transport.calls()[..], [Call::Edit { id, .. }] if id == "500"));
}

#[tokio::test]
async fn confirmed_recovery_rechecks_once_then_edits() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let source = FakeSource::with([no_outage_status(), no_outage_status()]);
    let monitor = monitor(source, transport.clone(), &dir);
    monitor
        .store()
        .save(&outage_record(fingerprint(&outage_status())))
        .unwrap();

    let outcome = monitor.run_cycle().await.unwrap();

    let CycleOutcome::RecoveryConfirmed(delivery) = outcome else {
        panic!("expected RecoveryConfirmed, got {outcome:?}");
    };
    assert!(!delivery.state.is_outage);
    assert_eq!(monitor.source.fetches(), 2);
    assert!(
        matches!(&transport.calls()[..], [Call::Edit { id, text }] if id == "500" && text.contains("відновлено"))
    );
    assert!(!monitor.store().load().unwrap().is_outage);
}

#[tokio::test]
async fn outage_on_recheck_aborts_recovery_without_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let source = FakeSource::with([no_outage_status(), outage_status()]);
    let monitor = monitor(source, transport.clone(), &dir);
    let record = outage_record(fingerprint(&outage_status()));
    monitor.store().save(&record).unwrap();

    let outcome = monitor.run_cycle().await.unwrap();

    let CycleOutcome::RecoveryAborted(delivery) = outcome else {
        panic!("expected RecoveryAborted, got {outcome:?}");
    };
    assert_eq!(delivery.action, DeliveryAction::Suppressed);
    assert!(transport.calls().is_empty());
    assert_eq!(monitor.store().load().unwrap(), record);
}

#[tokio::test]
async fn outage_on_recheck_with_new_fields_edits() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let source = FakeSource::with([no_outage_status(), outage_status()]);
    let monitor = monitor(source, transport.clone(), &dir);
    monitor
        .store()
        .save(&outage_record("older".to_string()))
        .unwrap();

    let outcome = monitor.run_cycle().await.unwrap();

    assert!(matches!(
        outcome,
        CycleOutcome::RecoveryAborted(Delivery {
            action: DeliveryAction::Edited,
            ..
        })
    ));
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn fetch_error_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let monitor = monitor(FakeSource::failing(), transport.clone(), &dir);
    let record = outage_record("older".to_string());
    monitor.store().save(&record).unwrap();
    let before = std::fs::read(monitor.store().path()).unwrap();

    let err = monitor.run_cycle().await.unwrap_err();

    assert!(matches!(err, CycleError::Fetch(_)), "got: {err:?}");
    assert!(transport.calls().is_empty());
    assert_eq!(std::fs::read(monitor.store().path()).unwrap(), before);
}

#[tokio::test]
async fn transport_error_surfaces_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    transport.set_failing(true);
    let monitor = monitor(FakeSource::with([outage_status()]), transport, &dir);

    let err = monitor.run_cycle().await.unwrap_err();

    assert!(
        matches!(err, CycleError::Notify(NotifyError::Transport(_))),
        "got: {err:?}"
    );
    assert!(!monitor.store().path().exists());
}

#[tokio::test]
async fn inspect_reports_decision_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::default();
    let monitor = monitor(FakeSource::with([outage_status()]), transport.clone(), &dir);

    let inspection = monitor.inspect().await.unwrap();

    assert!(inspection.signal.is_outage);
    assert_eq!(inspection.phase, Phase::Stable);
    assert_eq!(inspection.decision, Decision::Publish);
    assert_eq!(inspection.fingerprint, fingerprint(&outage_status()));
    assert!(transport.calls().is_empty());
    assert!(!monitor.store().path().exists());
}
