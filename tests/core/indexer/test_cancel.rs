// Cooperative cancellation of indexing jobs

use crate::common::{data_lines, header_lines, TestVolume};
use std::sync::Arc;
use wibl::core::indexer::{CancelFlag, IndexBuilder, IndexWorker, JobState};
use wibl::{IndexEvent, WiblError};

#[test]
fn test_cancel_on_first_progress_stops_builder() {
    let volume = TestVolume::numbered(5000);
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("cancel.wibl");
    let cancel = Arc::new(CancelFlag::new());
    let mut events = Vec::new();

    let flag = cancel.clone();
    let err = IndexBuilder::default()
        .run(&volume.info(), &path, &cancel, |e| {
            if matches!(e, IndexEvent::Progress { files: 2000 }) {
                flag.request();
            }
            events.push(e);
        })
        .unwrap_err();

    assert!(matches!(err, WiblError::Canceled));
    assert_eq!(
        events.last(),
        Some(&IndexEvent::Finished {
            ok: false,
            message: "Canceled.".to_string()
        })
    );

    // Header and rows written before the cancel stay on disk
    assert_eq!(header_lines(&path).len(), 6);
    let rows = data_lines(&path).len();
    assert!(rows >= 2000 && rows < 5000, "unexpected row count {rows}");
}

#[test]
fn test_cancel_through_worker() {
    let volume = TestVolume::numbered(5000);
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("cancel.wibl");

    let (worker, mut events) = IndexWorker::spawn(IndexBuilder::new(500)).unwrap();
    worker.start(volume.info(), &path).unwrap();

    let mut cancel_sent = false;
    let finished = loop {
        match events.blocking_recv() {
            Some(IndexEvent::Progress { .. }) if !cancel_sent => {
                worker.cancel();
                cancel_sent = true;
            }
            Some(IndexEvent::Finished { ok, message }) => break (ok, message),
            Some(_) => continue,
            None => panic!("Event channel closed"),
        }
    };

    // The walk may already have finished when the request lands
    if finished.0 {
        assert_eq!(worker.state(), JobState::Succeeded);
        assert_eq!(data_lines(&path).len(), 5000);
    } else {
        assert_eq!(finished.1, "Canceled.");
        assert_eq!(worker.state(), JobState::Canceled);
        assert!(data_lines(&path).len() <= 5000);
    }
}

#[test]
fn test_cancel_does_not_leak_into_next_job() {
    let volume = TestVolume::numbered(30);
    let out = tempfile::tempdir().unwrap();

    let (worker, mut events) = IndexWorker::spawn(IndexBuilder::default()).unwrap();

    // Request lands while no job is running
    worker.cancel();
    worker.start(volume.info(), out.path().join("next.wibl")).unwrap();

    let ok = loop {
        match events.blocking_recv() {
            Some(IndexEvent::Finished { ok, .. }) => break ok,
            Some(_) => continue,
            None => panic!("Event channel closed"),
        }
    };

    assert!(ok);
    assert_eq!(worker.state(), JobState::Succeeded);
}
