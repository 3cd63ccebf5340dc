// Full index builds over synthetic volumes

use crate::common::{build_index, data_lines, TestVolume};
use std::fs;
use wibl::core::indexer::{CancelFlag, IndexBuilder, IndexWorker, JobState};
use wibl::{IndexEvent, VolumeInfo, WiblError};

#[test]
fn test_every_regular_file_indexed_once() {
    let volume = TestVolume::small();
    let (_out, path, stats, _events) = build_index(&volume.info());

    assert_eq!(stats.files_indexed, 8);

    let mut rows: Vec<String> = data_lines(&path)
        .iter()
        .map(|r| r.split('\t').next().unwrap().to_string())
        .collect();
    rows.sort();
    let before = rows.len();
    rows.dedup();
    assert_eq!(rows.len(), before);
    assert!(rows.contains(&"docs\\\\report.txt".to_string()));
    assert!(rows.contains(&".hidden\\\\config".to_string()));
}

#[test]
fn test_empty_directories_produce_no_rows() {
    let volume = TestVolume::with_files(&["keep.txt"]);
    fs::create_dir_all(volume.path().join("empty/nested")).unwrap();

    let (_out, path, stats, _events) = build_index(&volume.info());
    assert_eq!(stats.files_indexed, 1);
    assert_eq!(data_lines(&path).len(), 1);
}

#[test]
fn test_event_sequence_for_successful_build() {
    let volume = TestVolume::numbered(4500);
    let (_out, _path, stats, events) = build_index(&volume.info());

    assert_eq!(stats.files_indexed, 4500);
    assert!(matches!(events.first(), Some(IndexEvent::Started { .. })));

    let progress: Vec<u64> = events
        .iter()
        .filter_map(|e| match e {
            IndexEvent::Progress { files } => Some(*files),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![2000, 4000, 4500]);

    match events.last() {
        Some(IndexEvent::Finished { ok, message }) => {
            assert!(ok);
            assert_eq!(message, "Done. Files indexed: 4500");
        }
        other => panic!("Expected Finished, got {other:?}"),
    }
}

#[test]
fn test_rebuild_overwrites_previous_index() {
    let volume = TestVolume::numbered(50);
    let (_out, path, _stats, _events) = build_index(&volume.info());

    let small = TestVolume::with_files(&["only.txt"]);
    IndexBuilder::default()
        .run(&small.info(), &path, &CancelFlag::new(), |_| {})
        .unwrap();

    assert_eq!(data_lines(&path).len(), 1);
}

#[test]
fn test_invalid_volume_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("bad.wibl");
    let mut events = Vec::new();

    let err = IndexBuilder::default()
        .run(
            &VolumeInfo::invalid("/nowhere"),
            &path,
            &CancelFlag::new(),
            |e| events.push(e),
        )
        .unwrap_err();

    assert!(matches!(err, WiblError::InvalidVolume));
    assert!(!path.exists());
    assert_eq!(
        events,
        vec![IndexEvent::Finished {
            ok: false,
            message: "Invalid volume info.".to_string()
        }]
    );
}

#[test]
fn test_worker_runs_job_and_reports_state() {
    let volume = TestVolume::numbered(100);
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("worker.wibl");

    let (worker, mut events) = IndexWorker::spawn(IndexBuilder::default()).unwrap();
    assert_eq!(worker.state(), JobState::Idle);

    worker.start(volume.info(), &path).unwrap();

    let finished = loop {
        match events.blocking_recv() {
            Some(IndexEvent::Finished { ok, message }) => break (ok, message),
            Some(_) => continue,
            None => panic!("Event channel closed"),
        }
    };

    assert_eq!(finished, (true, "Done. Files indexed: 100".to_string()));
    assert_eq!(worker.state(), JobState::Succeeded);
    assert_eq!(data_lines(&path).len(), 100);
}

#[test]
fn test_worker_can_run_consecutive_jobs() {
    let first = TestVolume::numbered(10);
    let second = TestVolume::numbered(20);
    let out = tempfile::tempdir().unwrap();

    let (worker, mut events) = IndexWorker::spawn(IndexBuilder::default()).unwrap();

    for (volume, name, expected) in [(&first, "a.wibl", 10), (&second, "b.wibl", 20)] {
        worker.start(volume.info(), out.path().join(name)).unwrap();
        loop {
            match events.blocking_recv() {
                Some(IndexEvent::Finished { ok, .. }) => {
                    assert!(ok);
                    break;
                }
                Some(_) => continue,
                None => panic!("Event channel closed"),
            }
        }
        assert_eq!(data_lines(&out.path().join(name)).len(), expected);
    }

    assert_eq!(worker.state(), JobState::Succeeded);
}
