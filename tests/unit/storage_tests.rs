/*!
 * Unit tests for run-scoped artifact storage
 */

use narrimate::{ArtifactKind, ArtifactStore, RunId};
use tempfile::TempDir;

#[test]
fn test_new_store_bootstraps_all_kind_directories() {
    let dir = TempDir::new().unwrap();
    let _store = ArtifactStore::new(dir.path()).unwrap();

    for name in ["scripts", "audio", "code", "videos"] {
        assert!(dir.path().join(name).is_dir(), "missing directory {}", name);
    }
}

#[test]
fn test_artifact_paths_are_keyed_by_run_id_and_kind() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path()).unwrap();
    let run_id = RunId::from_string("20260829_153000_042");

    assert!(store
        .path_for(ArtifactKind::Script, &run_id)
        .ends_with("scripts/20260829_153000_042.txt"));
    assert!(store
        .path_for(ArtifactKind::Audio, &run_id)
        .ends_with("audio/20260829_153000_042.mp3"));
    assert!(store
        .path_for(ArtifactKind::AnimationSource, &run_id)
        .ends_with("code/20260829_153000_042.py"));
    assert!(store
        .path_for(ArtifactKind::Video, &run_id)
        .ends_with("videos/20260829_153000_042.mp4"));
}

#[test]
fn test_saved_artifacts_read_back_verbatim() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path()).unwrap();
    let run_id = RunId::now();

    store
        .save_text(ArtifactKind::Script, &run_id, "narration text")
        .unwrap();
    store
        .save(ArtifactKind::Audio, &run_id, b"\x49\x44\x33 audio")
        .unwrap();

    assert_eq!(
        store.read_text(ArtifactKind::Script, &run_id).unwrap(),
        "narration text"
    );
    assert_eq!(
        store.read(ArtifactKind::Audio, &run_id).unwrap(),
        b"\x49\x44\x33 audio"
    );
}

#[test]
fn test_exists_and_read_agree_on_missing_artifacts() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path()).unwrap();
    let run_id = RunId::from_string("absent");

    assert!(!store.exists(ArtifactKind::Video, &run_id));
    assert!(store.read(ArtifactKind::Video, &run_id).is_err());
    assert!(store.read_text(ArtifactKind::Script, &run_id).is_err());
}

#[test]
fn test_distinct_runs_never_collide() {
    let dir = TempDir::new().unwrap();
    let store = ArtifactStore::new(dir.path()).unwrap();

    let first = RunId::from_string("run_a");
    let second = RunId::from_string("run_b");
    store.save_text(ArtifactKind::Script, &first, "first").unwrap();
    store.save_text(ArtifactKind::Script, &second, "second").unwrap();

    assert_eq!(
        store.read_text(ArtifactKind::Script, &first).unwrap(),
        "first"
    );
    assert_eq!(
        store.read_text(ArtifactKind::Script, &second).unwrap(),
        "second"
    );
}
