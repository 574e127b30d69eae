use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::tempdir;

use bucket_sweep_core::config::{RunConfig, Verbosity};
use bucket_sweep_core::contract::{MockObjectStore, PutMetadata, PutRequest};
use bucket_sweep_core::pipeline;

fn test_config(roots: Vec<PathBuf>) -> RunConfig {
    RunConfig {
        bucket: "unit-bucket".to_string(),
        region: "eu-west-1".to_string(),
        access_id: "AKIATEST".to_string(),
        secret: "test-secret".to_string(),
        session_token: None,
        verbosity: Verbosity::Quiet,
        roots,
    }
}

/// Mock store that records every key it is asked to put and always succeeds.
fn recording_store(keys: Arc<Mutex<Vec<String>>>) -> MockObjectStore {
    let mut store = MockObjectStore::new();
    store.expect_put_object().returning(move |req: PutRequest<'_>| {
        keys.lock().unwrap().push(req.key.to_string());
        Ok(PutMetadata {
            e_tag: Some("abc123".to_string()),
            version_id: None,
        })
    });
    store
}

fn write_file(path: &std::path::Path, content: &str) {
    let mut f = File::create(path).unwrap();
    writeln!(f, "{content}").unwrap();
}

#[tokio::test]
async fn uploads_visible_files_and_skips_hidden_ones() {
    // roots = ["/data"] with a.txt, .hidden and sub/b.txt: two uploads,
    // the hidden file never attempted.
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    create_dir_all(root.join("sub")).unwrap();
    write_file(&root.join("a.txt"), "a");
    write_file(&root.join(".hidden"), "h");
    write_file(&root.join("sub/b.txt"), "b");

    let keys = Arc::new(Mutex::new(Vec::new()));
    let store = recording_store(keys.clone());
    let config = test_config(vec![root.clone()]);

    let summary = pipeline::run(&config, &store)
        .await
        .expect("Sweep should succeed");

    assert_eq!(summary.uploaded, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 1);

    let mut seen = keys.lock().unwrap().clone();
    seen.sort();
    let mut expected = vec![
        root.join("a.txt").to_string_lossy().into_owned(),
        root.join("sub/b.txt").to_string_lossy().into_owned(),
    ];
    expected.sort();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn missing_root_does_not_affect_sibling_roots() {
    // roots = ["/missing", "/data"]: one per-root error, one upload, run Ok.
    let tmp = tempdir().unwrap();
    let data = tmp.path().join("data");
    create_dir_all(&data).unwrap();
    write_file(&data.join("c.txt"), "c");

    let keys = Arc::new(Mutex::new(Vec::new()));
    let store = recording_store(keys.clone());
    let config = test_config(vec![PathBuf::from("/no/such/root"), data.clone()]);

    let summary = pipeline::run(&config, &store)
        .await
        .expect("Per-root failure must not fail the run");

    assert_eq!(summary.uploaded, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(
        keys.lock().unwrap().clone(),
        vec![data.join("c.txt").to_string_lossy().into_owned()]
    );
}

#[tokio::test]
async fn every_file_is_attempted_exactly_once_across_roots() {
    let tmp = tempdir().unwrap();
    let first = tmp.path().join("first");
    let second = tmp.path().join("second");
    let empty = tmp.path().join("empty");
    create_dir_all(first.join("nested")).unwrap();
    create_dir_all(&second).unwrap();
    create_dir_all(&empty).unwrap();
    write_file(&first.join("one.txt"), "1");
    write_file(&first.join("nested/two.txt"), "2");
    write_file(&second.join("three.txt"), "3");

    let keys = Arc::new(Mutex::new(Vec::new()));
    let store = recording_store(keys.clone());
    let config = test_config(vec![first, second, empty]);

    let summary = pipeline::run(&config, &store)
        .await
        .expect("Sweep should succeed");

    assert_eq!(summary.uploaded, 3);
    let seen = keys.lock().unwrap().clone();
    let unique: std::collections::HashSet<_> = seen.iter().cloned().collect();
    assert_eq!(seen.len(), 3, "no file may be uploaded twice");
    assert_eq!(unique.len(), 3);
}

#[tokio::test]
async fn per_file_put_failure_does_not_abort_the_run() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    write_file(&root.join("good.txt"), "good");
    write_file(&root.join("bad.bin"), "bad");

    let mut store = MockObjectStore::new();
    store.expect_put_object().returning(|req: PutRequest<'_>| {
        if req.key.ends_with("bad.bin") {
            Err("simulated put failure".into())
        } else {
            Ok(PutMetadata {
                e_tag: None,
                version_id: None,
            })
        }
    });
    let config = test_config(vec![root]);

    let summary = pipeline::run(&config, &store)
        .await
        .expect("Per-file failure must not fail the run");

    assert_eq!(summary.uploaded, 1);
    assert_eq!(summary.failed, 1);
}

#[cfg(unix)]
#[tokio::test]
async fn unreadable_file_is_reported_without_reaching_the_store() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    write_file(&root.join("ok.txt"), "ok");
    // A dangling symlink is emitted by the walker but cannot be read.
    std::os::unix::fs::symlink(root.join("gone.txt"), root.join("dangling.txt")).unwrap();

    let keys = Arc::new(Mutex::new(Vec::new()));
    let store = recording_store(keys.clone());
    let config = test_config(vec![root.clone()]);

    let summary = pipeline::run(&config, &store)
        .await
        .expect("Read failure must not fail the run");

    assert_eq!(summary.uploaded, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        keys.lock().unwrap().clone(),
        vec![root.join("ok.txt").to_string_lossy().into_owned()],
        "the unreadable file must never be sent to the store"
    );
}

#[tokio::test]
async fn run_terminates_when_every_root_fails() {
    let store = MockObjectStore::new();
    let config = test_config(vec![
        PathBuf::from("/no/such/root/one"),
        PathBuf::from("/no/such/root/two"),
    ]);

    let summary = pipeline::run(&config, &store)
        .await
        .expect("Sweep should still complete");

    assert_eq!(summary.uploaded, 0);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 0);
}

#[tokio::test]
async fn empty_required_field_is_fatal_before_any_upload() {
    let store = MockObjectStore::new();
    let mut config = test_config(vec![PathBuf::from(".")]);
    config.secret = String::new();

    let err = pipeline::run(&config, &store)
        .await
        .expect_err("Empty secret must abort the run");
    assert!(err.contains("secret"), "error should name the field: {err}");
}

#[tokio::test]
async fn empty_root_list_is_fatal() {
    let store = MockObjectStore::new();
    let config = test_config(Vec::new());

    let err = pipeline::run(&config, &store)
        .await
        .expect_err("Empty root list must abort the run");
    assert!(err.contains("root"), "error should mention roots: {err}");
}

#[tokio::test]
async fn zero_byte_files_upload_fine() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    File::create(root.join("empty.txt")).unwrap();

    let keys = Arc::new(Mutex::new(Vec::new()));
    let store = recording_store(keys.clone());
    let config = test_config(vec![root]);

    let summary = pipeline::run(&config, &store)
        .await
        .expect("Sweep should succeed");
    assert_eq!(summary.uploaded, 1);
}
