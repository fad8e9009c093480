use std::{fs, thread::sleep, time::Duration};

use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn writes_log_file_and_keeps_first_subscriber() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("canvas.log");

    vector_canvas::logging::init(true, Some(path.clone()));
    tracing::info!("rendered drawing");

    // A later init must not replace the file subscriber.
    vector_canvas::logging::init(false, None);
    tracing::info!("still logging");

    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("rendered drawing"));
    assert!(contents.contains("still logging"));
}
