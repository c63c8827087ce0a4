use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use vconf_logger::{LevelFilter, Logger};

#[test]
#[serial]
fn file_sink_receives_events() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("vconf-file-sink")
        .console(false)
        .path(&log_dir)
        .json()
        .level(LevelFilter::INFO)
        .init()?;
    assert!(logger.has_file_sink());

    tracing::info!(schema = "example", "configuration saved");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("configuration saved"));
    assert!(contents.trim_start().starts_with('{'), "json sink writes objects");

    Ok(())
}
