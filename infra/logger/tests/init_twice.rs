use vconf_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_init_is_rejected() {
    let first = Logger::builder()
        .name("vconf-init-twice")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");
    assert!(!first.has_file_sink());

    let err = Logger::builder()
        .name("vconf-init-twice-second")
        .level(LevelFilter::INFO)
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
