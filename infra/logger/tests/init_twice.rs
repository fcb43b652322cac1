use vars_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_init_reports_installed_subscriber() {
    let _logger = Logger::builder()
        .name("vars-init-twice")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");

    let err = Logger::builder()
        .name("vars-init-twice-second")
        .level(LevelFilter::DEBUG)
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }), "unexpected error: {err}");
    assert!(err.to_string().starts_with("Tracing subscriber error"));
}
