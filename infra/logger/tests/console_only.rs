use vars_logger::{LevelFilter, Logger};

#[test]
fn console_logger_writes_to_stderr_without_file_guard() {
    let logger = Logger::builder()
        .name("vars-console-only")
        .console(true)
        .level(LevelFilter::WARN)
        .env_filter("vars_store=debug")
        .init()
        .expect("logger should initialize");

    tracing::warn!(namespace = "api", "Console logging active");
    assert!(logger.guard().is_none(), "console-only logger should not create a file guard");
}
