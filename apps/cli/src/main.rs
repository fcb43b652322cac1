use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use vars_cli::{Cli, CliConfig, StoreOpener, exit, load_config};
use vars_logger::{LevelFilter, Logger};

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(exit::SUCCESS),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(exit::for_error(&err))
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = load_config(cli.config.as_deref()).context("Configuration is malformed")?;
    let _log = init_logger(&cli, &cfg)?;

    let opener = StoreOpener::new(cli.state_root.or(cfg.state_root));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli.command.run(&opener, &mut out)?;
    out.flush().context("Flushing output")?;

    Ok(())
}

fn init_logger(cli: &Cli, cfg: &CliConfig) -> anyhow::Result<Logger> {
    let level = match cli.level_override() {
        Some(level) => level,
        None => cfg.log.level_filter()?.unwrap_or(LevelFilter::WARN),
    };

    let builder = Logger::builder().name("vars").level(level);
    let logger = match &cfg.log.dir {
        Some(dir) => builder.path(dir).init(),
        None => builder.init(),
    };

    logger.context("Failed to initialize logging")
}
