use clap::Parser;
use log::LevelFilter;

use agent_readiness::app::App;
use agent_readiness::cli::Cli;
use agent_readiness::llm::{LlmConfig, LlmProvider};

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_target(false)
        .format_timestamp(None)
        .init();

    // Environment first, then CLI overrides
    let provider = match cli.llm.provider.as_deref().map(str::parse::<LlmProvider>) {
        Some(Ok(provider)) => Some(provider),
        Some(Err(err)) => {
            log::error!("{}", err);
            std::process::exit(2);
        }
        None => None,
    };
    let llm_config = LlmConfig::from_env().with_overrides(
        provider,
        cli.llm.model.clone(),
        cli.llm.opencode_backend.clone(),
    );

    let app = App::new(llm_config);
    if let Err(err) = app.run(cli.command) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
