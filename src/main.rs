use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use unuse::cli::{Cli, UsageError};
use unuse::core::cancel::CancelToken;
use unuse::infra::{config, io};

fn main() {
    // Diagnostics go to stderr; stdout carries toggled code only.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("unuse: {err:#}");
        let code = if err.is::<UsageError>() { 2 } else { 1 };
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> Result<()> {
    cli.validate()?;

    let cfg = config::load_config()?;
    let runner = cfg.runner(cli.build_with.clone());
    let cancel = CancelToken::new();

    if cli.paths.is_empty() {
        return io::toggle_stdio(&runner, &cancel);
    }
    for path in &cli.paths {
        io::toggle_file(&runner, path, cli.write, &cancel)?;
    }
    Ok(())
}
