use anyhow::Context;
use clap::Parser;
use pocketcalc::shell::{Outcome, Session};
use pocketcalc::{CalculatorBuilder, Config};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pocketcalc")]
#[command(version, about = "Keyboard-driven calculator with memory and history")]
struct Cli {
    /// Config file (default: pocketcalc/config.toml in the platform config directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print each display refresh as a JSON object
    #[arg(long)]
    json: bool,

    /// Rows of history shown after each line
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Presses to run once, e.g. `12 + 5 =` or `9 sqrt`
    #[arg(value_name = "INPUT", trailing_var_arg = true, allow_hyphen_values = true)]
    input: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(rows) = cli.rows {
        config.display.history_rows = rows;
    }

    let calculator = CalculatorBuilder::new()
        .config(config.clone())
        .build()
        .context("Failed to set up calculator")?;
    let mut session = Session::from_config(calculator, &config, cli.json);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.input.is_empty() {
        if let Outcome::Output(text) = session.handle_line(&cli.input.join(" "))? {
            writeln!(out, "{text}")?;
        }
        return Ok(());
    }

    writeln!(out, "{}", session.render()?)?;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read input")?;
        match session.handle_line(&line)? {
            Outcome::Output(text) => writeln!(out, "{text}")?,
            Outcome::Quit => break,
        }
        out.flush()?;
    }

    let history = session.calculator().history();
    tracing::info!(
        entries = history.len(),
        span = ?history.span(),
        "session ended"
    );

    Ok(())
}
