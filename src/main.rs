use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use kbo_standings::{
    Config, CsvSink, KboClient, KboError, OutputMode, SeasonAggregator, Team, FIRST_SEASON,
    LAST_SEASON,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kbo-standings")]
#[command(about = "Crawl a KBO season and write win rate / margin progression tables")]
#[command(version)]
struct Cli {
    /// Season year to crawl; prompted for when omitted
    #[arg(short, long, env = "KBO_YEAR")]
    year: Option<i32>,

    /// Which tables to write: all, date or game
    #[arg(short, long, env = "KBO_MODE", default_value = "all")]
    mode: String,

    /// Root directory for output; tables go to <dir>/<year>/
    #[arg(short, long, env = "KBO_OUTPUT_DIR", default_value = "data")]
    output_dir: PathBuf,

    /// Pause after each page request, in milliseconds
    #[arg(long, env = "KBO_DELAY_MS", default_value = "500")]
    delay_ms: u64,

    /// Restrict the crawl to these team codes (e.g. --team LG --team HH)
    #[arg(short, long = "team")]
    teams: Vec<Team>,
}

impl Cli {
    fn into_config(self, year: i32, mode: OutputMode) -> Config {
        let mut config = Config::new(year);
        config.mode = mode;
        config.output_dir = self.output_dir;
        config.request_delay = Duration::from_millis(self.delay_ms);
        if !self.teams.is_empty() {
            config.teams = self.teams;
        }
        config
    }
}

fn prompt_year() -> io::Result<String> {
    print!("Season year to crawl ({FIRST_SEASON}~{LAST_SEASON}): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn resolve(cli: Cli) -> Result<Config, String> {
    let mode = OutputMode::parse(&cli.mode).map_err(|e| e.to_string())?;
    let year = match cli.year {
        Some(year) => year,
        None => {
            let input = prompt_year().map_err(|e| format!("failed to read year: {e}"))?;
            input
                .parse()
                .map_err(|_| format!("'{input}' is not a season year"))?
        }
    };
    Ok(cli.into_config(year, mode))
}

async fn run(config: Config) -> kbo_standings::Result<()> {
    let client = KboClient::from_config(&config)?;
    let aggregator = SeasonAggregator::new(&client, config.teams.clone(), config.request_delay);
    let mut sink = CsvSink::new(&config.output_dir);

    let written = aggregator
        .generate(config.year, config.mode, &mut sink)
        .await?;
    info!(
        year = config.year,
        tables = written.len(),
        dir = %config.output_dir.join(config.year.to_string()).display(),
        "done"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match resolve(Cli::parse()) {
        Ok(config) => config,
        Err(message) => {
            error!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ KboError::NoGames { .. }) => {
            error!("{e}; nothing written");
            ExitCode::FAILURE
        }
        Err(e) if e.is_config_error() => {
            error!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "crawl failed");
            ExitCode::FAILURE
        }
    }
}
