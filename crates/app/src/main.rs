//! flagdraw - draw a country's flag from memory and see how close you got
//!
//! Command line front end over the drawing surface, scorer and game
//! session. Log verbosity follows `RUST_LOG` (default `info`).

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use flagdraw_config::FlagdrawConfig;
use flagdraw_game::{DatasetError, GameSession, SessionError, fetch_dataset, load_dataset};
use flagdraw_ipc::{IpcError, to_json};
use flagdraw_scoring::{AccuracyScorer, FetchError, HttpFetcher, ImageSource, ScoringError};
use painting::DrawingSurface;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod replay;

use cli::{Cli, Command};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: IpcError,
    },

    #[error(transparent)]
    Ipc(#[from] IpcError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Surface is empty, nothing to export")]
    EmptySurface,
}

fn read(path: &Path) -> Result<Vec<u8>, AppError> {
    std::fs::read(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn read_text(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), AppError> {
    std::fs::write(path, contents).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}

async fn run(command: Command, config: FlagdrawConfig) -> Result<(), AppError> {
    match command {
        Command::Score { drawing, reference } => {
            let scorer = AccuracyScorer::new(config.scoring)?;
            let bytes = read(&drawing)?;
            let comparison = scorer.try_score(ImageSource::Bytes(&bytes), &reference).await?;
            println!("{}", to_json(&comparison.result)?);
        }
        Command::Ratio { reference } => {
            let scorer = AccuracyScorer::new(config.scoring)?;
            println!("{}", scorer.aspect_ratio_of(&reference).await);
        }
        Command::Replay { commands, output } => {
            let script = replay::parse_script(&read_text(&commands)?)?;
            let mut surface = DrawingSurface::with_config(&config);
            for reply in replay::replay(&mut surface, script) {
                println!("{}", to_json(&reply)?);
            }
            if let Some(output) = output {
                let png = surface.export_png().ok_or(AppError::EmptySurface)?;
                write(&output, png)?;
            }
        }
        Command::Play {
            dataset,
            commands,
            round,
            display_width,
        } => {
            let countries = load_dataset(&dataset)?;
            let script = replay::parse_script(&read_text(&commands)?)?;
            let mut game = GameSession::new(countries, AccuracyScorer::new(config.scoring)?);
            let country = match round {
                Some(index) => game.start_round(index)?,
                None => game.random_round()?,
            };
            info!("Draw the flag of {}", country.name);

            let mut surface = DrawingSurface::with_config(&config);
            game.fit_surface(&mut surface, display_width).await?;
            replay::replay(&mut surface, script);

            let record = game.finish_round(&mut surface).await?;
            println!("{}: {}", record.title(), record.accuracy_label());
        }
        Command::FetchDataset { output, url } => {
            let fetcher = HttpFetcher::new(config.scoring.fetch_timeout())?;
            let (json, countries) = fetch_dataset(&fetcher, &url).await?;
            write(&output, json)?;
            println!("{} countries", countries.len());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = FlagdrawConfig::from_env();

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
