#![forbid(unsafe_code)]

//! Command dispatch
//!
//! Each command builds a fresh [`ColleagueService`], runs at most one store
//! transaction, and writes its result to the given writer. Every failure is
//! returned as a [`CommandError`] for `main` to print.

use super::args::{Cli, Command};
use super::watch::{WatchOutcome, watch};
use crate::config::{ColorOption, Config, ConfigError, OutputFormat};
use crate::output::{HumanFormatter, JsonlFormatter, Style};
use crate::service::{ColleagueService, ServiceError};
use crate::storage::{Store, StoreError};
use crate::types::{Colleague, ColleagueList};
use chrono::{Local, Utc};
use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Errors surfaced at the command boundary
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("{} not found, run 'teamtime init'", path.display())]
    NotInitialized { path: PathBuf },

    #[error("teamtime is already initialised in {}", path.display())]
    AlreadyInitialized { path: PathBuf },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start watch mode: {0}")]
    Runtime(#[source] io::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Everything a command needs, resolved once per invocation
struct Context {
    service: ColleagueService,
    config: Config,
    style: Style,
}

/// Runs a parsed command against the store under `home_dir`
pub fn run<W: Write>(cli: Cli, home_dir: &Path, out: &mut W) -> Result<(), CommandError> {
    let store = Store::new(home_dir)?;
    let initialising = matches!(cli.command, Command::Init);

    if !initialising && !store.exists() {
        return Err(CommandError::NotInitialized {
            path: store.display_path(),
        });
    }

    // `init` must work even if a broken config.toml is already in place
    let config = if initialising {
        Config::default()
    } else {
        Config::load(&Config::path_in(home_dir))?
    };

    let color: ColorOption = cli.color.map(Into::into).unwrap_or(config.output.color);
    let style = Style::new(color.color_enabled());

    let ctx = Context {
        service: ColleagueService::new(store),
        config,
        style,
    };

    match cli.command {
        Command::Init => init(ctx.service.store(), &ctx.style, out),
        Command::Add {
            name,
            city,
            timezone,
        } => {
            let added = ctx.service.add_colleague(&name, &city, &timezone)?;
            writeln!(
                out,
                "{} was added",
                ctx.style.green().render(added.name())
            )?;
            Ok(())
        }
        Command::Remove { position } => {
            let removed = ctx.service.remove_colleague(position)?;
            writeln!(
                out,
                "{} was removed",
                ctx.style.green().render(removed.name())
            )?;
            Ok(())
        }
        Command::List { format } => list(&ctx, format.map(Into::into), out),
        Command::Check {
            query,
            watch,
            interval,
            format,
        } => {
            if watch {
                let minutes = interval.unwrap_or(ctx.config.watch.interval_minutes);
                check_watch(&ctx, &query, minutes, out)
            } else {
                check_once(&ctx, &query, format.map(Into::into), out)
            }
        }
    }
}

fn init<W: Write>(store: &Store, style: &Style, out: &mut W) -> Result<(), CommandError> {
    store.ensure_folder()?;
    if store.exists() {
        return Err(CommandError::AlreadyInitialized {
            path: store.display_path(),
        });
    }

    store.save(&ColleagueList::new())?;
    writeln!(
        out,
        "Initialised teamtime in {}",
        style.cyan().render(&store.display_path().display().to_string())
    )?;
    Ok(())
}

fn list<W: Write>(
    ctx: &Context,
    format: Option<OutputFormat>,
    out: &mut W,
) -> Result<(), CommandError> {
    let rows = with_positions(ctx.service.all_colleagues()?);
    let now = Utc::now();

    let rendered = match format.unwrap_or(ctx.config.output.format) {
        OutputFormat::Human => HumanFormatter::new(ctx.style.clone()).list_table(&rows, now),
        OutputFormat::Jsonl => JsonlFormatter::new().format(&rows, now),
    };
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

fn check_once<W: Write>(
    ctx: &Context,
    query: &str,
    format: Option<OutputFormat>,
    out: &mut W,
) -> Result<(), CommandError> {
    let rows = query_rows(&ctx.service, query)?;
    let now = Utc::now();

    let rendered = match format.unwrap_or(ctx.config.output.format) {
        OutputFormat::Human => {
            let formatter = HumanFormatter::new(ctx.style.clone());
            if rows.is_empty() {
                formatter.empty_message(query)
            } else {
                formatter.check_table(&rows, now)
            }
        }
        OutputFormat::Jsonl => JsonlFormatter::new().format(&rows, now),
    };
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

fn check_watch<W: Write>(
    ctx: &Context,
    query: &str,
    minutes: u64,
    out: &mut W,
) -> Result<(), CommandError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CommandError::Runtime)?;
    runtime.block_on(watch_frames(ctx, query, minutes, interrupted(), out))
}

/// Redraws the `check` output every `minutes` until `cancel` resolves
///
/// Each frame clears the screen and is written in a single call. On
/// cancellation the screen is cleared once more and a notice is printed.
async fn watch_frames<W, C>(
    ctx: &Context,
    query: &str,
    minutes: u64,
    cancel: C,
    out: &mut W,
) -> Result<(), CommandError>
where
    W: Write,
    C: Future<Output = ()>,
{
    let formatter = HumanFormatter::new(ctx.style.clone());
    let period = Duration::from_secs(minutes.saturating_mul(60));

    debug!(query, minutes, "entering watch mode");
    let outcome = watch(period, cancel, || -> Result<(), CommandError> {
        let rows = query_rows(&ctx.service, query)?;

        let mut frame = String::from(CLEAR_SCREEN);
        frame.push_str(&formatter.watch_header(minutes));
        if rows.is_empty() {
            frame.push_str(&formatter.empty_message(query));
        } else {
            frame.push_str(&formatter.check_table(&rows, Utc::now()));
        }
        frame.push_str(&formatter.last_updated(Local::now().time()));

        out.write_all(frame.as_bytes())?;
        out.flush()?;
        Ok(())
    })
    .await?;

    let WatchOutcome::Cancelled { passes } = outcome;
    debug!(passes, "left watch mode");
    write!(out, "{}{}", CLEAR_SCREEN, formatter.watch_cancelled())?;
    out.flush()?;
    Ok(())
}

/// Resolves on Ctrl+C
///
/// If the handler cannot be installed this never resolves, leaving the
/// default signal disposition to end the process.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

fn query_rows(
    service: &ColleagueService,
    query: &str,
) -> Result<Vec<(usize, Colleague)>, ServiceError> {
    if query == "all" {
        Ok(with_positions(service.all_colleagues()?))
    } else {
        service.find_positioned(query)
    }
}

fn with_positions(colleagues: Vec<Colleague>) -> Vec<(usize, Colleague)> {
    colleagues
        .into_iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c))
        .collect()
}
