//! CLI probe for `themebook_core`.
//!
//! # Responsibility
//! - Verify core crate linkage and database bootstrap outside any server.
//! - Print the theme catalog of a database file for quick local checks.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use themebook_core::db::open_db;
use themebook_core::{default_log_level, init_logging, SqliteThemeRepository, ThemeRepository};

#[derive(Parser, Debug)]
#[command(name = "themebook", about = "Theme catalog and reservation probe", version)]
struct CliArgs {
    #[arg(long, env = "THEMEBOOK_LOG_DIR", value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, env = "THEMEBOOK_LOG_LEVEL", value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core ping and version.
    Ping,
    /// Open (and migrate) a database and list its themes.
    Themes {
        #[arg(long, env = "THEMEBOOK_DB", value_name = "FILE")]
        db: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if let Some(log_dir) = args.log_dir.as_deref() {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(level, log_dir)?;
    }

    match args.command.unwrap_or(Command::Ping) {
        Command::Ping => {
            println!("themebook_core ping={}", themebook_core::ping());
            println!("themebook_core version={}", themebook_core::core_version());
        }
        Command::Themes { db } => {
            let conn = open_db(&db)
                .with_context(|| format!("failed to open database `{}`", db.display()))?;
            let repo = SqliteThemeRepository::try_new(&conn)?;
            for theme in repo.list_themes()? {
                println!(
                    "{}\t{}\t{}\t{}",
                    theme.id.unwrap_or_default(),
                    theme.name,
                    theme.price,
                    theme.description
                );
            }
        }
    }

    Ok(())
}
