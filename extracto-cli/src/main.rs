use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use extracto_finance::{StatementSummary, to_ledger_entries, write_movements_csv};
use extracto_ingest::{JsonTableSource, StatementExtractor};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod config;
mod logging;

use config::{Config, LoggingSection};

#[derive(Parser, Debug)]
#[command(name = "extracto", version, about = "Bank statement movement extraction")]
struct Cli {
    /// Config file (default: $EXTRACTO_HOME/config.toml, else ~/.extracto/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract movements from a statement's tables and print the result JSON
    Extract {
        /// JSON file with the tables pulled out of the statement
        #[arg(long)]
        tables: PathBuf,

        /// Bank id to tag the result with (overrides config)
        #[arg(long)]
        bank_id: Option<u32>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the raw tables next to the processed result
    Debug {
        #[arg(long)]
        tables: PathBuf,
    },

    /// Resolve movements against a statement year as ledger entries
    Ledger {
        #[arg(long)]
        tables: PathBuf,

        /// Statement year (default: current year)
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        bank_id: Option<u32>,

        /// Print the movements as CSV instead of ledger JSON
        #[arg(long)]
        csv: bool,
    },

    /// Income/expense totals for a statement
    Summary {
        #[arg(long)]
        tables: PathBuf,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init {
        /// Replace an existing (possibly broken) config file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = config::resolve_config_path(cli.config.as_deref())?;

    match cli.command {
        // must keep working when the config file itself is broken
        Command::Config { command } => {
            logging::init_logging(&LoggingSection::default().filter);
            run_config_command(command, &config_path)
        }
        command => {
            let cfg = config::load_config(&config_path)?;
            logging::init_logging(&cfg.logging.filter);
            run(command, &cfg, &config_path)
        }
    }
}

fn run(command: Command, cfg: &Config, config_path: &Path) -> Result<()> {
    match command {
        Command::Extract { tables, bank_id, compact } => {
            let extractor = extractor(&tables)?;
            let envelope = extractor.extract_envelope(bank_id.unwrap_or(cfg.extract.bank_id));
            print_json(&envelope, cfg.output.pretty && !compact)?;
        }

        Command::Debug { tables } => {
            let debug = extractor(&tables)?
                .extract_debug()
                .with_context(|| format!("reading tables from {}", tables.display()))?;
            print_json(&debug, cfg.output.pretty)?;
        }

        Command::Ledger { tables, year, bank_id, csv } => {
            let result = extractor(&tables)?.extract_movements();
            if !result.success {
                print_json(&result, cfg.output.pretty)?;
                return Ok(());
            }

            if csv {
                write_movements_csv(&result.movements, std::io::stdout().lock())?;
            } else {
                let year = year.unwrap_or_else(|| chrono::Local::now().year());
                let bank_id = bank_id.unwrap_or(cfg.extract.bank_id);
                let entries = to_ledger_entries(&result.movements, year, bank_id);
                print_json(&entries, cfg.output.pretty)?;
            }
        }

        Command::Summary { tables } => {
            let result = extractor(&tables)?.extract_movements();
            if !result.success {
                print_json(&result, cfg.output.pretty)?;
                return Ok(());
            }
            print_json(&StatementSummary::from_records(&result.movements), cfg.output.pretty)?;
        }

        Command::Config { command } => run_config_command(command, config_path)?,
    }

    Ok(())
}

fn run_config_command(command: ConfigCommand, path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Init { force } => {
            if config::init_config(path, force)? {
                println!("Wrote {}", path.display());
            } else {
                println!("Config already exists: {} (pass --force to replace it)", path.display());
            }
        }
        ConfigCommand::Show => {
            let cfg = config::load_config(path).with_context(|| {
                format!("run `extracto config init --force` to replace {}", path.display())
            })?;
            print!("{}", render_config(&cfg)?);
        }
    }
    Ok(())
}

fn extractor(tables: &Path) -> Result<StatementExtractor<JsonTableSource>> {
    StatementExtractor::new(JsonTableSource::new(tables)).context("compile cleaning patterns")
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{s}");
    Ok(())
}

fn render_config(cfg: &Config) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_args() {
        let cli = Cli::parse_from(["extracto", "extract", "--tables", "t.json", "--bank-id", "2", "--compact"]);
        match cli.command {
            Command::Extract { tables, bank_id, compact } => {
                assert_eq!(tables, PathBuf::from("t.json"));
                assert_eq!(bank_id, Some(2));
                assert!(compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["extracto", "config", "show", "--config", "/tmp/x.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
    }

    #[test]
    fn test_parse_config_init_force() {
        let cli = Cli::parse_from(["extracto", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Command::Config { command: ConfigCommand::Init { force: true } }
        ));
    }

    #[test]
    fn test_init_command_replaces_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(run_config_command(ConfigCommand::Show, &path).is_err());
        run_config_command(ConfigCommand::Init { force: true }, &path).unwrap();
        run_config_command(ConfigCommand::Show, &path).unwrap();
    }

    #[test]
    fn test_render_config_has_sections() {
        let s = render_config(&Config::default()).unwrap();
        assert!(s.contains("[extract]"));
        assert!(s.contains("bank_id = 1"));
    }
}
