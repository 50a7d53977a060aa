//! Tessera demo.
//!
//! An interactive showcase and a story catalog for the Tessera table and
//! input field widgets.

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::info;

mod app;
mod catalog;
mod columns;
mod config;
mod data;
mod error;
mod event;
mod state;
mod ui;

use app::App;
use catalog::{CatalogApp, Story};
use config::{DemoConfig, ThemeArg, DEFAULT_LOG_FILE, DEFAULT_LOG_FILTER};

#[derive(Parser)]
#[command(name = "tessera-demo")]
#[command(about = "Showcase and catalog for the Tessera widgets")]
#[command(version)]
struct Cli {
    /// File receiving log output
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log filter directives (e.g. "tessera=trace")
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive showcase - input fields above a selectable users table (default)
    #[command(alias = "s")]
    Showcase {
        /// JSON file with an array of users
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Color theme
        #[arg(short, long, value_enum, default_value_t = ThemeArg::Light)]
        theme: ThemeArg,

        /// Start the table in its loading state (Ctrl+L toggles)
        #[arg(long)]
        loading: bool,

        /// Show the checkbox column
        #[arg(long, overrides_with = "no_selectable")]
        selectable: bool,

        /// Hide the checkbox column
        #[arg(long, overrides_with = "selectable")]
        no_selectable: bool,
    },

    /// Story catalog - browse each widget configuration on its own
    #[command(alias = "c")]
    Catalog {
        /// Story to open first
        story: Option<String>,

        /// Print the story names and exit
        #[arg(short, long)]
        list: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Write logs to a file to avoid terminal interference
    init_tracing(&cli.log_file, &cli.log_filter);

    let base = DemoConfig {
        log_file: cli.log_file,
        log_filter: cli.log_filter,
        ..DemoConfig::default()
    };
    info!(log_file = %base.log_file.display(), filter = %base.log_filter, "Logging initialized");

    match cli.command {
        None => run_showcase(base)?,
        Some(Commands::Showcase {
            data,
            theme,
            loading,
            selectable: _,
            no_selectable,
        }) => {
            let config = DemoConfig {
                data_path: data,
                theme: theme.into(),
                loading,
                selectable: !no_selectable,
                ..base
            };
            run_showcase(config)?;
        }
        Some(Commands::Catalog { story, list }) => {
            if list {
                catalog::print_story_list();
            } else {
                let story = match story {
                    Some(name) => name.parse::<Story>()?,
                    None => Story::Default,
                };
                run_catalog(story, &base)?;
            }
        }
    }

    Ok(())
}

fn init_tracing(path: &Path, filter: &str) {
    if let Ok(file) = File::create(path) {
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_env_filter(filter)
            .with_ansi(false)
            .init();
    }
}

fn run_showcase(config: DemoConfig) -> Result<(), Box<dyn Error>> {
    let users = match &config.data_path {
        Some(path) => data::load_users(path)?,
        None => data::sample_users(),
    };
    info!(
        users = users.len(),
        theme = ?config.theme,
        selectable = config.selectable,
        "Starting showcase"
    );

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    let mut app = App::new(users, &config);
    let result = app.run(terminal);

    // Restore terminal (exits alternate screen, disables raw mode)
    ratatui::restore();

    info!("Showcase shutdown complete");

    result.map_err(|e| e.into())
}

fn run_catalog(story: Story, config: &DemoConfig) -> Result<(), Box<dyn Error>> {
    info!(story = %story, "Starting catalog");

    let terminal = ratatui::init();

    let mut app = CatalogApp::new(story, config.tick_rate);
    let result = app.run(terminal);

    ratatui::restore();

    info!("Catalog shutdown complete");

    result.map_err(|e| e.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_showcase_flags() {
        let cli = Cli::parse_from([
            "tessera-demo",
            "showcase",
            "--theme",
            "dark",
            "--no-selectable",
            "--log-filter",
            "tessera=trace",
        ]);
        assert_eq!(cli.log_filter, "tessera=trace");
        match cli.command {
            Some(Commands::Showcase {
                theme,
                no_selectable,
                loading,
                ..
            }) => {
                assert_eq!(theme, ThemeArg::Dark);
                assert!(no_selectable);
                assert!(!loading);
            }
            _ => panic!("expected showcase"),
        }
    }

    #[test]
    fn test_selectable_flags_override_each_other() {
        let cli = Cli::parse_from(["tessera-demo", "s", "--no-selectable", "--selectable"]);
        match cli.command {
            Some(Commands::Showcase { no_selectable, .. }) => assert!(!no_selectable),
            _ => panic!("expected showcase"),
        }
    }

    #[test]
    fn test_parse_catalog() {
        let cli = Cli::parse_from(["tessera-demo", "c", "field-password"]);
        assert_eq!(cli.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        match cli.command {
            Some(Commands::Catalog { story, list }) => {
                assert_eq!(story.as_deref(), Some("field-password"));
                assert!(!list);
            }
            _ => panic!("expected catalog"),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_showcase() {
        let cli = Cli::parse_from(["tessera-demo"]);
        assert!(cli.command.is_none());
    }
}
