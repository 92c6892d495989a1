//! Command-line interface
//!
//! 命令行入口：解析参数、装配依赖并分发到各个命令。

mod commands;
mod history_edit;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::bootstrap::{self, Overrides};

#[derive(Debug, Parser)]
#[command(name = "clipnote", version, about = "Clipboard history and notes")]
pub struct Cli {
    /// Data root (overrides `[storage] data_dir` and the platform directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to `<data root>/config.toml`)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the remote notes mirror (overrides `[remote] url`)
    #[arg(long, global = true, value_name = "URL")]
    pub remote: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record clipboard text into the history until Ctrl+C
    Watch,
    /// Inspect and edit the clipboard history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Manage pinned items
    Pin {
        #[command(subcommand)]
        action: PinAction,
    },
    /// Read and write notes (remote mirror first when configured)
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },
    /// Serve the local notes directory over HTTP
    Serve {
        /// Port to listen on (defaults to `[server] port`)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved configuration and paths
    Config {
        /// Switch the saved theme between light and dark
        #[arg(long)]
        toggle_theme: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List entries, oldest first
    List,
    /// Remove an entry
    Remove { text: String },
    /// Replace an entry in place
    Replace { old: String, new: String },
    /// Copy an entry back to the system clipboard
    Copy { text: String },
    /// Remove every entry
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum PinAction {
    Add { text: String },
    Remove { text: String },
    List,
}

#[derive(Debug, Subcommand)]
pub enum NotesAction {
    List,
    Read {
        title: String,
    },
    /// Create or overwrite a note; content is read from stdin when omitted
    Write {
        title: String,
        content: Option<String>,
    },
    Delete {
        title: String,
    },
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.data_dir.clone(),
            config_path: self.config.clone(),
            remote_url: self.remote.clone(),
        }
    }
}

/// Resolve settings, start logging, wire services and run the command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = bootstrap::resolve_settings(&cli.overrides())?;

    if let Err(e) = bootstrap::init_tracing_subscriber(Some(&settings.paths.logs_dir)) {
        eprintln!("Failed to initialize tracing: {e}");
    }

    let ctx = bootstrap::wire_dependencies(settings).await?;

    match cli.command {
        Command::Watch => commands::watch(&ctx).await,
        Command::History { action } => commands::history(&ctx, action).await,
        Command::Pin { action } => commands::pin(&ctx, action).await,
        Command::Notes { action } => commands::notes(&ctx, action).await,
        Command::Serve { port } => commands::serve(&ctx, port).await,
        Command::Config { toggle_theme: true } => commands::toggle_theme(&ctx),
        Command::Config {
            toggle_theme: false,
        } => {
            commands::print_config(&ctx);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "clipnote",
            "notes",
            "list",
            "--remote",
            "http://localhost:5000",
            "--data-dir",
            "/tmp/cn",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.remote_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(overrides.data_dir, Some(PathBuf::from("/tmp/cn")));
        assert!(matches!(
            cli.command,
            Command::Notes {
                action: NotesAction::List
            }
        ));
    }

    #[test]
    fn history_replace_takes_two_values() {
        let cli = Cli::try_parse_from(["clipnote", "history", "replace", "old", "new"]).unwrap();

        match cli.command {
            Command::History {
                action: HistoryAction::Replace { old, new },
            } => {
                assert_eq!(old, "old");
                assert_eq!(new, "new");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn notes_write_content_is_optional() {
        let cli = Cli::try_parse_from(["clipnote", "notes", "write", "todo"]).unwrap();

        assert!(matches!(
            cli.command,
            Command::Notes {
                action: NotesAction::Write { content: None, .. }
            }
        ));
    }

    #[test]
    fn serve_port_flag() {
        let cli = Cli::try_parse_from(["clipnote", "serve", "--port", "8080"]).unwrap();

        assert!(matches!(cli.command, Command::Serve { port: Some(8080) }));
    }

    #[test]
    fn config_toggle_theme_flag() {
        let plain = Cli::try_parse_from(["clipnote", "config"]).unwrap();
        let toggle = Cli::try_parse_from(["clipnote", "config", "--toggle-theme"]).unwrap();

        assert!(matches!(plain.command, Command::Config { toggle_theme: false }));
        assert!(matches!(toggle.command, Command::Config { toggle_theme: true }));
    }
}
