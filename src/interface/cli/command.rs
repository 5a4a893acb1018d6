//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::domain::review::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "prlens")]
#[command(about = "Local-model code review for GitHub pull requests")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the review HTTP service
    Serve {
        /// Listen address (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Review a single pull request and print the result
    Review {
        /// GitHub PR URL
        url: String,

        /// Model identifier (overrides defaults.model / MODEL)
        #[arg(long)]
        model: Option<String>,

        /// Print the structured review as JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },
    /// Show effective merged config and model command availability
    Config,
}

#[derive(Debug)]
pub enum CliAction {
    Serve { bind: Option<String> },
    InspectConfig,
    Review(RunOptions),
}

impl CliAction {
    /// 기본 로그 수준. 서버는 info, 단발 명령은 warn.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            CliAction::Serve { .. } => "info",
            CliAction::InspectConfig | CliAction::Review(_) => "warn",
        }
    }
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Commands::Serve { bind } => CliAction::Serve { bind },
            Commands::Config => CliAction::InspectConfig,
            Commands::Review { url, model, json } => {
                CliAction::Review(RunOptions { url, model, json })
            }
        }
    }
}
