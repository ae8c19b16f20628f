//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;
pub mod env;
pub mod run;

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build targets
    Build {
        /// Target names (default target when omitted)
        targets: Vec<String>,

        /// Build every declared target
        #[arg(long)]
        all: bool,
    },

    /// Clean target build directories
    Clean {
        /// Target names (default target when omitted)
        targets: Vec<String>,

        /// Clean every declared target
        #[arg(long)]
        all: bool,

        /// Remove the whole working directory instead of a tool-driven clean
        #[arg(long)]
        hard: bool,
    },

    /// Build a target if needed, then execute its binary
    Run {
        /// Target name (default target when omitted)
        target: Option<String>,

        /// Argument string passed to the binary, split on whitespace
        #[arg(long)]
        args: Option<String>,
    },

    /// Manage the embra environment file
    Env {
        #[command(subcommand)]
        command: Option<EnvCommands>,
    },
}

/// Environment file subcommands
#[derive(Subcommand, Debug)]
pub enum EnvCommands {
    /// Rewrite the environment file with its seed values
    Reset,

    /// Remove variables
    Unset {
        /// Variable names to remove
        keys: Vec<String>,
    },

    /// Add or update variables (KEY=VALUE)
    Set {
        /// KEY=VALUE entries
        entries: Vec<String>,
    },

    /// Print variables
    Get {
        /// Variable names to print
        keys: Vec<String>,
    },
}

impl Commands {
    /// Dispatch to the command implementation
    pub async fn run(self, project_dir: &Path) -> Result<()> {
        match self {
            Self::Build { targets, all } => {
                build::execute(project_dir, build::BuildOptions { targets, all }).await
            }
            Self::Clean { targets, all, hard } => {
                clean::execute(
                    project_dir,
                    clean::CleanOptions { targets, all, hard },
                )
                .await
            }
            Self::Run { target, args } => {
                run::execute(project_dir, run::RunOptions { target, args }).await
            }
            Self::Env { command } => env::execute(command),
        }
    }
}
