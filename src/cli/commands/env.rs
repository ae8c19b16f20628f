//! Env command implementation
//!
//! Implements `embra env`: view, set, unset, and reset variables in the
//! environment file kept in the config directory.

use anyhow::Result;

use crate::cli::output;
use crate::core::env::{self, KeyOutcome};
use crate::error::EnvError;
use crate::infra::dirs::EmbraDirs;

use super::EnvCommands;

/// Execute the env command
pub fn execute(command: Option<EnvCommands>) -> Result<()> {
    let dirs = EmbraDirs::new();
    let path = dirs.env_file_path();

    match command {
        None => {
            for (key, value) in env::load(&path)? {
                println!("{key}={value}");
            }
        }
        Some(EnvCommands::Reset) => {
            print!("resetting embra environment ... ");
            env::reset(&path, &dirs.data_dir())?;
            println!("{}", output::status::SUCCESS);
        }
        Some(EnvCommands::Unset { keys }) => {
            if keys.is_empty() {
                return Err(EnvError::NoKeys.into());
            }
            let mut values = env::load(&path)?;
            let mut changed = false;
            for key in &keys {
                match env::unset_key(&mut values, key) {
                    KeyOutcome::Changed => {
                        println!("{key} variable removed");
                        changed = true;
                    }
                    KeyOutcome::ReadOnly => {
                        eprintln!("{key} => env cannot be edited and is read only");
                    }
                    KeyOutcome::Missing => {
                        eprintln!("{key} => no such environment variable found");
                    }
                }
            }
            if changed {
                env::save(&path, &values)?;
            }
        }
        Some(EnvCommands::Set { entries }) => {
            let pattern = env::assignment_pattern();
            let mut values = env::load(&path)?;
            let mut changed = false;
            for entry in &entries {
                if !pattern.is_match(entry) {
                    eprintln!("{entry} => expected KEY=VALUE");
                    continue;
                }
                // The pattern guarantees exactly one '='
                let Some((key, value)) = entry.split_once('=') else {
                    continue;
                };
                match env::set_key(&mut values, key, value) {
                    KeyOutcome::Changed => {
                        println!("{key}={value} environment variable added/updated");
                        changed = true;
                    }
                    KeyOutcome::ReadOnly => {
                        eprintln!("{key} => env cannot be edited and is read only");
                    }
                    KeyOutcome::Missing => {}
                }
            }
            if changed {
                env::save(&path, &values)?;
            }
        }
        Some(EnvCommands::Get { keys }) => {
            let values = env::load(&path)?;
            for key in &keys {
                match values.get(key) {
                    Some(value) => println!("{key}={value}"),
                    None => eprintln!("{key} => no such environment key found"),
                }
            }
        }
    }

    Ok(())
}
