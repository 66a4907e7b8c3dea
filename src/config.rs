use crate::cli::command::Cli;
use crate::errors::AppError;
use crate::storage::StorageMedium;
use dotenv::dotenv;
use std::path::PathBuf;

pub const DEFAULT_CONTACT_FILE: &str = "contactbook.json";

/// Settings resolved from flags, the environment and an optional `.env` file.
#[derive(Debug, Clone)]
pub struct Config {
    pub file: PathBuf,
    pub medium: StorageMedium,
}

/// Loads `.env` into the process environment. Variables that are already set win.
pub fn load_env() {
    dotenv().ok();
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        Ok(Self {
            file: cli.file.clone(),
            medium: cli.storage_choice.parse()?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_CONTACT_FILE),
            medium: StorageMedium::Json,
        }
    }
}
