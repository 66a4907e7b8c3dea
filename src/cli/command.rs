use crate::config::DEFAULT_CONTACT_FILE;
use crate::domain::SearchField;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contactbook", version, about = "Terminal contact book")]
pub struct Cli {
    /// JSON file the contact book is kept in
    #[arg(long, env = "CONTACTBOOK_FILE", default_value = DEFAULT_CONTACT_FILE)]
    pub file: PathBuf,

    /// Storage choice (json, mem) are available
    #[arg(long = "storage", env = "STORAGE_CHOICE", default_value_t = String::from("json"))]
    pub storage_choice: String,

    /// Run a single command; without one the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Contact email address
        #[arg(long)]
        email: String,
    },
    /// Change the phone number and/or email of an existing contact
    Update {
        /// Name of the contact to update
        #[arg(long)]
        name: String,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a contact by name
    Delete {
        /// Name of contact to delete
        #[arg(long)]
        name: String,
    },
    /// Case-insensitive search for contacts containing QUERY
    Search {
        query: String,

        /// Field to search in (default is name)
        #[arg(long, value_enum, default_value_t = SearchKey::Name)]
        by: SearchKey,
    },
    /// List all contacts
    List,

    /// Import contacts from .csv file
    Import {
        /// File path to the source .csv file
        #[arg(short, long)]
        src: Option<String>,
    },

    /// Export contacts to a .csv file
    Export {
        /// File path to the destination location for export file
        #[arg(short, long)]
        des: Option<String>,
    },
}

/// Supported search keys
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchKey {
    Name,
    Phone,
    Email,
    All,
}

impl From<SearchKey> for SearchField {
    fn from(key: SearchKey) -> Self {
        match key {
            SearchKey::Name => SearchField::Name,
            SearchKey::Phone => SearchField::Phone,
            SearchKey::Email => SearchField::Email,
            SearchKey::All => SearchField::All,
        }
    }
}
