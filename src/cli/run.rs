use super::{listing_row, menu::Menu};
use crate::{
    config::{self, Config},
    domain::ContactManager,
    errors::AppError,
    prelude::command::{Cli, Commands},
    storage,
};
use clap::Parser;
use log::info;
use std::io::{self, Write};

pub fn run_app() -> Result<(), AppError> {
    config::load_env();
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    info!(
        "using {} storage at {}",
        config.medium.is_which(),
        config.file.display()
    );

    let mut manager = ContactManager::open(storage::parse_storage_type(&config));
    let stdout = io::stdout();

    match cli.command {
        Some(command) => execute(&mut manager, command, &mut stdout.lock()),
        None => {
            println!("Welcome to Contact Manager!");
            let stdin = io::stdin();
            Menu::new(stdin.lock(), stdout.lock()).run(&mut manager)?;
            manager.close()
        }
    }
}

/// Runs one subcommand against `manager`, writing results to `out`.
pub fn execute<W: Write>(
    manager: &mut ContactManager,
    command: Commands,
    out: &mut W,
) -> Result<(), AppError> {
    match command {
        Commands::Add { name, phone, email } => {
            manager.add_contact(&name, &phone, &email)?;
            writeln!(out, "Contact added successfully")?;
        }

        Commands::Update { name, phone, email } => {
            if phone.is_none() && email.is_none() {
                return Err(AppError::Validation(
                    "Provide --phone and/or --email to update".to_string(),
                ));
            }
            manager.update_contact(&name, phone.as_deref(), email.as_deref())?;
            writeln!(out, "Contact updated successfully")?;
        }

        Commands::Delete { name } => {
            manager.delete_contact(&name)?;
            writeln!(out, "Contact deleted successfully")?;
        }

        Commands::Search { query, by } => {
            let mut found = 0;
            for (i, contact) in manager.search(&query, by.into()).enumerate() {
                writeln!(out, "{}", listing_row(i + 1, contact))?;
                found += 1;
            }

            if found == 0 {
                writeln!(out, "No matching contacts found.")?;
            }
        }

        Commands::List => {
            if manager.book().is_empty() {
                writeln!(out, "No contact yet")?;
                return Ok(());
            }

            for (i, contact) in manager.list().enumerate() {
                writeln!(out, "{}", listing_row(i + 1, contact))?;
            }
        }

        // Import contacts into storage from .csv file
        Commands::Import { src } => {
            let (imported, skipped) = manager.import_contacts_from_csv(src.as_deref())?;
            writeln!(
                out,
                "Successfully imported {} contacts ({} skipped).",
                imported, skipped
            )?;
        }

        Commands::Export { des } => {
            let (path, total) = manager.export_contacts_to_csv(des.as_deref())?;
            writeln!(out, "Successfully exported {} contacts to {:?}.", total, path)?;
        }
    }

    Ok(())
}
