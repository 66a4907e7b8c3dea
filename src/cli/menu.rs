//! Interactive read-eval-prompt loop over a [`ContactManager`].
//!
//! Input and output are generic so the loop can be driven by a script in
//! tests the same way it is driven by a terminal.

use super::{display_contact, non_blank};
use crate::domain::{ContactManager, SearchField};
use crate::errors::AppError;
use log::debug;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    AddContact,
    UpdateContact,
    DeleteContact,
    SearchContact,
    ListContacts,
    Exit,
}

impl MenuCommand {
    pub fn parse(choice: &str) -> Result<Self, AppError> {
        match choice.trim() {
            "1" => Ok(MenuCommand::AddContact),
            "2" => Ok(MenuCommand::UpdateContact),
            "3" => Ok(MenuCommand::DeleteContact),
            "4" => Ok(MenuCommand::SearchContact),
            "5" => Ok(MenuCommand::ListContacts),
            "6" => Ok(MenuCommand::Exit),
            other => Err(AppError::ParseCommand(other.to_string())),
        }
    }
}

pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs until the user picks exit or input ends. Store errors are shown
    /// and the menu is offered again; only terminal I/O errors end the loop.
    pub fn run(&mut self, manager: &mut ContactManager) -> Result<(), AppError> {
        loop {
            self.show_menu()?;

            let Some(choice) = self.prompt("Enter your choice (1-6): ")? else {
                break;
            };

            let command = match MenuCommand::parse(&choice) {
                Ok(command) => command,
                Err(_) => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please enter a number between 1-6."
                    )?;
                    continue;
                }
            };
            debug!("menu command {:?}", command);

            let outcome = match command {
                MenuCommand::AddContact => self.add_contact(manager),
                MenuCommand::UpdateContact => self.update_contact(manager),
                MenuCommand::DeleteContact => self.delete_contact(manager),
                MenuCommand::SearchContact => self.search_contact(manager),
                MenuCommand::ListContacts => self.list_contacts(manager),
                MenuCommand::Exit => break,
            };

            match outcome {
                Ok(()) => {}
                Err(AppError::Io(e)) => return Err(AppError::Io(e)),
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<(), AppError> {
        writeln!(self.output)?;
        writeln!(self.output, "Contact Manager Menu:")?;
        writeln!(self.output, "1. Add New Contact")?;
        writeln!(self.output, "2. Update Contact")?;
        writeln!(self.output, "3. Delete Contact")?;
        writeln!(self.output, "4. Search Contact")?;
        writeln!(self.output, "5. View All Contacts")?;
        writeln!(self.output, "6. Exit")?;
        Ok(())
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_or_empty(&mut self, label: &str) -> Result<String, AppError> {
        Ok(self.prompt(label)?.unwrap_or_default())
    }

    fn add_contact(&mut self, manager: &mut ContactManager) -> Result<(), AppError> {
        let name = self.prompt_or_empty("Enter name: ")?;
        let phone = self.prompt_or_empty("Enter phone number: ")?;
        let email = self.prompt_or_empty("Enter email: ")?;

        manager.add_contact(&name, &phone, &email)?;

        writeln!(self.output, "{} saved successfully!", name)?;
        Ok(())
    }

    fn update_contact(&mut self, manager: &mut ContactManager) -> Result<(), AppError> {
        let name = self.prompt_or_empty("Enter name of contact to update: ")?;

        let current = manager
            .get(&name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(name.clone()))?;

        writeln!(self.output, "Leave blank to keep current value")?;
        let phone = non_blank(self.prompt_or_empty(&format!("New phone [{}]: ", current.phone))?);
        let email = non_blank(self.prompt_or_empty(&format!("New email [{}]: ", current.email))?);

        manager.update_contact(&name, phone.as_deref(), email.as_deref())?;

        writeln!(self.output, "{} updated successfully!", current.name)?;
        Ok(())
    }

    fn delete_contact(&mut self, manager: &mut ContactManager) -> Result<(), AppError> {
        let name = self.prompt_or_empty("Enter name of contact to delete: ")?;

        let removed = manager.delete_contact(&name)?;

        writeln!(self.output, "{} deleted successfully!", removed.name)?;
        Ok(())
    }

    fn search_contact(&mut self, manager: &mut ContactManager) -> Result<(), AppError> {
        let query = self.prompt_or_empty("Enter name or part of name to search: ")?;

        let mut results = manager.search(&query, SearchField::Name).peekable();
        if results.peek().is_none() {
            writeln!(self.output, "No matching contacts found.")?;
            return Ok(());
        }

        writeln!(self.output, "\nSearch Results:")?;
        for contact in results {
            writeln!(self.output, "{}", display_contact(contact))?;
        }
        Ok(())
    }

    fn list_contacts(&mut self, manager: &mut ContactManager) -> Result<(), AppError> {
        if manager.book().is_empty() {
            writeln!(self.output, "No contacts found.")?;
            return Ok(());
        }

        writeln!(self.output, "\nAll Contacts:")?;
        for contact in manager.list() {
            writeln!(self.output, "{}", display_contact(contact))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonStorage, MemStorage};

    fn run_script(manager: &mut ContactManager, script: &str) -> Result<String, AppError> {
        let mut output = Vec::new();
        Menu::new(script.as_bytes(), &mut output).run(manager)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    #[test]
    fn parses_menu_choices() -> Result<(), AppError> {
        assert_eq!(MenuCommand::parse("1")?, MenuCommand::AddContact);
        assert_eq!(MenuCommand::parse(" 6 ")?, MenuCommand::Exit);
        assert!(matches!(
            MenuCommand::parse("7"),
            Err(AppError::ParseCommand(_))
        ));
        Ok(())
    }

    #[test]
    fn add_search_and_exit() -> Result<(), AppError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("contactbook.json");
        let mut manager = ContactManager::open(Box::new(JsonStorage::new(&path)));

        let output = run_script(
            &mut manager,
            "1\nAlice\n555-1234\nalice@example.com\n4\nali\n6\n",
        )?;

        assert!(output.contains("Alice saved successfully!"));
        assert!(output.contains("Search Results:"));
        assert!(output.contains("Alice: Phone: 555-1234, Email: alice@example.com"));
        assert!(output.trim_end().ends_with("Goodbye!"));

        let reopened = ContactManager::open(Box::new(JsonStorage::new(&path)));
        assert!(reopened.get("Alice").is_some());
        Ok(())
    }

    #[test]
    fn blank_update_answers_keep_values() -> Result<(), AppError> {
        let mut manager = ContactManager::open(Box::new(MemStorage::default()));
        manager.add_contact("Bob", "111", "bob@x.com")?;

        let output = run_script(&mut manager, "2\nBob\n\nbob@y.com\n6\n")?;

        assert!(output.contains("New phone [111]: "));
        assert!(output.contains("Bob updated successfully!"));
        let bob = manager.get("Bob").unwrap();
        assert_eq!(bob.phone, "111");
        assert_eq!(bob.email, "bob@y.com");
        Ok(())
    }

    #[test]
    fn store_errors_are_shown_and_menu_continues() -> Result<(), AppError> {
        let mut manager = ContactManager::open(Box::new(MemStorage::default()));
        manager.add_contact("Bob", "111", "bob@x.com")?;

        let output = run_script(
            &mut manager,
            "3\nZed\n1\nBob\n222\nb@x.com\n2\nNobody\n9\n5\n",
        )?;

        assert!(output.contains("Error: Contact 'Zed' not found"));
        assert!(output.contains("Error: Contact 'Bob' already exists"));
        assert!(output.contains("Error: Contact 'Nobody' not found"));
        assert!(output.contains("Invalid choice. Please enter a number between 1-6."));
        assert!(output.contains("Bob: Phone: 111, Email: bob@x.com"));
        assert!(output.trim_end().ends_with("Goodbye!"));
        Ok(())
    }

    #[test]
    fn delete_and_empty_listings() -> Result<(), AppError> {
        let mut manager = ContactManager::open(Box::new(MemStorage::default()));
        manager.add_contact("Bob", "111", "bob@x.com")?;

        let output = run_script(&mut manager, "3\nBob\n4\nbob\n5\n6\n")?;

        assert!(output.contains("Bob deleted successfully!"));
        assert!(output.contains("No matching contacts found."));
        assert!(output.contains("No contacts found."));
        assert!(manager.book().is_empty());
        Ok(())
    }
}
