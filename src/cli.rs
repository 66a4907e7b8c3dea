pub mod command;
pub mod menu;
pub mod run;

use crate::domain::Contact;

pub use run::run_app;

pub fn display_contact(contact: &Contact) -> String {
    format!(
        "{}: Phone: {}, Email: {}",
        contact.name, contact.phone, contact.email
    )
}

pub fn listing_row(i: usize, contact: &Contact) -> String {
    format!(
        "{i:>3}. {:<20} {:15} {:<30}",
        contact.name, contact.phone, contact.email
    )
}

/// Blank answers mean "keep the current value".
pub fn non_blank(input: String) -> Option<String> {
    if input.trim().is_empty() {
        None
    } else {
        Some(input)
    }
}
