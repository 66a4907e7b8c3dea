pub mod book;
pub mod contact;
pub mod manager;
pub mod shared;

use crate::errors::AppError;
use crate::storage::ContactStore;

pub use book::{ContactBook, Search, SearchField};
pub use contact::Contact;
pub use manager::ContactManager;
pub use shared::SharedContactManager;
