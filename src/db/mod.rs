//! SQLite entry store: the reference collaborator that supplies window-filtered
//! entries to the aggregators and persists analyzed journal entries.

mod connection;
mod helpers;
mod migrations;
mod repositories;

pub use connection::Database;
pub use repositories::journals::{JournalPage, JournalQuery, Pagination};
