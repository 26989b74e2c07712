//! Remote task service clients

pub mod todoist;

pub use todoist::{REQUEST_ID_HEADER, TodoistClient};
