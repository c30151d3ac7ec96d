//! Persistence layer for competition entries.

mod database;
pub mod gateway;
mod store;

pub use database::EntryDb;
pub use gateway::{DiagnosticReport, EntryGateway};
pub use store::{EntryStore, MemoryEntryStore};
