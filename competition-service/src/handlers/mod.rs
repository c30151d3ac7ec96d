//! HTTP handlers for competition-service.

pub mod diagnostics;
pub mod entry;
pub mod health;
pub mod metrics;
pub mod root;

pub use diagnostics::test_database;
pub use entry::{entries_count, submit_entry};
pub use health::health_check;
pub use root::{hello, read_root};
