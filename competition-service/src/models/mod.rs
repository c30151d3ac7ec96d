pub mod entry;

pub use entry::{
    field_errors, CompetitionEntry, CompetitionEntryForm, EntryRecord, FieldError,
    ENTRY_COLLECTION, TERMS_REQUIRED_MESSAGE,
};
