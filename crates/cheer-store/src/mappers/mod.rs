//! Record ↔ entity mappers

mod reaction;

pub use reaction::{decode_records, DecodedRecords};
