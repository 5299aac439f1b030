//!  Persistence of the tracker is organized through [key_value::KeyValueStore].
//!  The basic idea is:
//!   - There is a directory acting as a key-value store, one file per key.
//!   - All records live in a single JSON blob under [records::RECORDS_KEY].
//!   - Anything that can't be read back is treated as no data at all.

pub mod entities;
pub mod key_value;
pub mod records;
