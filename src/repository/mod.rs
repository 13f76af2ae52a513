//! Create, read, list, update and delete for each record type.
//!
//! Every write runs in its own transaction. Returning early with an error
//! drops the transaction, which rolls it back.

pub mod bios;
pub mod events;
pub mod sessions;
pub mod speakers;

pub use bios::BioAttributes;
pub use events::EventAttributes;
pub use sessions::SessionAttributes;
pub use speakers::SpeakerAttributes;

use crate::error::{ModelError, Result};

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ModelError::missing(field))
}
