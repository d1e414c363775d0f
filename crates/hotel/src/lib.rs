//! The Knowledge Store: hotel, room, upgrade, and reservation lookups
//! behind the [`HotelDirectory`] seam, with a deterministic in-memory
//! dataset as the shipped implementation.

pub mod directory;
pub mod mock;

pub use directory::{HotelDirectory, NameLookup, NameSuggestion};
pub use mock::MockDirectory;
