//! Radical-based kanji lookup.
//!
//! The dictionary is imported once from a RADKFILE, a KRADFILE and KANJIDIC2 into a cache
//! directory, and loaded from there afterwards. See [`KanjiDictionary`] for the queries.

pub mod cache;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod import;
pub mod lookup;
pub mod radicals;
pub mod record;
pub mod store;

pub use config::{Config, Sources, CACHE_VERSION};
pub use dictionary::{load_dictionaries, KanjiDictionary};
pub use error::{Error, Result};
pub use lookup::is_regular_kanji;
pub use radicals::Radical;
pub use record::KanjiRecord;
