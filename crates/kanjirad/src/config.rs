//! Runtime configuration for the dictionary.

use std::path::PathBuf;

/// The version stamp written to the cache directory. Bump the store revision whenever the
/// layout of any cache file changes so that old caches get rebuilt.
pub const CACHE_VERSION: &str = concat!("kanjirad ", env!("CARGO_PKG_VERSION"), " store-1");

const CACHE_DIR_NAME: &str = ".kanjirad";

#[derive(Debug, Clone)]
pub struct Config {
    /// Writable directory holding the imported dictionary.
    pub cache_dir: PathBuf,
    /// Source files, only read when the cache needs to be (re)built.
    pub sources: Sources,
    /// Compared against the cache's version stamp.
    pub version: String,
}

#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub radkfile: Option<PathBuf>,
    pub kradfile: Option<PathBuf>,
    pub kanjidic: Option<PathBuf>,
}

impl Config {
    pub fn new(cache_dir: impl Into<PathBuf>, sources: Sources) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            sources,
            version: CACHE_VERSION.to_string(),
        }
    }

    /// `~/.kanjirad`, or `./.kanjirad` if the home directory can't be determined.
    pub fn default_cache_dir() -> PathBuf {
        match dirs::home_dir() {
            Some(home) => home.join(CACHE_DIR_NAME),
            None => {
                tracing::warn!("cannot determine home directory, using the working directory");
                PathBuf::from(CACHE_DIR_NAME)
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::default_cache_dir(), Sources::default())
    }
}
