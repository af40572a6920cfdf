//! The cache directory holding the imported dictionary.
//!
//! All files in it are treated as a single unit: they are only valid if the version stamp
//! matches the running program's expected version, and the stamp is always written last.

use crate::error::{Error, Result};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

const RECORDS: &str = "kanjidic.dat";
const INDEX: &str = "kanjidic.idx";
const STROKES: &str = "strokes.bin";
const GRADES: &str = "grades.bin";
const RADKFILE: &str = "radkfile.utf8";
const KRADFILE: &str = "kradfile.utf8";
const VERSION: &str = "version";

const ARTIFACTS: [&str; 7] = [RECORDS, INDEX, STROKES, GRADES, RADKFILE, KRADFILE, VERSION];

#[derive(Debug, Clone)]
pub struct CacheDir {
    root: PathBuf,
}

impl CacheDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn records(&self) -> PathBuf {
        self.root.join(RECORDS)
    }

    pub fn index(&self) -> PathBuf {
        self.root.join(INDEX)
    }

    pub fn strokes(&self) -> PathBuf {
        self.root.join(STROKES)
    }

    pub fn grades(&self) -> PathBuf {
        self.root.join(GRADES)
    }

    pub fn radkfile(&self) -> PathBuf {
        self.root.join(RADKFILE)
    }

    pub fn kradfile(&self) -> PathBuf {
        self.root.join(KRADFILE)
    }

    pub fn version(&self) -> PathBuf {
        self.root.join(VERSION)
    }

    /// Whether the cache was completely written by a program expecting `version`.
    pub fn is_valid(&self, version: &str) -> bool {
        match fs::read(self.version()) {
            Ok(stamp) => {
                let valid = stamp == version.as_bytes();
                if !valid {
                    tracing::info!(
                        "dictionary cache version '{}' does not match '{version}'",
                        String::from_utf8_lossy(&stamp)
                    );
                }
                valid
            }
            Err(err) => {
                tracing::debug!("no usable version stamp: {err}");
                false
            }
        }
    }

    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(Error::write("dictionary cache directory"))
    }

    pub fn write_stamp(&self, version: &str) -> Result<()> {
        fs::write(self.version(), version).map_err(Error::write("dictionary cache version"))
    }

    /// Deletes every cache file, the version stamp first.
    pub fn clear(&self) -> Result<()> {
        for name in ARTIFACTS.iter().rev() {
            match fs::remove_file(self.root.join(name)) {
                Ok(()) => tracing::trace!("removed {name}"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Returns a guard that clears the cache when dropped, unless it was disarmed.
    pub fn partial(&self) -> PartialCache<'_> {
        PartialCache {
            cache: self,
            armed: true,
        }
    }
}

/// A cache that is being written. Dropping it without calling [`PartialCache::complete`]
/// deletes everything written so far.
pub struct PartialCache<'a> {
    cache: &'a CacheDir,
    armed: bool,
}

impl PartialCache<'_> {
    pub fn complete(mut self) {
        self.armed = false;
    }
}

impl Drop for PartialCache<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::info!("removing partially written dictionary cache");
            if let Err(err) = self.cache.clear() {
                tracing::error!("failed to clean up dictionary cache: {err}");
            }
        }
    }
}
