//! The radical table: which kanji contain a radical, and which radicals make up a kanji.

use crate::error::{Error, Result};
use kanjidata::{kradfile::Kradfile, radkfile::Radkfile};
use std::{cmp::Ordering, collections::HashMap, fs::File, io::BufReader, path::Path};

/// A component shape used to look kanji up.
///
/// Radicals are equal if their characters are, and ordered by stroke count and then by character.
#[derive(Debug, Clone)]
pub struct Radical {
    pub radical: char,
    pub strokes: u32,
    /// The kanji containing this radical.
    pub kanji: String,
}

impl PartialEq for Radical {
    fn eq(&self, other: &Self) -> bool {
        self.radical == other.radical
    }
}

impl Eq for Radical {}

impl PartialOrd for Radical {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Radical {
    fn cmp(&self, other: &Self) -> Ordering {
        self.strokes
            .cmp(&other.strokes)
            .then(self.radical.cmp(&other.radical))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RadicalTable {
    radicals: Vec<Radical>,
    positions: HashMap<char, usize>,
    kanji_parts: HashMap<char, String>,
}

impl RadicalTable {
    /// Loads the radical-to-kanji list and the kanji-to-radicals list.
    pub fn load(radkfile: &Path, kradfile: &Path) -> Result<Self> {
        let radk = Radkfile::from(BufReader::new(open(radkfile, "kanji lookup table")?))
            .map_err(Error::malformed)?;
        let krad = Kradfile::from(BufReader::new(open(kradfile, "kanji radicals list")?))
            .map_err(Error::malformed)?;
        Ok(Self::new(radk, krad))
    }

    pub fn new(radk: Radkfile, krad: Kradfile) -> Self {
        let radicals = radk
            .radicals
            .into_iter()
            .map(|r| Radical {
                radical: r.radical,
                strokes: r.strokes,
                kanji: r.kanji,
            })
            .collect::<Vec<_>>();
        let positions = radicals
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.radical, idx))
            .collect();
        tracing::debug!(
            "radical table with {} radicals and {} decomposed kanji",
            radicals.len(),
            krad.kanji_to_components.len()
        );
        Self {
            radicals,
            positions,
            kanji_parts: krad.kanji_to_components,
        }
    }

    /// All radicals in file order.
    pub fn radicals(&self) -> &[Radical] {
        &self.radicals
    }

    pub fn get(&self, radical: char) -> Option<&Radical> {
        self.positions.get(&radical).map(|&idx| &self.radicals[idx])
    }

    /// The kanji containing `radical`, empty for unknown radicals.
    pub fn lookup_radical(&self, radical: char) -> &str {
        self.get(radical).map(|r| r.kanji.as_str()).unwrap_or_default()
    }

    /// The radicals making up `kanji`, empty for unknown kanji.
    pub fn kanji_parts(&self, kanji: char) -> &str {
        self.kanji_parts
            .get(&kanji)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

pub(crate) fn open(path: &Path, what: &'static str) -> Result<File> {
    File::open(path).map_err(|source| Error::SourceUnreadable {
        what,
        path: path.to_path_buf(),
        source,
    })
}
