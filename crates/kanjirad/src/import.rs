//! Builds the dictionary cache from the source files.

use crate::{
    cache::CacheDir,
    config::Sources,
    error::{Error, Result},
    radicals::{self, RadicalTable},
    record::KanjiRecord,
    store::{KanjiIndex, KanjiTable, RecordWriter},
};
use kanjidata::{
    kanjidic2::{Character, Kanjidic2},
    text,
};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

/// The grade of kanji without one in KANJIDIC2.
///
/// Grades 1..=6 are kyouiku kanji, 7..=8 the remaining jouyou kanji and 9..=10 jinmeiyou kanji.
pub const UNCLASSIFIED_GRADE: u32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

pub struct Importer<'a> {
    cache: &'a CacheDir,
    sources: &'a Sources,
    version: &'a str,
}

impl<'a> Importer<'a> {
    pub fn new(cache: &'a CacheDir, sources: &'a Sources, version: &'a str) -> Self {
        Self {
            cache,
            sources,
            version,
        }
    }

    /// Deletes the current cache and rebuilds it from the sources.
    ///
    /// `cancel` is checked before each KANJIDIC2 entry. On any error, including cancellation,
    /// every file written so far is deleted.
    pub fn run<F>(&self, cancel: &AtomicBool, progress: F) -> Result<ImportSummary>
    where
        F: FnMut(Progress),
    {
        self.run_with(cancel, progress, RecordWriter::<BufWriter<File>>::create)
    }

    fn run_with<W, F, O>(
        &self,
        cancel: &AtomicBool,
        mut progress: F,
        open_records: O,
    ) -> Result<ImportSummary>
    where
        W: Write,
        F: FnMut(Progress),
        O: FnOnce(&Path) -> Result<RecordWriter<W>>,
    {
        // stale artifacts go even if the import can't start
        self.cache.clear()?;

        let radkfile = source(&self.sources.radkfile, "kanji lookup table")?;
        let kradfile = source(&self.sources.kradfile, "kanji radicals list")?;
        let kanjidic = source(&self.sources.kanjidic, "KANJIDIC2 dictionary")?;

        self.cache.create()?;
        let partial = self.cache.partial();

        tracing::info!("copying radical lists");
        copy_as_utf8(radkfile, &self.cache.radkfile(), "kanji lookup table")?;
        copy_as_utf8(kradfile, &self.cache.kradfile(), "kanji radicals list")?;
        let table = RadicalTable::load(&self.cache.radkfile(), &self.cache.kradfile())?;
        tracing::debug!("{} radicals", table.radicals().len());

        tracing::info!("parsing {}", kanjidic.display());
        let file = radicals::open(kanjidic, "KANJIDIC2 dictionary")?;
        let kd2 = Kanjidic2::from(BufReader::new(file)).map_err(Error::malformed)?;

        tracing::info!("writing kanji records");
        let mut writer = open_records(&self.cache.records())?;
        let mut index = KanjiIndex::default();
        let mut strokes = KanjiTable::default();
        let mut grades = KanjiTable::default();
        let mut summary = ImportSummary::default();
        let total = kd2.character.len();
        for (idx, character) in kd2.character.iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                tracing::info!("import cancelled after {idx} of {total} entries");
                return Err(Error::Cancelled);
            }
            match parse_character(character)? {
                Some(entry) => {
                    let (offset, _size) = writer.write_record(&entry.record)?;
                    let kanji = entry.record.kanji;
                    index.insert(kanji, offset);
                    strokes.insert(kanji, entry.strokes);
                    grades.insert(kanji, entry.grade);
                    summary.imported += 1;
                }
                None => summary.skipped += 1,
            }
            progress(Progress {
                done: idx + 1,
                total,
            });
        }
        writer.finish()?;

        tracing::info!("writing index and tables");
        index.save(&self.cache.index())?;
        strokes.save(&self.cache.strokes(), "stroke table")?;
        grades.save(&self.cache.grades(), "grade table")?;
        self.cache.write_stamp(self.version)?;
        partial.complete();

        tracing::info!(
            "imported {} kanji, skipped {}",
            summary.imported,
            summary.skipped
        );
        Ok(summary)
    }
}

/// A KANJIDIC2 entry ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    record: KanjiRecord,
    strokes: u32,
    grade: u32,
}

/// Validates and converts an entry, or returns `None` for literals that can't be stored.
fn parse_character(character: &Character) -> Result<Option<Entry>> {
    let kanji = character
        .literal
        .as_deref()
        .and_then(|l| l.trim().chars().next())
        .ok_or_else(|| {
            Error::MalformedSource("character entry without a literal".to_string())
        })?;
    // the index is keyed by a single BMP code point
    if u32::from(kanji) > 0xFFFF || kanji.is_control() {
        tracing::trace!("skipping {:#x}", u32::from(kanji));
        return Ok(None);
    }

    let strokes = character
        .stroke_count()
        .ok_or_else(|| Error::MalformedSource(format!("no stroke count for kanji {kanji}")))?
        .parse::<u32>()
        .map_err(|_| Error::MalformedSource(format!("invalid stroke count for kanji {kanji}")))?;

    let grade = character
        .grade()
        .and_then(|g| g.parse::<u32>().ok())
        .unwrap_or(UNCLASSIFIED_GRADE);

    let mut record = KanjiRecord {
        kanji,
        ..Default::default()
    };
    for rmgroup in character.rmgroups() {
        for reading in rmgroup.reading.iter().filter(|r| !r.text.is_empty()) {
            if reading.r_type.eq_ignore_ascii_case("ja_on") {
                record.on_readings.push(reading.text.clone());
            } else if reading.r_type.eq_ignore_ascii_case("ja_kun") {
                record.kun_readings.push(reading.text.clone());
            }
        }
        record.meanings.extend(
            rmgroup
                .meaning
                .iter()
                .filter(|m| m.m_lang.is_none() && !m.text.is_empty())
                .map(|m| m.text.clone()),
        );
    }

    Ok(Some(Entry {
        record,
        strokes,
        grade,
    }))
}

fn source<'p>(path: &'p Option<PathBuf>, what: &'static str) -> Result<&'p Path> {
    path.as_deref().ok_or(Error::SourceMissing(what))
}

fn copy_as_utf8(from: &Path, to: &Path, what: &'static str) -> Result<()> {
    let file = radicals::open(from, what)?;
    let contents = text::read_to_string(BufReader::new(file)).map_err(Error::malformed)?;
    let mut out = File::create(to).map_err(Error::write(what))?;
    out.write_all(contents.as_bytes())
        .map_err(Error::write(what))?;
    Ok(())
}
