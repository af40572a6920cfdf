//! The kanji dictionary the user interface talks to.

use crate::{
    cache::CacheDir,
    config::Config,
    error::{Error, Result},
    import::{ImportSummary, Importer, Progress},
    lookup::{self, KanjiOrder},
    radicals::{Radical, RadicalTable},
    record::KanjiRecord,
    store::{self, KanjiIndex, KanjiTable},
};
use std::{
    collections::BTreeSet,
    path::PathBuf,
    sync::atomic::AtomicBool,
};

/// The loaded dictionary. Read-only once loaded; records are read from disk on demand.
#[derive(Debug, Clone, Default)]
pub struct KanjiDictionary {
    radicals: RadicalTable,
    index: KanjiIndex,
    strokes: KanjiTable,
    grades: KanjiTable,
    records: PathBuf,
}

impl KanjiDictionary {
    /// Loads the dictionary from the cache, importing the sources first if the cache is
    /// missing or was written by an incompatible version.
    pub fn load(config: &Config) -> Result<Self> {
        Self::load_with(config, &AtomicBool::new(false), |_| {})
    }

    /// Like [`KanjiDictionary::load`], with a way to cancel and follow a potential import.
    pub fn load_with<F>(config: &Config, cancel: &AtomicBool, progress: F) -> Result<Self>
    where
        F: FnMut(Progress),
    {
        let cache = CacheDir::new(&config.cache_dir);
        if cache.is_valid(&config.version) {
            tracing::debug!("using dictionary cache at {}", cache.root().display());
        } else {
            tracing::info!("building dictionary cache at {}", cache.root().display());
            Importer::new(&cache, &config.sources, &config.version).run(cancel, progress)?;
        }
        Self::open(&cache)
    }

    /// Deletes the cache and imports the sources again.
    pub fn reimport<F>(config: &Config, cancel: &AtomicBool, progress: F) -> Result<ImportSummary>
    where
        F: FnMut(Progress),
    {
        let cache = CacheDir::new(&config.cache_dir);
        Importer::new(&cache, &config.sources, &config.version).run(cancel, progress)
    }

    /// Loads a cache that is known to be valid.
    fn open(cache: &CacheDir) -> Result<Self> {
        tracing::info!("loading dictionary");
        let radicals = RadicalTable::load(&cache.radkfile(), &cache.kradfile())?;
        let index = KanjiIndex::load(&cache.index())?;
        let strokes = KanjiTable::load(&cache.strokes())?;
        let grades = KanjiTable::load(&cache.grades())?;
        tracing::debug!(
            "loaded {} radicals, {} kanji records",
            radicals.radicals().len(),
            index.len()
        );
        Ok(Self {
            radicals,
            index,
            strokes,
            grades,
            records: cache.records(),
        })
    }

    /// The kanji containing all of `radicals`, in the order of the first radical's list.
    pub fn lookup_radicals(&self, radicals: &str) -> String {
        lookup::intersect_by_radicals(&self.radicals, radicals.chars())
    }

    /// The kanji containing `radical`.
    pub fn lookup_radical(&self, radical: char) -> &str {
        self.radicals.lookup_radical(radical)
    }

    pub fn order(&self) -> KanjiOrder<'_> {
        KanjiOrder::new(&self.strokes, &self.grades)
    }

    pub fn sort_kanji(&self, kanji: &str) -> String {
        self.order().sort(kanji)
    }

    /// Sorts `kanji` and inserts a group marker in front of each stroke count.
    pub fn sort_kanji_grouped(&self, kanji: &str) -> String {
        let order = self.order();
        order.annotate_with_group_markers(&order.sort(kanji))
    }

    /// Reads the record for `kanji`. Kanji without a record, and records that can't be read,
    /// result in `None`.
    pub fn get_kanji_info(&self, kanji: char) -> Option<KanjiRecord> {
        let offset = self.index.get(kanji)?;
        match store::read_record(&self.records, offset) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!("failed to read record for {kanji}: {err}");
                None
            }
        }
    }

    /// The stroke count of `kanji`, 0 if unknown.
    pub fn get_kanji_strokes(&self, kanji: char) -> u32 {
        self.strokes.get(kanji).unwrap_or_default()
    }

    /// The grade of `kanji`, 0 if unknown.
    pub fn get_kanji_grade(&self, kanji: char) -> u32 {
        self.grades.get(kanji).unwrap_or_default()
    }

    pub fn get_kanji_parts(&self, kanji: char) -> &str {
        self.radicals.kanji_parts(kanji)
    }

    pub fn get_all_radicals(&self) -> &[Radical] {
        self.radicals.radicals()
    }

    /// The radicals that appear in any of `matches`. Other radicals can't narrow the result.
    pub fn radicals_available_for(&self, matches: &str) -> BTreeSet<char> {
        lookup::radicals_available_for(&self.radicals, matches)
    }
}

/// Outcome of [`load_dictionaries`]: the dictionary, or a message to show the user.
pub fn load_dictionaries(config: &Config) -> std::result::Result<KanjiDictionary, String> {
    KanjiDictionary::load(config).map_err(|err| error_string(&err))
}

/// A human-readable description of `err` including its causes.
pub fn error_string(err: &Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::import::test::{write_sources, KANJIDIC};
    use std::fs;

    fn config(cache_dir: &std::path::Path, sources_dir: &std::path::Path) -> Config {
        Config {
            cache_dir: cache_dir.to_path_buf(),
            sources: write_sources(sources_dir, KANJIDIC),
            version: "test 1".to_string(),
        }
    }

    #[test]
    fn imports_then_loads_from_cache() {
        let src = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), src.path());

        let dict = KanjiDictionary::load(&config).unwrap();
        assert_eq!(dict.get_kanji_strokes('海'), 9);

        // sources aren't needed once the cache is valid
        config.sources = Default::default();
        let dict = KanjiDictionary::load(&config).unwrap();
        assert_eq!(dict.get_kanji_strokes('海'), 9);
        assert_eq!(dict.get_kanji_grade('河'), 5);
        assert_eq!(dict.get_all_radicals().len(), 4);
    }

    #[test]
    fn answers_queries() {
        let src = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dict = KanjiDictionary::load(&config(dir.path(), src.path())).unwrap();

        assert_eq!(dict.lookup_radicals("水"), "海河湖");
        assert_eq!(dict.lookup_radicals("水木"), "");
        assert_eq!(dict.lookup_radical('木'), "林森枝");
        assert_eq!(dict.sort_kanji("海河湖"), "河海湖");
        assert_eq!(dict.sort_kanji_grouped("湖海河"), "⑧河⑨海⑫湖");
        assert_eq!(dict.get_kanji_parts('海'), "水毎");
        assert_eq!(
            dict.radicals_available_for("海河"),
            BTreeSet::from(['水', '毎'])
        );

        let sea = dict.get_kanji_info('海').unwrap();
        assert_eq!(sea.kanji, '海');
        assert_eq!(sea.meanings, &["sea", "ocean"]);
    }

    #[test]
    fn misses_are_empty() {
        let src = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let dict = KanjiDictionary::load(&config(dir.path(), src.path())).unwrap();

        // 林 is in the radical lists but not in KANJIDIC2
        assert_eq!(dict.get_kanji_info('林'), None);
        assert_eq!(dict.get_kanji_strokes('林'), 0);
        assert_eq!(dict.get_kanji_grade('林'), 0);
        assert_eq!(dict.get_kanji_parts('森'), "");
        assert_eq!(dict.get_kanji_info('𠀋'), None);
    }

    #[test]
    fn stale_cache_is_rebuilt_without_being_read() {
        let src = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), src.path());
        let cache = CacheDir::new(dir.path());

        // an old cache in an incompatible layout
        for path in [cache.records(), cache.index(), cache.strokes(), cache.grades()] {
            fs::write(path, b"\xFF\xFF incompatible").unwrap();
        }
        fs::write(cache.radkfile(), "$\n").unwrap();
        cache.write_stamp("test 0").unwrap();

        let dict = KanjiDictionary::load(&config).unwrap();
        assert!(cache.is_valid("test 1"));
        assert_eq!(dict.get_kanji_strokes('河'), 8);
        assert_eq!(dict.get_kanji_info('河').unwrap().on_readings, &["カ"]);
    }

    #[test]
    fn stale_cache_is_removed_without_sources() {
        let src = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), src.path());
        config.sources = Default::default();
        let cache = CacheDir::new(dir.path());
        for path in [cache.records(), cache.index(), cache.strokes(), cache.grades()] {
            fs::write(path, b"old").unwrap();
        }
        cache.write_stamp("test 0").unwrap();

        let err = KanjiDictionary::load(&config).unwrap_err();
        assert!(matches!(err, Error::SourceMissing(_)), "{err}");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_import_leaves_no_cache() {
        let src = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), src.path());
        fs::write(
            config.sources.kanjidic.as_ref().unwrap(),
            KANJIDIC.replace("<stroke_count>8</stroke_count>", ""),
        )
        .unwrap();

        let message = load_dictionaries(&config).unwrap_err();
        assert!(message.contains("stroke count"), "{message}");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        config.sources = Default::default();
        let message = load_dictionaries(&config).unwrap_err();
        assert!(message.contains("No kanji lookup table configured"), "{message}");
    }

    #[test]
    fn cancelled_import_is_reported() {
        let src = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), src.path());

        let err = KanjiDictionary::load_with(&config, &AtomicBool::new(true), |_| {}).unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert_eq!(error_string(&err), "Dictionary import cancelled by user");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn unloaded_dictionary_sorts_by_code_point() {
        let dict = KanjiDictionary::default();
        assert_eq!(dict.sort_kanji("湖海河"), "河海湖");
        assert_eq!(dict.get_kanji_info('海'), None);
    }
}
