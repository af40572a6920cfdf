//! The kanji record store and the tables loaded alongside it.
//!
//! The store is a single append-only file of concatenated records. Record boundaries
//! are only known through the [`KanjiIndex`], which maps a kanji's code point to the
//! offset of its record.

use crate::{
    error::{Error, Result},
    record::KanjiRecord,
};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, BufWriter, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

/// Appends records to a store, keeping track of the current end offset.
pub struct RecordWriter<W: Write> {
    inner: W,
    offset: u64,
}

impl RecordWriter<BufWriter<File>> {
    /// Creates a new, empty store file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(Error::write("kanji record store"))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, offset: 0 }
    }

    /// Appends `record` and returns the offset it was written at along with its size.
    pub fn write_record(&mut self, record: &KanjiRecord) -> Result<(u64, u64)> {
        let offset = self.offset;
        let size = record
            .encode(&mut self.inner)
            .map_err(Error::write("kanji record"))?;
        self.offset += size;
        Ok((offset, size))
    }

    pub fn finish(mut self) -> Result<W> {
        self.inner
            .flush()
            .map_err(Error::write("kanji record store"))?;
        Ok(self.inner)
    }
}

/// Reads the record at `offset` in the store at `path`.
///
/// The file is only held open for the duration of the call.
pub fn read_record(path: &Path, offset: u64) -> Result<KanjiRecord> {
    let mut file = File::open(path)?;
    if offset >= file.metadata()?.len() {
        return Err(Error::NotFound { offset });
    }
    file.seek(SeekFrom::Start(offset))?;
    let record = KanjiRecord::decode(BufReader::new(file)).map_err(|err| {
        tracing::debug!("failed to decode record at {offset}: {err}");
        Error::NotFound { offset }
    })?;
    Ok(record)
}

/// Maps a kanji's code point to the offset of its record in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanjiIndex {
    offsets: HashMap<u32, u64>,
}

impl KanjiIndex {
    pub fn insert(&mut self, kanji: char, offset: u64) {
        self.offsets.insert(kanji as u32, offset);
    }

    pub fn get(&self, kanji: char) -> Option<u64> {
        self.offsets.get(&(kanji as u32)).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, bitcode::encode(&self.offsets)).map_err(Error::write("kanji index"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let offsets = decode_blob(path)?;
        Ok(Self { offsets })
    }
}

/// A per-kanji integer, used for the stroke count and grade tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanjiTable {
    values: HashMap<char, u32>,
}

impl KanjiTable {
    pub fn insert(&mut self, kanji: char, value: u32) {
        self.values.insert(kanji, value);
    }

    pub fn get(&self, kanji: char) -> Option<u32> {
        self.values.get(&kanji).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn save(&self, path: &Path, what: &'static str) -> Result<()> {
        // stored by code point
        let by_code_point = self
            .values
            .iter()
            .map(|(&k, &v)| (k as u32, v))
            .collect::<HashMap<u32, u32>>();
        std::fs::write(path, bitcode::encode(&by_code_point)).map_err(Error::write(what))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let by_code_point: HashMap<u32, u32> = decode_blob(path)?;
        let mut values = HashMap::with_capacity(by_code_point.len());
        for (code_point, value) in by_code_point {
            let kanji = char::from_u32(code_point).ok_or_else(|| Error::CacheCorrupt {
                path: path.to_path_buf(),
                message: format!("invalid code point {code_point:#x}"),
            })?;
            values.insert(kanji, value);
        }
        Ok(Self { values })
    }
}

impl FromIterator<(char, u32)> for KanjiTable {
    fn from_iter<I: IntoIterator<Item = (char, u32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn decode_blob<T>(path: &Path) -> Result<T>
where
    T: bitcode::DecodeOwned,
{
    let buf = std::fs::read(path)?;
    bitcode::decode(&buf).map_err(|err| Error::CacheCorrupt {
        path: PathBuf::from(path),
        message: err.to_string(),
    })
}
