//! The per-kanji record and its binary encoding.
//!
//! A record is encoded as
//! ```text
//! u32 code point
//! u32 count, then count * (u32 byte length, UTF-8 bytes)   on readings
//! u32 count, then count * (u32 byte length, UTF-8 bytes)   kun readings
//! u32 count, then count * (u32 byte length, UTF-8 bytes)   meanings
//! ```
//! with all integers big-endian. Records are self-delimiting so that one can be decoded
//! from an offset without knowing its length.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Descriptive data for a single kanji. Readings and meanings keep their source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanjiRecord {
    pub kanji: char,
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
    pub meanings: Vec<String>,
}

impl Default for KanjiRecord {
    fn default() -> Self {
        Self {
            kanji: '\0',
            on_readings: vec![],
            kun_readings: vec![],
            meanings: vec![],
        }
    }
}

impl KanjiRecord {
    pub fn is_empty(&self) -> bool {
        self.kanji == '\0'
    }

    /// Writes the record and returns the number of bytes written.
    pub fn encode<W: Write>(&self, mut w: W) -> io::Result<u64> {
        w.write_u32::<BigEndian>(self.kanji as u32)?;
        let mut written = 4;
        for list in [&self.on_readings, &self.kun_readings, &self.meanings] {
            written += write_strings(&mut w, list)?;
        }
        Ok(written)
    }

    /// Reads exactly one record.
    pub fn decode<R: Read>(mut r: R) -> io::Result<Self> {
        let code_point = r.read_u32::<BigEndian>()?;
        let kanji = char::from_u32(code_point).ok_or_else(|| {
            invalid_data(format!("invalid code point {code_point:#x}"))
        })?;
        let on_readings = read_strings(&mut r)?;
        let kun_readings = read_strings(&mut r)?;
        let meanings = read_strings(&mut r)?;
        Ok(Self {
            kanji,
            on_readings,
            kun_readings,
            meanings,
        })
    }
}

fn write_strings<W: Write>(w: &mut W, strings: &[String]) -> io::Result<u64> {
    w.write_u32::<BigEndian>(len_u32(strings.len())?)?;
    let mut written = 4;
    for s in strings {
        w.write_u32::<BigEndian>(len_u32(s.len())?)?;
        w.write_all(s.as_bytes())?;
        written += 4 + s.len() as u64;
    }
    Ok(written)
}

fn read_strings<R: Read>(r: &mut R) -> io::Result<Vec<String>> {
    let count = r.read_u32::<BigEndian>()?;
    // no preallocation, the count is untrusted
    let mut strings = vec![];
    for _ in 0..count {
        let len = u64::from(r.read_u32::<BigEndian>()?);
        let mut buf = vec![];
        r.by_ref().take(len).read_to_end(&mut buf)?;
        if buf.len() as u64 != len {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        let s = String::from_utf8(buf).map_err(|e| invalid_data(e.to_string()))?;
        strings.push(s);
    }
    Ok(strings)
}

fn len_u32(len: usize) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| invalid_data(format!("length {len} does not fit the format")))
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

#[cfg(test)]
mod test {
    use super::*;

    fn river() -> KanjiRecord {
        KanjiRecord {
            kanji: '河',
            on_readings: vec!["カ".to_string()],
            kun_readings: vec!["かわ".to_string(), "かわ".to_string()],
            meanings: vec!["river".to_string(), "stream".to_string()],
        }
    }

    #[test]
    fn reports_encoded_size() {
        let mut buf = vec![];
        let size = river().encode(&mut buf).unwrap();
        assert_eq!(size, buf.len() as u64);
    }

    #[test]
    fn decodes_consecutive_records() {
        let empty_lists = KanjiRecord {
            kanji: '乂',
            ..Default::default()
        };
        let mut buf = vec![];
        river().encode(&mut buf).unwrap();
        empty_lists.encode(&mut buf).unwrap();

        let mut reader = buf.as_slice();
        assert_eq!(KanjiRecord::decode(&mut reader).unwrap(), river());
        assert_eq!(KanjiRecord::decode(&mut reader).unwrap(), empty_lists);
        assert!(reader.is_empty());
    }

    #[test]
    fn rejects_truncated_record() {
        let mut buf = vec![];
        river().encode(&mut buf).unwrap();
        buf.truncate(buf.len() - 3);
        let err = KanjiRecord::decode(buf.as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn rejects_invalid_code_point() {
        let buf = [0x00, 0x00, 0xD8, 0x00, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let err = KanjiRecord::decode(buf.as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_oversized_length_without_allocating() {
        // code point, one on reading claiming 4 GiB
        let buf = [0x00, 0x00, 0x6C, 0xB3, 0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFF, b'a'];
        let err = KanjiRecord::decode(buf.as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn default_is_empty() {
        assert!(KanjiRecord::default().is_empty());
        assert!(!river().is_empty());
    }
}
