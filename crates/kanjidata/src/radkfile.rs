//! Models and parses the RADKFILE, which lists the kanji containing each radical.
//! See <https://www.edrdg.org/krad/kradinf.html>
//!
//! The file is formatted as blocks of
//! ```text
//! $ {radical} {strokes} [{jis code or image name}]
//! {kanji}{kanji}{kanji}...
//! {kanji}...
//! ```
//! with `#` starting a comment line.

use std::{collections::HashMap, io::Read};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Radkfile {
    pub radicals: Vec<RadicalEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadicalEntry {
    pub radical: char,
    pub strokes: u32,
    /// The kanji containing the radical, in file order.
    pub kanji: String,
}

impl Radkfile {
    pub fn from<R: Read>(r: R) -> eyre::Result<Self> {
        let text = crate::text::read_to_string(r)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> eyre::Result<Self> {
        let mut radicals = Vec::<RadicalEntry>::new();
        let mut positions = HashMap::<char, usize>::new();
        // index of the radical the current kanji lines belong to
        let mut current = None;

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(header) = line.strip_prefix('$') {
                let mut tokens = header.split_whitespace();
                let radical = tokens
                    .next()
                    .and_then(|t| t.chars().next())
                    .ok_or_else(|| eyre::eyre!("Missing radical on line {}", idx + 1))?;
                let strokes = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);
                let pos = *positions.entry(radical).or_insert_with(|| {
                    radicals.push(RadicalEntry {
                        radical,
                        strokes,
                        kanji: String::new(),
                    });
                    radicals.len() - 1
                });
                current = Some(pos);
            } else if let Some(pos) = current {
                radicals[pos].kanji.push_str(line);
            }
        }

        tracing::debug!("parsed {} radicals", radicals.len());
        Ok(Self { radicals })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_blocks() {
        let text = "\
# comment
$ 水 4
海河
湖
$ 木 4 js01
林森枝
";
        let radk = Radkfile::parse(text).unwrap();
        assert_eq!(
            radk.radicals,
            &[
                RadicalEntry {
                    radical: '水',
                    strokes: 4,
                    kanji: "海河湖".to_string(),
                },
                RadicalEntry {
                    radical: '木',
                    strokes: 4,
                    kanji: "林森枝".to_string(),
                },
            ]
        );
    }

    #[test]
    fn invalid_strokes_default_to_zero() {
        let radk = Radkfile::parse("$ 一 x\n一\n$ 丨\n").unwrap();
        assert_eq!(radk.radicals[0].strokes, 0);
        assert_eq!(radk.radicals[1].strokes, 0);
        assert_eq!(radk.radicals[1].kanji, "");
    }

    #[test]
    fn missing_radical_is_an_error() {
        assert!(Radkfile::parse("$\n海\n").is_err());
    }

    #[test]
    fn ignores_kanji_before_first_radical() {
        let radk = Radkfile::parse("海河\n$ 水 4\n湖\n").unwrap();
        assert_eq!(radk.radicals.len(), 1);
        assert_eq!(radk.radicals[0].kanji, "湖");
    }

    #[test]
    fn merges_repeated_radicals() {
        let radk = Radkfile::parse("$ 水 4\n海\n$ 木 4\n林\n$ 水 4\n湖\n").unwrap();
        assert_eq!(radk.radicals.len(), 2);
        assert_eq!(radk.radicals[0].kanji, "海湖");
    }
}
