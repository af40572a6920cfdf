//! Models and parses the KRADFILE, which lists the radicals making up each kanji.
//! See <https://www.edrdg.org/krad/kradinf.html>

use std::{collections::HashMap, io::Read};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kradfile {
    /// Maps a kanji to its components concatenated into one string.
    pub kanji_to_components: HashMap<char, String>,
}

impl Kradfile {
    pub fn from<R: Read>(r: R) -> eyre::Result<Self> {
        let text = crate::text::read_to_string(r)?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        // the KRADFILE is formatted {kanji} : {component_1} {component_2} ...
        let mut kanji_to_components = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let Some(kanji) = tokens.next().and_then(|t| t.chars().next()) else {
                continue;
            };
            // separator
            tokens.next();
            kanji_to_components.insert(kanji, tokens.collect::<String>());
        }

        tracing::debug!("parsed components for {} kanji", kanji_to_components.len());
        Self {
            kanji_to_components,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_components() {
        let text = "\
# KRADFILE
海 : 氵 毎 亠 母
林 : 木

";
        let krad = Kradfile::parse(text);
        assert_eq!(krad.kanji_to_components.len(), 2);
        assert_eq!(krad.kanji_to_components[&'海'], "氵毎亠母");
        assert_eq!(krad.kanji_to_components[&'林'], "木");
    }

    #[test]
    fn kanji_without_components() {
        let krad = Kradfile::parse("一 :\n");
        assert_eq!(krad.kanji_to_components[&'一'], "");
    }
}
