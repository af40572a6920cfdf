//! Models and parses the KANJIDIC2 file.
//! See <https://www.edrdg.org/wiki/index.php/KANJIDIC_Project>
//!
//! Only the elements kanjirad uses are modeled, everything else is skipped.
//! Mandatory elements are modeled as optional here so that missing ones can be
//! reported with the offending entry instead of as a generic deserialization error.

use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Kanjidic2 {
    pub header: Option<Header>,
    #[serde(default)]
    pub character: Vec<Character>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub file_version: Option<String>,
    pub database_version: Option<String>,
    pub date_of_creation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    pub literal: Option<String>,
    pub misc: Option<Misc>,
    pub reading_meaning: Option<ReadingMeaning>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Misc {
    pub grade: Option<String>,
    #[serde(default)]
    pub stroke_count: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingMeaning {
    #[serde(default)]
    pub rmgroup: Vec<Rmgroup>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rmgroup {
    #[serde(default)]
    pub reading: Vec<Reading>,
    #[serde(default)]
    pub meaning: Vec<Meaning>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "@r_type")]
    pub r_type: String,
    #[serde(rename = "#text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(rename = "@m_lang")]
    pub m_lang: Option<String>,
    #[serde(rename = "#text", default)]
    pub text: String,
}

impl Kanjidic2 {
    pub fn from<R: Read>(r: R) -> eyre::Result<Self> {
        let kd2: Kanjidic2 = serde_xml_rs::from_reader(r)?;
        if let Some(version) = kd2.header.as_ref().and_then(|h| h.database_version.as_deref()) {
            tracing::debug!("KANJIDIC2 database version {version}");
        }
        Ok(kd2)
    }
}

impl Character {
    /// The first stroke count listed, the rest are common miscounts.
    pub fn stroke_count(&self) -> Option<&str> {
        self.misc
            .as_ref()
            .and_then(|m| m.stroke_count.first())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn grade(&self) -> Option<&str> {
        self.misc
            .as_ref()
            .and_then(|m| m.grade.as_deref())
            .map(str::trim)
    }

    pub fn rmgroups(&self) -> impl Iterator<Item = &Rmgroup> {
        self.reading_meaning.iter().flat_map(|rm| &rm.rmgroup)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kanjidic2>
<header>
<file_version>4</file_version>
<database_version>2024-100</database_version>
<date_of_creation>2024-04-09</date_of_creation>
</header>
<character>
<literal>河</literal>
<codepoint>
<cp_value cp_type="ucs">6cb3</cp_value>
</codepoint>
<misc>
<grade>5</grade>
<stroke_count>8</stroke_count>
<freq>761</freq>
</misc>
<reading_meaning>
<rmgroup>
<reading r_type="pinyin">he2</reading>
<reading r_type="ja_on">カ</reading>
<reading r_type="ja_kun">かわ</reading>
<meaning>river</meaning>
<meaning m_lang="fr">rivière</meaning>
</rmgroup>
</reading_meaning>
</character>
<character>
<literal>乂</literal>
<misc>
<stroke_count>2</stroke_count>
</misc>
</character>
</kanjidic2>
"#;

    #[test]
    fn parses_characters() {
        let kd2 = Kanjidic2::from(DOC.as_bytes()).unwrap();
        assert_eq!(kd2.character.len(), 2);

        let river = &kd2.character[0];
        assert_eq!(river.literal.as_deref(), Some("河"));
        assert_eq!(river.stroke_count(), Some("8"));
        assert_eq!(river.grade(), Some("5"));
        let rmg = river.rmgroups().next().unwrap();
        assert_eq!(rmg.reading.len(), 3);
        assert_eq!(rmg.reading[1].r_type, "ja_on");
        assert_eq!(rmg.reading[1].text, "カ");
        assert_eq!(rmg.meaning.len(), 2);
        assert_eq!(rmg.meaning[0].m_lang, None);
        assert_eq!(rmg.meaning[1].m_lang.as_deref(), Some("fr"));

        let other = &kd2.character[1];
        assert_eq!(other.grade(), None);
        assert_eq!(other.rmgroups().count(), 0);
    }

    #[test]
    fn rejects_malformed_xml() {
        assert!(Kanjidic2::from("<kanjidic2><character>".as_bytes()).is_err());
    }
}
