//! Types modeling the source files kanjirad builds its dictionary from.

pub mod kanjidic2;
pub mod kradfile;
pub mod radkfile;
pub mod text;
