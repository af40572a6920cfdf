use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// The directory holding the imported dictionary. Defaults to ~/.kanjirad.
    #[arg(short, long, env = "KANJIRAD_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,
    /// The path to the RADKFILE, only read when the dictionary is imported.
    #[arg(short, long, env = "KANJIRAD_RADKFILE", global = true)]
    pub radkfile: Option<PathBuf>,
    /// The path to the KRADFILE, only read when the dictionary is imported.
    #[arg(short, long, env = "KANJIRAD_KRADFILE", global = true)]
    pub kradfile: Option<PathBuf>,
    /// The path to the KANJIDIC2 file, only read when the dictionary is imported.
    #[arg(short = 'd', long, env = "KANJIRAD_KANJIDIC", global = true)]
    pub kanjidic: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deletes the dictionary cache and imports the sources again.
    Import,
    /// Lists the radicals by stroke count.
    Radicals,
    /// Finds the kanji containing all of the given radicals.
    Lookup {
        /// The radicals, e.g. 氵木.
        radicals: String,
        /// Shows stroke count group markers.
        #[arg(short, long)]
        markers: bool,
    },
    /// Sorts kanji by stroke count, grade and code point.
    Sort {
        kanji: String,
    },
    /// Shows everything known about a kanji.
    Info {
        kanji: char,
    },
}
