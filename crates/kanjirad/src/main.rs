//! Command line front end for the kanji dictionary.

mod cli;

use clap::Parser;
use cli::{Cli, Command};
use eyre::WrapErr;
use itertools::Itertools;
use kanjirad::{import::Progress, Config, KanjiDictionary, Sources};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

const PROGRESS_INTERVAL: usize = 1000;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config = Config::new(
        cli.cache_dir.unwrap_or_else(Config::default_cache_dir),
        Sources {
            radkfile: cli.radkfile,
            kradfile: cli.kradfile,
            kanjidic: cli.kanjidic,
        },
    );

    match cli.command {
        Command::Import => import(config).await?,
        Command::Radicals => {
            let dict = load(config).await?;
            radicals(&dict);
        }
        Command::Lookup { radicals, markers } => {
            let dict = load(config).await?;
            lookup(&dict, &radicals, markers);
        }
        Command::Sort { kanji } => {
            let dict = load(config).await?;
            println!("{}", dict.sort_kanji(&kanji));
        }
        Command::Info { kanji } => {
            let dict = load(config).await?;
            info(&dict, kanji);
        }
    }

    Ok(())
}

fn log_progress(p: Progress) {
    if p.done % PROGRESS_INTERVAL == 0 || p.done == p.total {
        tracing::info!("imported {}/{} entries", p.done, p.total);
    }
}

/// Runs `task` on a blocking thread. Ctrl-C sets the flag passed to it, and the task is
/// awaited until it returns.
async fn cancellable<T, F>(task: F) -> eyre::Result<T>
where
    T: Send + 'static,
    F: FnOnce(&AtomicBool) -> T + Send + 'static,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    let mut handle = tokio::task::spawn_blocking(move || task(&flag));
    tokio::select! {
        res = &mut handle => return Ok(res?),
        res = tokio::signal::ctrl_c() => {
            res.wrap_err("Failed to listen for Ctrl-C")?;
            tracing::info!("cancelling, waiting for the import to clean up");
            cancel.store(true, Ordering::Relaxed);
        }
    }
    Ok(handle.await?)
}

async fn import(config: Config) -> eyre::Result<()> {
    let summary = cancellable(move |cancel| {
        KanjiDictionary::reimport(&config, cancel, log_progress)
    })
    .await?
    .wrap_err("Failed to import the dictionary")?;
    println!(
        "Imported {} kanji, skipped {}",
        summary.imported, summary.skipped
    );
    Ok(())
}

async fn load(config: Config) -> eyre::Result<KanjiDictionary> {
    let cache_dir = config.cache_dir.clone();
    cancellable(move |cancel| KanjiDictionary::load_with(&config, cancel, log_progress))
        .await?
        .wrap_err_with(|| {
            format!(
                "Failed to load the dictionary from '{}'",
                cache_dir.display()
            )
        })
}

fn radicals(dict: &KanjiDictionary) {
    for (strokes, radicals) in &dict.get_all_radicals().iter().chunk_by(|r| r.strokes) {
        println!("{strokes:>2}: {}", radicals.map(|r| r.radical).join(" "));
    }
}

fn lookup(dict: &KanjiDictionary, radicals: &str, markers: bool) {
    let matches = dict.lookup_radicals(radicals);
    if matches.is_empty() {
        println!("No kanji contain {radicals}");
        return;
    }
    let sorted = if markers {
        dict.sort_kanji_grouped(&matches)
    } else {
        dict.sort_kanji(&matches)
    };
    println!("{sorted}");
    let available = dict.radicals_available_for(&matches);
    println!("Radicals: {}", available.iter().join(" "));
}

fn info(dict: &KanjiDictionary, kanji: char) {
    let Some(record) = dict.get_kanji_info(kanji) else {
        println!("No entry for {kanji}");
        return;
    };
    println!("{}", record.kanji);
    println!("Strokes: {}", dict.get_kanji_strokes(kanji));
    println!("Grade: {}", dict.get_kanji_grade(kanji));
    println!("Parts: {}", dict.get_kanji_parts(kanji));
    println!("On: {}", record.on_readings.join("、"));
    println!("Kun: {}", record.kun_readings.join("、"));
    println!("Meanings: {}", record.meanings.join(", "));
}
