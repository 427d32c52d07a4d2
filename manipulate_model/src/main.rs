use std::fs;
use std::path::PathBuf;

use clap::Parser;
use pretzel::{Class, Model, Smoothing};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "A program to manipulate trained models.")]
struct Args {
    /// Input path of the model file
    #[arg(long)]
    model_in: PathBuf,

    /// Output path of the model file
    #[arg(long)]
    model_out: Option<PathBuf>,

    /// Output the word statistics contained in the model as CSV.
    #[arg(long)]
    dump_stats: Option<PathBuf>,

    /// Re-estimate word likelihoods with this smoothing: {none, laplace, or a positive
    /// pseudo-count}
    #[arg(long)]
    smoothing: Option<Smoothing>,

    /// The compression level for zstd
    #[arg(long, default_value = "19")]
    zstd_level: i32,

    /// The number of workers for zstd (0 means multithreaded will be disabled)
    #[arg(long, default_value = "0")]
    zstd_workers: u32,
}

#[derive(Serialize)]
struct WordStatsRecord<'a> {
    word: &'a str,
    n_positive: u32,
    n_negative: u32,
    p_positive: f64,
    p_negative: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading model file...");
    let mut f = zstd::Decoder::new(fs::File::open(args.model_in)?)?;
    let mut model = Model::read(&mut f)?;
    log::info!(
        "# of words: {}, # of documents: {} positive, {} negative, smoothing: {}",
        model.vocabulary().len(),
        model.n_docs(Class::Positive),
        model.n_docs(Class::Negative),
        model.smoothing(),
    );

    if let Some(smoothing) = args.smoothing {
        log::info!("Re-estimating likelihoods with smoothing {}...", smoothing);
        model = model.with_smoothing(smoothing)?;
    }

    if let Some(path) = args.dump_stats {
        log::info!("Saving word statistics...");
        let file = fs::File::create(path)?;
        let mut wtr = csv::Writer::from_writer(file);
        for (word, stats) in model.iter_word_stats() {
            wtr.serialize(WordStatsRecord {
                word,
                n_positive: stats.n_docs(Class::Positive),
                n_negative: stats.n_docs(Class::Negative),
                p_positive: stats.likelihood(Class::Positive),
                p_negative: stats.likelihood(Class::Negative),
            })?;
        }
        wtr.flush()?;
    }

    if let Some(path) = args.model_out {
        log::info!("Saving model file...");
        let mut f = zstd::Encoder::new(fs::File::create(path)?, args.zstd_level)?;
        f.multithread(args.zstd_workers)?;
        model.write(&mut f)?;
        f.finish()?;
    }

    Ok(())
}
