use std::fs::{self, File};
use std::io::{prelude::*, BufReader};
use std::path::PathBuf;

use clap::Parser;
use pretzel::{Document, LabeledDocument, Smoothing, StopWords, Trainer};
use pretzel_rules::{
    document_filters::MinTokenLengthFilter,
    string_filters::{LowercaseFilter, PunctuationFilter},
    DocumentFilter, StringFilter,
};

#[derive(Parser, Debug)]
#[command(about = "A program to train models of Pretzel.")]
struct Args {
    /// A labeled training corpus. Each line is `label<TAB>text`, where label is `positive` or
    /// `negative`
    #[arg(long, required = true)]
    corpus: Vec<PathBuf>,

    /// A stop-word file. Words are separated by whitespace; lines starting with `#` are
    /// comments
    #[arg(long)]
    stop_words: Vec<PathBuf>,

    /// The file to write the trained model to
    #[arg(long)]
    model: PathBuf,

    /// Smoothing of word likelihoods: {none, laplace, or a positive pseudo-count}
    #[arg(long, default_value = "none")]
    smoothing: Smoothing,

    /// Tokens shorter than this number of characters are discarded
    #[arg(long, default_value = "0")]
    min_token_len: usize,

    /// Do not normalize training data.
    #[arg(long)]
    no_norm: bool,

    /// The compression level for zstd
    #[arg(long, default_value = "19")]
    zstd_level: i32,

    /// The number of workers for zstd (0 means multithreaded will be disabled)
    #[arg(long, default_value = "0")]
    zstd_workers: u32,
}

fn normalize(text: &str, no_norm: bool) -> String {
    if no_norm {
        text.to_string()
    } else {
        PunctuationFilter.filter(LowercaseFilter.filter(text))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let length_filter = MinTokenLengthFilter::new(args.min_token_len);

    let mut stop_words = StopWords::new();
    for path in &args.stop_words {
        log::info!("Loading {path:?} ...");
        let text = fs::read_to_string(path)?;
        for word in StopWords::from_text(&text).to_sorted_vec() {
            for word in normalize(&word, args.no_norm).split_whitespace() {
                stop_words.insert(word);
            }
        }
    }
    log::info!("# of stop words: {}", stop_words.len());

    let mut trainer = Trainer::new(stop_words).smoothing(args.smoothing);
    for path in &args.corpus {
        log::info!("Loading {path:?} ...");
        let f = BufReader::new(File::open(path)?);
        for (i, line) in f.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let example = LabeledDocument::from_tsv_line(&line)
                .map_err(|e| format!("{}:{}: {}", path.display(), i + 1, e))?;
            let (document, class) = example.into_parts();
            let text = normalize(&document.to_raw_string(), args.no_norm);
            let document = length_filter.filter(Document::from_raw(text));
            trainer.push_document(&document, class);
        }
        log::info!("# of documents: {}", trainer.n_documents());
    }
    log::info!("# of features: {}", trainer.n_features());

    log::info!("Start training...");
    let model = trainer.train()?;
    log::info!("Finish training.");

    let mut f = zstd::Encoder::new(File::create(args.model)?, args.zstd_level)?;
    f.multithread(args.zstd_workers)?;
    model.write(&mut f)?;
    f.finish()?;

    Ok(())
}
