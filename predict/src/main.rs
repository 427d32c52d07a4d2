use std::fs::File;
use std::io::{prelude::*, stdin, stdout, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use pretzel::{Classifier, Document, Model, PretzelError, TieBreak};
use pretzel_rules::{
    string_filters::{LowercaseFilter, PunctuationFilter},
    StringFilter,
};

#[derive(Parser, Debug)]
#[command(about = "A program to classify documents with Pretzel.")]
struct Args {
    /// The model file to use when classifying text
    #[arg(long)]
    model: PathBuf,

    /// Decision when both classes score the same: {undecided, prior, positive, negative}
    #[arg(long, default_value = "undecided")]
    tie_break: TieBreak,

    /// Print the log scores of both classes after the label
    #[arg(long)]
    scores: bool,

    /// Do not normalize input strings before prediction.
    #[arg(long)]
    no_norm: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let model = Model::read(&mut f)?;
    let classifier = Classifier::new(model).tie_break(args.tie_break);

    log::info!("Start classification");
    let mut out = BufWriter::new(stdout().lock());
    let mut n_docs = 0;
    let mut n_degenerate = 0;
    let start = Instant::now();
    for (i, line) in stdin().lock().lines().enumerate() {
        let line = line?;
        let text = if args.no_norm {
            line
        } else {
            PunctuationFilter.filter(LowercaseFilter.filter(line))
        };
        n_docs += 1;
        match classifier.classify(&Document::from_raw(text)) {
            Ok(s) if args.scores => writeln!(out, "{}", s)?,
            Ok(s) => match s.decision() {
                Some(class) => writeln!(out, "{}", class)?,
                None => writeln!(out, "undecided")?,
            },
            Err(PretzelError::DegenerateModel(e)) => {
                log::warn!("line {}: {}", i + 1, e);
                n_degenerate += 1;
                writeln!(out, "degenerate")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
    out.flush()?;
    let duration = start.elapsed();
    log::info!("Elapsed: {} [sec]", duration.as_secs_f64());
    log::info!(
        "# of documents: {}, # of degenerate documents: {}",
        n_docs,
        n_degenerate
    );

    Ok(())
}
