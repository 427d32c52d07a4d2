use std::fs::File;
use std::io::{prelude::*, stdin};
use std::path::PathBuf;

use clap::Parser;
use pretzel::{Class, Classifier, Document, LabeledDocument, Model, PretzelError, TieBreak};
use pretzel_rules::{
    string_filters::{LowercaseFilter, PunctuationFilter},
    StringFilter,
};

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of Pretzel.")]
struct Args {
    /// The model file to use when classifying text
    #[arg(long)]
    model: PathBuf,

    /// Decision when both classes score the same: {undecided, prior, positive, negative}
    #[arg(long, default_value = "undecided")]
    tie_break: TieBreak,

    /// Do not normalize input strings before prediction.
    #[arg(long)]
    no_norm: bool,
}

#[derive(Default)]
struct Confusion {
    n_tp: usize,
    n_tn: usize,
    n_fp: usize,
    n_fn: usize,
    n_undecided: usize,
    n_degenerate: usize,
}

impl Confusion {
    fn push(&mut self, reference: Class, hypothesis: Class) {
        match (reference, hypothesis) {
            (Class::Positive, Class::Positive) => self.n_tp += 1,
            (Class::Negative, Class::Negative) => self.n_tn += 1,
            (Class::Negative, Class::Positive) => self.n_fp += 1,
            (Class::Positive, Class::Negative) => self.n_fn += 1,
        }
    }

    fn n_decided(&self) -> usize {
        self.n_tp + self.n_tn + self.n_fp + self.n_fn
    }

    fn metrics(&self) -> Metrics {
        let accuracy = ratio(self.n_tp + self.n_tn, self.n_decided());
        let precision = ratio(self.n_tp, self.n_tp + self.n_fp);
        let recall = ratio(self.n_tp, self.n_tp + self.n_fn);
        let f1 = match (precision, recall) {
            (Some(p), Some(r)) if p + r > 0.0 => Some(2. * p * r / (p + r)),
            (Some(_), Some(_)) => Some(0.0),
            _ => None,
        };
        Metrics {
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

/// Scores undefined for lack of data are `None`.
struct Metrics {
    accuracy: Option<f64>,
    precision: Option<f64>,
    recall: Option<f64>,
    f1: Option<f64>,
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator != 0).then(|| numerator as f64 / denominator as f64)
}

fn format_metric(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let model = Model::read(&mut f)?;
    let classifier = Classifier::new(model).tie_break(args.tie_break);

    log::info!("Start classification");
    let mut confusion = Confusion::default();
    for (i, line) in stdin().lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let example = LabeledDocument::from_tsv_line(&line)
            .map_err(|e| format!("line {}: {}", i + 1, e))?;
        let (document, reference) = example.into_parts();
        let document = if args.no_norm {
            document
        } else {
            let text = LowercaseFilter.filter(document.to_raw_string());
            Document::from_raw(PunctuationFilter.filter(text))
        };
        match classifier.classify(&document) {
            Ok(s) => match s.decision() {
                Some(hypothesis) => confusion.push(reference, hypothesis),
                None => confusion.n_undecided += 1,
            },
            Err(PretzelError::DegenerateModel(e)) => {
                log::debug!("line {}: {}", i + 1, e);
                confusion.n_degenerate += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    let metrics = confusion.metrics();
    println!("Accuracy: {}", format_metric(metrics.accuracy));
    println!("Precision: {}", format_metric(metrics.precision));
    println!("Recall: {}", format_metric(metrics.recall));
    println!("F1: {}", format_metric(metrics.f1));
    let Confusion {
        n_tp,
        n_tn,
        n_fp,
        n_fn,
        n_undecided,
        n_degenerate,
    } = confusion;
    println!("TP: {}, TN: {}, FP: {}, FN: {}", n_tp, n_tn, n_fp, n_fn);
    println!("Undecided: {}, Degenerate: {}", n_undecided, n_degenerate);

    Ok(())
}
