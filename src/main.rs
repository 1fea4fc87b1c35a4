use std::fs::File;
use std::io;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bio::io::fastq;
use clap::ValueHint;
use env_logger::Env;
use log::info;
use pluralizer::pluralize;

use crate::diag::LogDiagnostics;
use crate::pair_handler::PairHandler;
use crate::reader::reader_maybe_gzip;
use crate::writer::{writer_maybe_gzip, WriterMaybeGzip};

mod diag;
mod errors;
mod pair_handler;
mod pipeline;
mod reader;
mod record;
mod select;
mod writer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cmd = clap::command!("loon")
        .about("Rebuild deduplicated paired-end FASTQ from name-sorted SAM alignments")
        .arg(clap::arg!(<"input-sam"> "name-sorted SAM to rebuild reads from (gzip detected automatically)")
            .value_name("input .sam")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath))
        .arg(clap::arg!(<"out-forward"> "where to place mate 1 reads")
            .value_name("output forward .fastq")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath))
        .arg(clap::arg!(<"out-reverse"> "where to place mate 2 reads")
            .value_name("output reverse .fastq")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath))
        .arg(clap::arg!(--"headers-out" <"path"> "pass SAM header lines through to this file (default: discard them)")
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath)
            .required(false));

    let args = cmd.get_matches();

    let input_path = args.get_one::<PathBuf>("input-sam").unwrap();
    let (input, was_compressed) = reader_maybe_gzip(input_path)
        .with_context(|| format!("couldn't open {} for reading", input_path.display()))?;
    if was_compressed {
        info!("parsing {} as a gzip", input_path.display());
    }

    let record_writers = (
        open_writer(args.get_one::<PathBuf>("out-forward").unwrap())?,
        open_writer(args.get_one::<PathBuf>("out-reverse").unwrap())?,
    );

    let mut header_sink: Box<dyn Write> = match args.get_one::<PathBuf>("headers-out") {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("couldn't open {} for writing", path.display()))?,
        ),
        None => Box::new(io::sink()),
    };

    let mut pair_handler = PairHandler::new(record_writers, LogDiagnostics);
    pipeline::process(input, &mut pair_handler, &mut header_sink)
        .with_context(|| format!("while processing {}", input_path.display()))?;

    info!(
        "rebuilt {} from {}",
        pluralize("pair", pair_handler.good_records as isize, true),
        pluralize("alignment", pair_handler.total_records as isize, true)
    );
    if pair_handler.dropped_templates > 0 {
        info!(
            "dropped {} without both ends resolved",
            pluralize("template", pair_handler.dropped_templates as isize, true)
        );
    }
    if pair_handler.suspect_ends > 0 {
        info!(
            "{} had only suspect alignments",
            pluralize("read end", pair_handler.suspect_ends as isize, true)
        );
    }

    Ok(())
}

fn open_writer(path: &PathBuf) -> Result<fastq::Writer<WriterMaybeGzip>> {
    let (writer, was_compressed) = writer_maybe_gzip(path)
        .with_context(|| format!("couldn't open {} for writing", path.display()))?;
    if was_compressed {
        info!("writing {} as a gzip", path.display());
    }
    Ok(writer)
}
