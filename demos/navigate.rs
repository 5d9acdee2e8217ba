// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::{BufReader, Read};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lazypath::{Path, Value};
use log::warn;

fn parse_steps(steps: &str) -> Result<Path> {
    serde_json::from_str(steps).with_context(|| format!("invalid steps `{steps}`"))
}

fn print_values(values: impl Iterator<Item = Value>, limit: Option<usize>) -> Result<()> {
    let values: Box<dyn Iterator<Item = Value>> = match limit {
        Some(n) => Box::new(values.take(n)),
        None => Box::new(values),
    };
    for value in values {
        println!("{}", serde_json::to_string(&value)?);
    }
    Ok(())
}

fn select_file(file: String, steps: String, limit: Option<usize>) -> Result<()> {
    let data = if file.ends_with(".json") {
        Value::from_json_file(&file)?
    } else if file.ends_with(".yaml") || file.ends_with(".yml") {
        Value::from_yaml_file(&file)?
    } else {
        bail!("Unsupported data file `{file}`. Must be json or yaml.")
    };

    let path = parse_steps(&steps)?;
    print_values(path.evaluate(data)?, limit)
}

fn select_stream(file: String, steps: String, limit: Option<usize>) -> Result<()> {
    let reader: Box<dyn Read> = if file == "-" {
        Box::new(std::io::stdin().lock())
    } else {
        Box::new(std::fs::File::open(&file).with_context(|| format!("Failed to read {file}"))?)
    };

    // Documents are decoded only as results are pulled.
    let documents = serde_json::Deserializer::from_reader(BufReader::new(reader))
        .into_iter::<Value>()
        .map_while(|doc| doc.inspect_err(|e| warn!("stopping at malformed document: {e}")).ok());

    let path = parse_steps(&steps)?;
    print_values(path.evaluate(Value::stream(documents))?, limit)
}

#[derive(Subcommand)]
enum NavigateCommand {
    /// Navigate a json or yaml document.
    Select {
        /// Data file. json or yaml.
        file: String,
        /// Steps as a json array, e.g. '["items", {"start": 2}, "name", 0]'.
        steps: String,
        /// Stop after this many results.
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Navigate a stream of json documents, read lazily.
    Stream {
        /// File with concatenated or newline separated json documents. `-` for stdin.
        file: String,
        /// Steps as a json array.
        steps: String,
        /// Stop after this many results.
        #[arg(long, short)]
        limit: Option<usize>,
    },
}

#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: NavigateCommand,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        NavigateCommand::Select { file, steps, limit } => select_file(file, steps, limit),
        NavigateCommand::Stream { file, steps, limit } => select_stream(file, steps, limit),
    }
}
