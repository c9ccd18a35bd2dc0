//! namedargs: Flatten JSON records into named query parameters
//!
//! Usage:
//!   # Read a document from a file, output to stdout
//!   namedargs record.json
//!
//!   # Read from stdin
//!   echo '{"GivenName": "John", "Child": {"GivenName": "Jane"}}' | namedargs
//!
//!   # Process NDJSON, one parameter list per line, as name/value pairs
//!   namedargs --ndjson --pairs people.jsonl

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use namedargs::naming;
use namedargs::{ArgLayout, ArgWriter, FlattenConfig, Flattener};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read, Write};

#[derive(Parser, Debug)]
#[command(name = "namedargs")]
#[command(about = "Flatten JSON records into named query parameters", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one record per line). Without it the
    /// input must hold a single document; a top-level array is read as records
    #[arg(long)]
    ndjson: bool,

    /// Separator between nested names (default: "_")
    #[arg(long)]
    separator: Option<String>,

    /// Maximum nesting depth (default: 32)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Keep keys as they are instead of converting them to snake_case
    #[arg(long)]
    keep_names: bool,

    /// Fail when two keys flatten to the same name
    #[arg(long)]
    reject_duplicates: bool,

    /// Write `{"name", "value"}` pairs instead of one object per record.
    /// Needed when two keys flatten to the same name
    #[arg(long)]
    pairs: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = build_config(&args);
    log::debug!("using {:?}", config);
    let flattener = Flattener::new(config);

    let reader = if let Some(file_path) = &args.input {
        let file = File::open(file_path).with_context(|| format!("Failed to open {}", file_path))?;
        Box::new(BufReader::new(file)) as Box<dyn Read>
    } else {
        Box::new(std::io::stdin()) as Box<dyn Read>
    };

    let stdout = std::io::stdout();
    let mut writer = ArgWriter::new(stdout.lock(), layout(&args));
    let count = process_reader(reader, &flattener, args.ndjson, &mut writer)?;
    writer.flush()?;

    if count == 0 {
        log::warn!("no JSON records found in input");
    }

    Ok(())
}

/// Overlay the command line flags onto the default config
fn build_config(args: &Args) -> FlattenConfig {
    let mut config = FlattenConfig::default().with_reject_duplicates(args.reject_duplicates);
    if let Some(sep) = &args.separator {
        config = config.with_separator(sep.clone());
    }
    if let Some(depth) = args.max_depth {
        config = config.with_max_depth(depth);
    }
    if args.keep_names {
        config = config.with_naming(naming::identity);
    }
    config
}

fn layout(args: &Args) -> ArgLayout {
    if args.pairs {
        ArgLayout::Pairs
    } else {
        ArgLayout::Object
    }
}

/// Flatten every record in the input; returns the number of records written
fn process_reader<R: Read, W: Write>(
    reader: R,
    flattener: &Flattener,
    ndjson: bool,
    writer: &mut ArgWriter<W>,
) -> Result<usize> {
    let mut stream = serde_json::Deserializer::from_reader(BufReader::new(reader)).into_iter::<Value>();
    let mut count = 0;

    for result in stream.by_ref() {
        let value: Value = result.context("Failed to parse JSON")?;

        match value {
            // A top-level array is a stream of records
            Value::Array(items) if !ndjson => {
                for item in items {
                    write_record(&item, count, flattener, writer)?;
                    count += 1;
                }
            }
            value => {
                write_record(&value, count, flattener, writer)?;
                count += 1;
            }
        }

        if !ndjson {
            break;
        }
    }

    if !ndjson && stream.next().is_some() {
        bail!("Unexpected input after the first JSON document (use --ndjson for multiple documents)");
    }

    Ok(count)
}

fn write_record<W: Write>(
    value: &Value,
    index: usize,
    flattener: &Flattener,
    writer: &mut ArgWriter<W>,
) -> Result<()> {
    let params = flattener
        .from_struct(value)
        .with_context(|| format!("Record {} could not be flattened", index))?;
    writer.write_args(&params)
}
