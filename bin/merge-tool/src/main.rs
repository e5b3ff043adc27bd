use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use argh::FromArgs;
use rollup_common::{env::parse_env, logging};
use rollup_config::AggregatorConfig;
use rollup_proofimpl_merge::{aggregate_records, merge_rollup_sim, MergeSimError};
use rollup_state::prelude::*;
use tracing::*;

const WORKER_THREADS_ENVVAR: &str = "ROLLUP_WORKER_THREADS";

/// Args.
#[derive(FromArgs)]
pub struct Args {
    #[argh(
        switch,
        description = "treat input files as hex text instead of raw bytes",
        short = 'x'
    )]
    hex: bool,

    #[argh(subcommand)]
    subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub enum Subcommand {
    Merge(SubcMerge),
    Aggregate(SubcAggregate),
    Inspect(SubcInspect),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "merge",
    description = "merges a pair of rollup records from encoded merge inputs"
)]
pub struct SubcMerge {
    #[argh(positional, description = "encoded merge inputs")]
    input: PathBuf,

    #[argh(
        option,
        description = "output path for the encoded record (default hex to stdout)",
        short = 'o'
    )]
    output: Option<PathBuf>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "aggregate",
    description = "folds encoded rollup records into a single root record"
)]
pub struct SubcAggregate {
    #[argh(positional, description = "encoded records, in order")]
    records: Vec<PathBuf>,

    #[argh(option, description = "aggregator config file .toml", short = 'c')]
    config: Option<PathBuf>,

    #[argh(
        option,
        description = "output path for the encoded record (default hex to stdout)",
        short = 'o'
    )]
    output: Option<PathBuf>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "inspect",
    description = "prints an encoded record as json"
)]
pub struct SubcInspect {
    #[argh(positional, description = "encoded record")]
    path: PathBuf,

    #[argh(switch, description = "decode as merge inputs instead of a record")]
    inputs: bool,
}

fn main() {
    let args: Args = argh::from_env();
    logging::init(logging::LoggerConfig::with_base_name("rollup-merge-tool"));

    if let Err(e) = main_inner(args) {
        eprintln!("{e}\n{e:?}");
        process::exit(1);
    }
}

fn main_inner(args: Args) -> anyhow::Result<()> {
    match args.subc {
        Subcommand::Merge(subc) => exec_merge(subc, args.hex),
        Subcommand::Aggregate(subc) => exec_aggregate(subc, args.hex),
        Subcommand::Inspect(subc) => exec_inspect(subc, args.hex),
    }
}

fn exec_merge(cmd: SubcMerge, hex_input: bool) -> anyhow::Result<()> {
    let buf = read_input(&cmd.input, hex_input)?;

    let out = match merge_rollup_sim(&buf) {
        Ok(out) => out,
        Err(MergeSimError::Invariant(violation)) => {
            anyhow::bail!("merge failed: {violation}");
        }
        Err(e) => return Err(e.into()),
    };

    write_output(cmd.output.as_deref(), &out)
}

fn exec_aggregate(cmd: SubcAggregate, hex_input: bool) -> anyhow::Result<()> {
    let mut config = match &cmd.config {
        Some(path) => load_config(path)?,
        None => AggregatorConfig::default(),
    };

    if let Some(threads) = parse_env::<usize>(WORKER_THREADS_ENVVAR) {
        debug!(%threads, "overriding worker threads from env");
        config.worker_threads = threads;
    }

    let records = cmd
        .records
        .iter()
        .map(|path| {
            let buf = read_input(path, hex_input)?;
            borsh::from_slice::<RollupPublicRecord>(&buf)
                .map_err(|e| anyhow::anyhow!("failed to decode record {path:?}: {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let root = aggregate_records(records, &config)?;
    write_output(cmd.output.as_deref(), &borsh::to_vec(&root)?)
}

fn exec_inspect(cmd: SubcInspect, hex_input: bool) -> anyhow::Result<()> {
    let buf = read_input(&cmd.path, hex_input)?;

    let json = if cmd.inputs {
        serde_json::to_string_pretty(&borsh::from_slice::<MergeRollupInputs>(&buf)?)?
    } else {
        serde_json::to_string_pretty(&borsh::from_slice::<RollupPublicRecord>(&buf)?)?
    };

    println!("{json}");
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<AggregatorConfig> {
    let raw = fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("invalid config {path:?}: {e}"))
}

fn read_input(path: &Path, hex_input: bool) -> anyhow::Result<Vec<u8>> {
    let raw = fs::read(path)?;
    if !hex_input {
        return Ok(raw);
    }

    let s = String::from_utf8(raw)?;
    let s = s.trim();
    Ok(hex::decode(s.strip_prefix("0x").unwrap_or(s))?)
}

fn write_output(path: Option<&Path>, buf: &[u8]) -> anyhow::Result<()> {
    if let Some(out_path) = path {
        fs::write(out_path, buf)?;
        eprintln!("wrote to file {out_path:?}");
    } else {
        println!("{}", hex::encode(buf));
    }

    Ok(())
}
