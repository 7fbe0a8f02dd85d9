use haddock_prep::{active_passive_to_ambig, ActivePassive, PrepError, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(about = "Convert active/passive residue files to ambiguous restraints")]
pub(crate) struct Args {
    /// Active/passive file of the first partner (line 1 active, line 2 passive)
    first: PathBuf,

    /// Active/passive file of the second partner
    second: PathBuf,

    /// Segid of the first partner
    #[arg(long, default_value_t = String::from("A"))]
    segid1: String,

    /// Segid of the second partner
    #[arg(long, default_value_t = String::from("B"))]
    segid2: String,

    /// Write the TBL to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    let first = ActivePassive::read(&args.first)?;
    let second = ActivePassive::read(&args.second)?;
    let tbl = active_passive_to_ambig(&first, &second, &args.segid1, &args.segid2);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &tbl).map_err(|e| PrepError::io(path, e))?;
            info!("Ambiguous restraints saved to {}", path.display());
        }
        None => print!("{tbl}"),
    }
    Ok(())
}
