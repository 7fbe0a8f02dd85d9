use haddock_prep::{tidy_up, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::trace;

#[derive(Parser, Debug, Clone)]
#[command(about = "Clean a structure for HADDOCK and put it on a single chain")]
pub(crate) struct Args {
    /// Structure to tidy
    input: PathBuf,

    /// Tidied PDB file
    output: PathBuf,

    /// Chain and segment id of the result
    #[arg(short, long, default_value_t = String::from("B"))]
    chain: String,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");
    tidy_up(&args.input, &args.output, &args.chain)?;
    Ok(())
}
