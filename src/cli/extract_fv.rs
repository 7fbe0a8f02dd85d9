use super::NumberingArgs;
use haddock_prep::{extract_fv, ExtractMode, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(about = "Extract Fv regions and sequences from every antibody of a folder")]
pub(crate) struct Args {
    /// Folder with antibody PDB files (subfolders are processed too)
    folder: PathBuf,

    /// Output folder to store results
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// What to produce for each structure
    #[arg(short, long, value_enum, default_value_t = ExtractMode::All)]
    mode: ExtractMode,

    #[command(flatten)]
    numbering: NumberingArgs,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");
    let output = extract_fv(
        &args.folder,
        &args.output,
        args.mode,
        &args.numbering.numbering(),
    )?;
    info!("Results saved to {}", output.display());
    Ok(())
}
