use haddock_prep::{extract_fasta, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(about = "Extract chain sequences from a PDB file or a folder of PDB files")]
pub(crate) struct Args {
    /// PDB file or folder
    pdb: PathBuf,

    /// FASTA file, or folder when `pdb` is a folder
    #[arg(value_name = "WHERE")]
    where_to: PathBuf,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");
    let written = extract_fasta(&args.pdb, &args.where_to)?;
    info!("Sequences saved to {}", written.display());
    Ok(())
}
