use haddock_prep::{build_restraints, get_bodies, make_tbl, read_structure, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(about = "Generate restraints keeping the bodies of a structure together")]
pub(crate) struct Args {
    /// Antibody PDB file
    #[arg(short = 'i', long = "antibody")]
    antibody: PathBuf,

    /// Write the TBL to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chains to leave out of the restraints
    #[arg(short = 'x', long, value_delimiter = ',')]
    exclude: Vec<String>,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    let atoms = read_structure(&args.antibody, &args.exclude)?;
    let bodies = get_bodies(&atoms)?;
    let restraints = build_restraints(&atoms, &bodies);
    info!(
        "Built {} restraints between {} bodies",
        restraints.len(),
        bodies.len()
    );
    let tbl = make_tbl(&atoms, &restraints);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &tbl).map_err(|e| haddock_prep::PrepError::io(path, e))?;
            info!("Restraints saved to {}", path.display());
        }
        None => print!("{tbl}"),
    }
    Ok(())
}
