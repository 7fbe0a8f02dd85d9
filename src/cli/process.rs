use super::NumberingArgs;
use haddock_prep::{process, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(about = "Number antibodies and convert them for HADDOCK")]
pub(crate) struct Args {
    /// PDB file or a folder with PDB files, e.g. 4G6K.pdb or my_antibodies
    #[arg(short = 'i', long)]
    antibody: PathBuf,

    /// Output folder to store results
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    #[command(flatten)]
    numbering: NumberingArgs,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");
    let processed = process(&args.antibody, &args.output, &args.numbering.numbering())?;
    for antibody in &processed {
        println!("TBL of {}:", antibody.input.display());
        print!("{}", antibody.restraints);
        info!(
            "{} numbered into {}",
            antibody.input.display(),
            antibody.numbered.pdb.display()
        );
    }
    Ok(())
}
