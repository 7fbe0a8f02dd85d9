use super::{NumberingArgs, SasaArgs};
use haddock_prep::{start, DataFrameFileType, Result, RunParamsOptions, StartOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(about = "Prepare a complete antibody-antigen HADDOCK run")]
pub(crate) struct Args {
    /// Antibody PDB file, for example 4G6K.pdb
    #[arg(long)]
    antibody: PathBuf,

    /// Antigen PDB file
    #[arg(long)]
    antigen: PathBuf,

    /// Output folder to store results
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Project folder HADDOCK will run in (defaults to the output folder)
    #[arg(long)]
    project: Option<PathBuf>,

    /// Relative side-chain accessibility cutoff of the antibody
    #[arg(long, default_value_t = 0.15)]
    cutoff: f64,

    /// Relative side-chain accessibility cutoff of the antigen
    #[arg(long = "antigen-cutoff", alias = "antigen_cutoff", default_value_t = 0.15)]
    antigen_cutoff: f64,

    /// Folder where HADDOCK is located
    #[arg(long = "haddock-dir", alias = "haddock_dir", env = "HADDOCK_DIR", default_value = haddock_prep::params::DEFAULT_HADDOCK_DIR)]
    haddock_dir: PathBuf,

    /// Number of molecules (N_COMP)
    #[arg(long = "n-comp", alias = "n_comp", default_value_t = 2)]
    n_comp: u32,

    /// Run number
    #[arg(long = "run-number", alias = "run_number", default_value_t = 1)]
    run_number: u32,

    /// Also save the per-residue accessibility tables in this format
    #[arg(long = "accessibility-table", value_enum)]
    accessibility_table: Option<DataFrameFileType>,

    #[command(flatten)]
    numbering: NumberingArgs,

    #[command(flatten)]
    sasa: SasaArgs,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    let options = StartOptions {
        project: args.project.clone(),
        cutoff: args.cutoff,
        antigen_cutoff: args.antigen_cutoff,
        sasa: args.sasa.options(),
        run: RunParamsOptions {
            haddock_dir: args.haddock_dir.clone(),
            n_comp: args.n_comp,
            run_number: args.run_number,
        },
        accessibility_table: args.accessibility_table,
        ..StartOptions::new(
            args.antibody.clone(),
            args.antigen.clone(),
            args.output.clone(),
        )
    };
    let outputs = start(&options, &args.numbering.numbering())?;
    info!("HADDOCK run prepared in {}", outputs.run_param.display());
    Ok(())
}
