use haddock_prep::{run_params, PrepError, Result, RunParamsOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, trace};

#[derive(Parser, Debug, Clone)]
#[command(about = "Write a HADDOCK run.param file")]
pub(crate) struct Args {
    /// First docking partner (antibody)
    #[arg(long)]
    antibody: PathBuf,

    /// Second docking partner (antigen)
    #[arg(long)]
    antigen: PathBuf,

    /// Ambiguous restraints
    #[arg(long)]
    ambig: PathBuf,

    /// Unambiguous restraints
    #[arg(long)]
    unambig: PathBuf,

    /// Project folder
    #[arg(long)]
    project: PathBuf,

    /// Folder where HADDOCK is located
    #[arg(long = "haddock-dir", alias = "haddock_dir", env = "HADDOCK_DIR", default_value = haddock_prep::params::DEFAULT_HADDOCK_DIR)]
    haddock_dir: PathBuf,

    /// Number of molecules (N_COMP)
    #[arg(long = "n-comp", alias = "n_comp", default_value_t = 2)]
    n_comp: u32,

    /// Run number
    #[arg(long = "run-number", alias = "run_number", default_value_t = 1)]
    run_number: u32,

    /// Where to write the parameters
    #[arg(short, long, default_value = "run.param")]
    output: PathBuf,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    for path in [&args.antibody, &args.antigen, &args.ambig, &args.unambig, &args.project] {
        if !path.exists() {
            return Err(PrepError::Argument(format!("{} does not exist", path.display())));
        }
    }

    let options = RunParamsOptions {
        haddock_dir: args.haddock_dir.clone(),
        n_comp: args.n_comp,
        run_number: args.run_number,
    };
    let params = run_params(
        &args.antibody,
        &args.antigen,
        &args.ambig,
        &args.unambig,
        &args.project,
        &options,
    )?;
    std::fs::write(&args.output, &params).map_err(|e| PrepError::io(&args.output, e))?;
    info!("run.param written to {}", args.output.display());
    print!("{params}");
    Ok(())
}
