use super::SasaArgs;
use haddock_prep::{
    accessibility_to_df, apply_cutoff, get_accessibility, join_residues, load_model,
    write_df_to_file, DataFrameFileType, Result,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(about = "List the solvent accessible residues of a structure")]
pub(crate) struct Args {
    /// PDB file to compute accessibility for
    #[arg(short = 'i', long = "pdb")]
    pdb: PathBuf,

    /// Relative side-chain accessibility cutoff (0.15 = 15%)
    #[arg(short, long, default_value_t = 0.15)]
    cutoff: f64,

    /// Report every chain instead of the first one only
    #[arg(long, default_value_t = false)]
    all_chains: bool,

    /// Also save the per-residue accessibility table to this path
    #[arg(long)]
    table: Option<PathBuf>,

    /// Output file type of the table
    #[arg(short = 't', long, value_enum, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    #[command(flatten)]
    sasa: SasaArgs,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    let (pdb, pdb_warnings) = load_model(&args.pdb)?;
    pdb_warnings.iter().for_each(|e| match e.level() {
        pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
        pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
        _ => warn!("{e}"),
    });

    let access_data = get_accessibility(&pdb, &args.sasa.options());
    if access_data.is_empty() {
        warn!("No protein residues found in {}", args.pdb.display());
    }

    if let Some(table) = &args.table {
        let mut df = accessibility_to_df(&access_data)?;
        debug!("Accessibility of {} residues\n{}", df.height(), df);
        write_df_to_file(&mut df, table, args.output_format)?;
        info!("Accessibility table saved to {}", table.display());
    }

    let selected = apply_cutoff(&access_data, args.cutoff);
    let shown = if args.all_chains { selected.len() } else { 1 };
    for chain in selected.iter().take(shown) {
        if args.all_chains {
            println!("{}: {}", chain.chain, join_residues(&chain.residues));
        } else {
            println!("{}", join_residues(&chain.residues));
        }
    }
    Ok(())
}
