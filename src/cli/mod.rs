pub(crate) mod access;
pub(crate) mod ambig;
pub(crate) mod extract_fasta;
pub(crate) mod extract_fv;
pub(crate) mod process;
pub(crate) mod restrain;
pub(crate) mod run_param;
pub(crate) mod start;
pub(crate) mod tidy;

use haddock_prep::{ExternalNumbering, NumberingOptions, SasaOptions};
use std::path::PathBuf;

/// Options of the antibody numbering scripts.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct NumberingArgs {
    /// Python interpreter running the antibody scripts
    #[arg(long, default_value = "python")]
    python: PathBuf,

    /// Folder containing ImmunoPDB.py and ab_haddock_format.py
    #[arg(long = "antibody-tools", alias = "antibody_tools", default_value = "haddock-antibody")]
    antibody_tools: PathBuf,

    /// Numbering scheme
    #[arg(long, default_value_t = String::from("c"))]
    scheme: String,

    /// Use only the Fv region
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    fvonly: bool,

    /// Rename the antibody chains
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    rename: bool,

    /// Split single-chain Fv antibodies
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    splitscfv: bool,

    /// Chain to extract active regions from
    #[arg(long, default_value_t = String::from("A"))]
    chain: String,

    /// Delete intermediate files
    #[arg(
        long = "delete-intermediate",
        alias = "delete_intermediate",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    delete_intermediate: bool,
}

impl NumberingArgs {
    pub(crate) fn numbering(&self) -> ExternalNumbering {
        ExternalNumbering::new(
            self.python.clone(),
            self.antibody_tools.clone(),
            NumberingOptions {
                scheme: self.scheme.clone(),
                fvonly: self.fvonly,
                rename: self.rename,
                splitscfv: self.splitscfv,
                chain: self.chain.clone(),
                delete_intermediate: self.delete_intermediate,
            },
        )
    }
}

/// Options of the accessibility calculation.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct SasaArgs {
    /// Probe radius r (smaller r detects more surface details and reports a larger surface)
    #[arg(short = 'r', long = "probe-radius", default_value_t = 1.4)]
    probe_radius: f32,

    /// Number of points on the sphere for sampling
    #[arg(short = 'n', long = "num-points", default_value_t = 100)]
    n_points: usize,
}

impl SasaArgs {
    pub(crate) fn options(&self) -> SasaOptions {
        SasaOptions {
            probe_radius: self.probe_radius,
            n_points: self.n_points,
        }
    }
}
