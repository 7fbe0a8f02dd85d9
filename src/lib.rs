//! # haddock-prep
//!
//! Preparation of antibody-antigen docking runs for HADDOCK.
//!
//! The library reads antibody and antigen structures, derives the restraints
//! HADDOCK needs and writes them in HADDOCK's text formats:
//!
//! - body restraints keeping the antibody's chains together (unambiguous `.tbl`),
//! - solvent accessible residues selected with a relative side-chain cutoff,
//! - ambiguous interaction restraints between active and passive residues,
//! - the `run.param` file tying everything together.
//!
//! Antibody numbering is delegated to the HADDOCK antibody scripts through the
//! [`AntibodyNumbering`] trait.

pub mod accessibility;
pub mod ambig;
mod chains;
pub mod error;
pub mod numbering;
pub mod params;
pub mod pipeline;
pub mod residues;
pub mod restraints;
pub mod sequences;
pub mod tidy;
mod utils;

// Re-export key public types
pub use accessibility::{
    access, accessibility_to_df, apply_cutoff, get_accessibility, ChainResidues,
    ResidueAccessibility, SasaOptions,
};
pub use ambig::{active_passive_to_ambig, ActivePassive};
pub use chains::ChainExt;
pub use error::{PrepError, Result};
pub use numbering::{AntibodyNumbering, ExternalNumbering, NumberedAntibody, NumberingOptions};
pub use params::{run_params, run_params_in_project, RunParams, RunParamsOptions};
pub use pipeline::{
    extract_fv, process, start, ExtractMode, ProcessedAntibody, StartOptions, StartOutputs,
};
pub use restraints::{
    build_restraints, calc_euclidean, get_bodies, make_tbl, read_structure, restrain, AtomRecord,
    Body, Restraint,
};
pub use sequences::{extract_fasta, get_sequences, write_fasta};
pub use tidy::tidy_up;
pub use utils::{
    join_residues, load_model, parse_residue_list, write_df_to_file, DataFrameFileType,
};
