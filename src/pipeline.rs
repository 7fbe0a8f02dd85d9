//! End-to-end preparation of an antibody-antigen docking run.

use crate::accessibility::{accessibility_to_df, apply_cutoff, get_accessibility, SasaOptions};
use crate::ambig::{active_passive_to_ambig, ActivePassive};
use crate::error::{PrepError, Result};
use crate::numbering::{AntibodyNumbering, NumberedAntibody};
use crate::params::{run_params, run_params_in_project, RunParamsOptions, PROT_SEGID_1, PROT_SEGID_2};
use crate::restraints::restrain;
use crate::sequences::write_fasta;
use crate::tidy::tidy_up;
use crate::utils::{
    create_dir, load_model_logged, parse_residue_list, read_text, with_pdb_suffix,
    write_df_to_file, write_text, DataFrameFileType,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const UNAMBIG_TBL: &str = "antibody-unambig.tbl";
pub const AMBIG_TBL: &str = "antibody-antigen-ambig.tbl";
pub const RUN_PARAM: &str = "run.param";

/// Everything `start` needs besides the numbering tool.
#[derive(Clone, Debug)]
pub struct StartOptions {
    pub antibody: PathBuf,
    pub antigen: PathBuf,
    pub output: PathBuf,
    /// Project folder HADDOCK will run in; defaults to `output`
    pub project: Option<PathBuf>,
    /// Relative side-chain accessibility cutoff for the antibody (fraction)
    pub cutoff: f64,
    /// Relative side-chain accessibility cutoff for the antigen (fraction)
    pub antigen_cutoff: f64,
    pub sasa: SasaOptions,
    pub run: RunParamsOptions,
    /// Also save the per-residue accessibility tables in this format
    pub accessibility_table: Option<DataFrameFileType>,
}

impl StartOptions {
    pub fn new(antibody: PathBuf, antigen: PathBuf, output: PathBuf) -> Self {
        Self {
            antibody,
            antigen,
            output,
            project: None,
            cutoff: 0.15,
            antigen_cutoff: 0.15,
            sasa: SasaOptions::default(),
            run: RunParamsOptions::default(),
            accessibility_table: None,
        }
    }
}

/// Files written by [`start`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartOutputs {
    pub antibody: NumberedAntibody,
    pub antigen: PathBuf,
    pub unambig: PathBuf,
    pub ambig: PathBuf,
    pub antibody_active_passive: PathBuf,
    pub antigen_active_passive: PathBuf,
    pub run_param: PathBuf,
}

/// Accessible residues of the first chain, optionally saving the full table.
fn accessible_residues(
    pdb_path: &Path,
    cutoff: f64,
    options: &StartOptions,
    table_path: &Path,
) -> Result<Vec<isize>> {
    let pdb = load_model_logged(pdb_path)?;
    let access_data = get_accessibility(&pdb, &options.sasa);
    if let Some(file_type) = options.accessibility_table {
        let mut df = accessibility_to_df(&access_data)?;
        write_df_to_file(&mut df, table_path, file_type)?;
        debug!("Accessibility table of {}\n{}", pdb_path.display(), df);
    }
    Ok(apply_cutoff(&access_data, cutoff)
        .into_iter()
        .next()
        .map(|c| c.residues)
        .unwrap_or_default())
}

/// Sorted residues present in both lists.
fn intersect(a: &[isize], b: &[isize]) -> Vec<isize> {
    let mut common: Vec<isize> = a.iter().copied().filter(|r| b.contains(r)).collect();
    common.sort_unstable();
    common.dedup();
    common
}

/// Prepare every input HADDOCK needs to dock `antibody` against `antigen`.
///
/// The antibody's active residues are the numbering tool's hypervariable loop
/// residues that are also solvent accessible; the antigen contributes its
/// accessible residues as passive residues.
pub fn start(options: &StartOptions, numbering: &dyn AntibodyNumbering) -> Result<StartOutputs> {
    info!(
        "Preparing {} antibody and {} antigen, output is {}",
        options.antibody.display(),
        options.antigen.display(),
        options.output.display()
    );
    let output = options.output.as_path();
    create_dir(output)?;

    let numbered = numbering.number(&options.antibody, output)?;

    let unambig = output.join(UNAMBIG_TBL);
    write_text(&unambig, &restrain(&numbered.pdb)?)?;
    info!("Body restraints written to {}", unambig.display());

    let loop_residues = parse_residue_list(&read_text(&numbered.active)?)?;
    debug!("Hypervariable loop residues: {loop_residues:?}");
    let accessible = accessible_residues(
        &numbered.pdb,
        options.cutoff,
        options,
        &output.join(with_pdb_suffix(&options.antibody, "_antibody_accessibility")),
    )?;
    let antibody = ActivePassive::new(intersect(&loop_residues, &accessible), Vec::new());
    info!("Active residues of the antibody are: {:?}", antibody.active);

    let antibody_active_passive =
        output.join(with_pdb_suffix(&options.antibody, "_antibody_active_passive.txt"));
    antibody.write(&antibody_active_passive)?;

    let antigen_path = output.join(with_pdb_suffix(&options.antigen, "_tidy.pdb"));
    tidy_up(&options.antigen, &antigen_path, PROT_SEGID_2)?;
    let passive = accessible_residues(
        &antigen_path,
        options.antigen_cutoff,
        options,
        &output.join(with_pdb_suffix(&options.antigen, "_antigen_accessibility")),
    )?;
    let antigen = ActivePassive::new(Vec::new(), passive);
    info!("Passive residues of the antigen are: {:?}", antigen.passive);

    let antigen_active_passive =
        output.join(with_pdb_suffix(&antigen_path, "_antigen_active_passive.txt"));
    antigen.write(&antigen_active_passive)?;

    let ambig = output.join(AMBIG_TBL);
    write_text(
        &ambig,
        &active_passive_to_ambig(&antibody, &antigen, PROT_SEGID_1, PROT_SEGID_2),
    )?;

    let run_str = match &options.project {
        None => run_params(
            &numbered.pdb,
            &antigen_path,
            &ambig,
            &unambig,
            output,
            &options.run,
        )?,
        Some(project) => run_params_in_project(
            project,
            &numbered.pdb,
            &antigen_path,
            &ambig,
            &unambig,
            &options.run,
        )?,
    };
    let run_param = output.join(RUN_PARAM);
    info!("Writing run parameters to {}", run_param.display());
    write_text(&run_param, &run_str)?;

    Ok(StartOutputs {
        antibody: numbered,
        antigen: antigen_path,
        unambig,
        ambig,
        antibody_active_passive,
        antigen_active_passive,
        run_param,
    })
}

/// What `extract_fv` produces for each structure.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractMode {
    /// Number the antibody and extract the sequences of the result
    All,
    /// Only extract sequences from the input structures
    #[value(alias = "just_fasta")]
    JustFasta,
    /// Only number the antibodies
    #[value(alias = "no_fasta")]
    NoFasta,
}

fn list_dir(path: &Path) -> Result<Vec<PathBuf>> {
    let mut children = std::fs::read_dir(path)
        .map_err(|e| PrepError::io(path, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()
        .map_err(|e| PrepError::io(path, e))?;
    children.sort();
    Ok(children)
}

/// Whether `path` is a folder with at least one entry. Unreadable folders are logged and skipped.
fn has_entries(path: &Path) -> bool {
    match list_dir(path) {
        Ok(children) => !children.is_empty(),
        Err(e) => {
            error!("Skipping folder {}: {e}", path.display());
            false
        }
    }
}

fn is_pdb_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().contains("pdb"))
}

fn extract_one(
    child: &Path,
    output: &Path,
    mode: ExtractMode,
    numbering: &dyn AntibodyNumbering,
) -> Result<()> {
    let pdb = match mode {
        ExtractMode::JustFasta => child.to_path_buf(),
        _ => numbering.number(child, output)?.pdb,
    };
    if mode != ExtractMode::NoFasta {
        let label = with_pdb_suffix(&pdb, "");
        let fasta = output.join(with_pdb_suffix(&pdb, ".fasta"));
        write_fasta(&pdb, &fasta, &label)?;
    }
    Ok(())
}

/// Extract variable regions (and their sequences) from every structure under `folder`.
///
/// Subfolders are mirrored into `output`. A structure that fails is logged and
/// skipped so one bad file does not stop the batch.
pub fn extract_fv(
    folder: &Path,
    output: &Path,
    mode: ExtractMode,
    numbering: &dyn AntibodyNumbering,
) -> Result<PathBuf> {
    info!(
        "extract_fv for {}, the results will be extracted to {}",
        folder.display(),
        output.display()
    );
    create_dir(output)?;

    for child in list_dir(folder)? {
        let output_subpath = output.join(child.file_name().unwrap_or_default());
        if child.is_dir() && !child.is_symlink() && has_entries(&child) {
            extract_fv(&child, &output_subpath, mode, numbering)?;
        } else if is_pdb_file(&child) {
            debug!("Processing {}", child.display());
            if let Err(e) = extract_one(&child, output, mode, numbering) {
                error!("pdb {} FAILED: {e}", child.display());
                continue;
            }
        }
    }
    Ok(output.to_path_buf())
}

/// An antibody that went through [`process`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedAntibody {
    pub input: PathBuf,
    /// Body restraints of the input structure in TBL format
    pub restraints: String,
    pub numbered: NumberedAntibody,
}

/// Number one antibody file, or every antibody file of a folder, into `output`.
pub fn process(
    input: &Path,
    output: &Path,
    numbering: &dyn AntibodyNumbering,
) -> Result<Vec<ProcessedAntibody>> {
    create_dir(output)?;
    let inputs = if input.is_dir() {
        list_dir(input)?
            .into_iter()
            .filter(|p| is_pdb_file(p))
            .collect()
    } else {
        vec![input.to_path_buf()]
    };

    inputs
        .into_iter()
        .map(|path| {
            info!("Processing {}", path.display());
            let restraints = restrain(&path)?;
            let numbered = numbering.number(&path, output)?;
            Ok(ProcessedAntibody {
                input: path,
                restraints,
                numbered,
            })
        })
        .collect()
}
