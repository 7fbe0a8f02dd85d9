//! HADDOCK `run.param` files.

use crate::error::{PrepError, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_HADDOCK_DIR: &str = "/data/sources/haddock2.4";
pub const DEFAULT_N_COMP: u32 = 2;
pub const DEFAULT_RUN_NUMBER: u32 = 1;

/// Segment ids assigned to the two docking partners.
pub const PROT_SEGID_1: &str = "A";
pub const PROT_SEGID_2: &str = "B";

/// Settings that are not file locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunParamsOptions {
    pub haddock_dir: PathBuf,
    pub n_comp: u32,
    pub run_number: u32,
}

impl Default for RunParamsOptions {
    fn default() -> Self {
        Self {
            haddock_dir: PathBuf::from(DEFAULT_HADDOCK_DIR),
            n_comp: DEFAULT_N_COMP,
            run_number: DEFAULT_RUN_NUMBER,
        }
    }
}

/// The content of a `run.param` file with every path absolute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunParams {
    pub ambig_tbl: PathBuf,
    pub haddock_dir: PathBuf,
    pub n_comp: u32,
    pub pdb_file1: PathBuf,
    pub pdb_file2: PathBuf,
    pub project_dir: PathBuf,
    pub run_number: u32,
    pub unambig_tbl: PathBuf,
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| PrepError::io(path, e))
}

impl RunParams {
    /// Gather the parameters, resolving every path against the current directory.
    pub fn new(
        a: &Path,
        b: &Path,
        ambig: &Path,
        unambig: &Path,
        project: &Path,
        options: &RunParamsOptions,
    ) -> Result<Self> {
        Ok(Self {
            ambig_tbl: absolute(ambig)?,
            haddock_dir: absolute(&options.haddock_dir)?,
            n_comp: options.n_comp,
            pdb_file1: absolute(a)?,
            pdb_file2: absolute(b)?,
            project_dir: absolute(project)?,
            run_number: options.run_number,
            unambig_tbl: absolute(unambig)?,
        })
    }

    /// Same as [`RunParams::new`], with every input file moved into the project directory.
    pub fn in_project(
        project: &Path,
        a: &Path,
        b: &Path,
        ambig: &Path,
        unambig: &Path,
        options: &RunParamsOptions,
    ) -> Result<Self> {
        let rebase = |p: &Path| -> Result<PathBuf> {
            let name = p
                .file_name()
                .ok_or_else(|| PrepError::Argument(format!("{} has no file name", p.display())))?;
            Ok(project.join(name))
        };
        Self::new(
            &rebase(a)?,
            &rebase(b)?,
            &rebase(ambig)?,
            &rebase(unambig)?,
            project,
            options,
        )
    }

    /// Render as `KEY=value` lines in HADDOCK's order.
    pub fn render(&self) -> String {
        format!(
            "AMBIG_TBL={}\n\
             HADDOCK_DIR={}\n\
             N_COMP={}\n\
             PDB_FILE1={}\n\
             PDB_FILE2={}\n\
             PROJECT_DIR={}\n\
             PROT_SEGID_1={}\n\
             PROT_SEGID_2={}\n\
             RUN_NUMBER={}\n\
             UNAMBIG_TBL={}\n",
            self.ambig_tbl.display(),
            self.haddock_dir.display(),
            self.n_comp,
            self.pdb_file1.display(),
            self.pdb_file2.display(),
            self.project_dir.display(),
            PROT_SEGID_1,
            PROT_SEGID_2,
            self.run_number,
            self.unambig_tbl.display(),
        )
    }
}

/// Render the `run.param` text for a pair of prepared structures.
pub fn run_params(
    a: &Path,
    b: &Path,
    ambig: &Path,
    unambig: &Path,
    project: &Path,
    options: &RunParamsOptions,
) -> Result<String> {
    Ok(RunParams::new(a, b, ambig, unambig, project, options)?.render())
}

/// Render the `run.param` text with all files located inside `project`.
pub fn run_params_in_project(
    project: &Path,
    a: &Path,
    b: &Path,
    ambig: &Path,
    unambig: &Path,
    options: &RunParamsOptions,
) -> Result<String> {
    Ok(RunParams::in_project(project, a, b, ambig, unambig, options)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_param_keys_in_order() {
        let options = RunParamsOptions::default();
        let text = run_params(
            Path::new("/work/4G6K_HADDOCK.pdb"),
            Path::new("/work/4I1B_tidy.pdb"),
            Path::new("/work/ambig.tbl"),
            Path::new("/work/unambig.tbl"),
            Path::new("/work"),
            &options,
        )
        .unwrap();
        assert_eq!(
            text,
            "AMBIG_TBL=/work/ambig.tbl
HADDOCK_DIR=/data/sources/haddock2.4
N_COMP=2
PDB_FILE1=/work/4G6K_HADDOCK.pdb
PDB_FILE2=/work/4I1B_tidy.pdb
PROJECT_DIR=/work
PROT_SEGID_1=A
PROT_SEGID_2=B
RUN_NUMBER=1
UNAMBIG_TBL=/work/unambig.tbl
"
        );
    }

    #[test]
    fn relative_paths_become_absolute() {
        let params = RunParams::new(
            Path::new("a.pdb"),
            Path::new("b.pdb"),
            Path::new("ambig.tbl"),
            Path::new("unambig.tbl"),
            Path::new("output"),
            &RunParamsOptions::default(),
        )
        .unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(params.pdb_file1, cwd.join("a.pdb"));
        assert_eq!(params.project_dir, cwd.join("output"));
        assert!(params.haddock_dir.is_absolute());
    }

    #[test]
    fn project_variant_rebases_files() {
        let options = RunParamsOptions {
            haddock_dir: PathBuf::from("/opt/haddock"),
            n_comp: 3,
            run_number: 7,
        };
        let params = RunParams::in_project(
            Path::new("/projects/run1"),
            Path::new("output/4G6K_HADDOCK.pdb"),
            Path::new("output/4I1B_tidy.pdb"),
            Path::new("output/antibody-antigen-ambig.tbl"),
            Path::new("output/antibody-unambig.tbl"),
            &options,
        )
        .unwrap();
        assert_eq!(params.pdb_file1, PathBuf::from("/projects/run1/4G6K_HADDOCK.pdb"));
        assert_eq!(params.pdb_file2, PathBuf::from("/projects/run1/4I1B_tidy.pdb"));
        assert_eq!(
            params.ambig_tbl,
            PathBuf::from("/projects/run1/antibody-antigen-ambig.tbl")
        );
        assert_eq!(params.project_dir, PathBuf::from("/projects/run1"));

        let text = params.render();
        assert!(text.contains("N_COMP=3\n"));
        assert!(text.contains("RUN_NUMBER=7\n"));
        assert!(text.contains("HADDOCK_DIR=/opt/haddock\n"));
    }
}
