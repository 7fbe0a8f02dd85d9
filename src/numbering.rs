//! Antibody numbering and conversion to a HADDOCK-ready antibody.
//!
//! Numbering itself is done by the external `ImmunoPDB.py` and
//! `ab_haddock_format.py` scripts of the HADDOCK antibody tools; this module
//! only drives them and checks their results.

use crate::error::{PrepError, Result};
use crate::utils::{with_pdb_suffix, write_text};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

pub const IMMUNO_PDB: &str = "ImmunoPDB.py";
pub const AB_HADDOCK_FORMAT: &str = "ab_haddock_format.py";

/// Options forwarded to the numbering tools.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberingOptions {
    /// Numbering scheme, e.g. `c` for Chothia
    pub scheme: String,
    /// Keep only the variable (Fv) region
    pub fvonly: bool,
    /// Rename chains to H and L
    pub rename: bool,
    /// Split single-chain Fv into separate chains
    pub splitscfv: bool,
    /// Chain id of the HADDOCK-formatted antibody
    pub chain: String,
    /// Remove the numbered intermediate structure
    pub delete_intermediate: bool,
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            scheme: "c".to_string(),
            fvonly: true,
            rename: true,
            splitscfv: true,
            chain: "A".to_string(),
            delete_intermediate: false,
        }
    }
}

/// Outputs of the numbering step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberedAntibody {
    /// HADDOCK-formatted antibody structure
    pub pdb: PathBuf,
    /// Comma-separated hypervariable loop residues
    pub active: PathBuf,
}

impl NumberedAntibody {
    /// File locations for the antibody `input` inside `output_dir`.
    pub fn locate(input: &Path, output_dir: &Path) -> Self {
        Self {
            pdb: output_dir.join(with_pdb_suffix(input, "_HADDOCK.pdb")),
            active: output_dir.join(with_pdb_suffix(input, "_active.txt")),
        }
    }
}

/// Turns an antibody structure into a HADDOCK-ready structure and its active residues.
pub trait AntibodyNumbering {
    fn number(&self, input: &Path, output_dir: &Path) -> Result<NumberedAntibody>;
}

/// Numbering through the HADDOCK antibody scripts.
#[derive(Clone, Debug)]
pub struct ExternalNumbering {
    /// Python interpreter used to run the scripts
    pub python: PathBuf,
    /// Folder holding `ImmunoPDB.py` and `ab_haddock_format.py`
    pub tools_dir: PathBuf,
    pub options: NumberingOptions,
}

impl ExternalNumbering {
    pub fn new(python: PathBuf, tools_dir: PathBuf, options: NumberingOptions) -> Self {
        Self {
            python,
            tools_dir,
            options,
        }
    }

    /// Arguments for `ImmunoPDB.py`.
    pub fn immuno_args(&self, input: &Path, numbered: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.tools_dir.join(IMMUNO_PDB).into(),
            "-i".into(),
            input.into(),
            "-o".into(),
            numbered.into(),
            "--scheme".into(),
            self.options.scheme.clone().into(),
        ];
        for (enabled, flag) in [
            (self.options.fvonly, "--fvonly"),
            (self.options.rename, "--rename"),
            (self.options.splitscfv, "--splitscfv"),
        ] {
            if enabled {
                args.push(flag.into());
            }
        }
        args
    }

    /// Arguments for `ab_haddock_format.py`.
    pub fn format_args(&self, numbered: &Path, formatted: &Path) -> Vec<OsString> {
        vec![
            self.tools_dir.join(AB_HADDOCK_FORMAT).into(),
            numbered.into(),
            formatted.into(),
            self.options.chain.clone().into(),
        ]
    }

    fn run(&self, tool: &str, args: &[OsString]) -> Result<String> {
        debug!("Running {} {:?}", self.python.display(), args);
        let output = Command::new(&self.python)
            .args(args)
            .output()
            .map_err(|e| PrepError::io(&self.python, e))?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(PrepError::ExternalTool {
                tool: tool.to_string(),
                status: output.status.to_string(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            debug!("{tool}: {stderr}");
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl AntibodyNumbering for ExternalNumbering {
    fn number(&self, input: &Path, output_dir: &Path) -> Result<NumberedAntibody> {
        let numbered = output_dir.join(with_pdb_suffix(input, "_ch.pdb"));
        let result = NumberedAntibody::locate(input, output_dir);
        info!(
            "Numbering {} with scheme '{}'",
            input.display(),
            self.options.scheme
        );

        self.run(IMMUNO_PDB, &self.immuno_args(input, &numbered))?;
        let active = self.run(AB_HADDOCK_FORMAT, &self.format_args(&numbered, &result.pdb))?;
        write_text(&result.active, active.trim())?;

        if self.options.delete_intermediate {
            if let Err(e) = std::fs::remove_file(&numbered) {
                warn!("Could not delete {}: {e}", numbered.display());
            }
        }
        if !result.pdb.exists() {
            return Err(PrepError::ExternalTool {
                tool: AB_HADDOCK_FORMAT.to_string(),
                status: "success".to_string(),
                stderr: format!("{} was not written", result.pdb.display()),
            });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_locations_follow_input_name() {
        let located = NumberedAntibody::locate(Path::new("/in/4G6K.pdb"), Path::new("out"));
        assert_eq!(located.pdb, PathBuf::from("out/4G6K_HADDOCK.pdb"));
        assert_eq!(located.active, PathBuf::from("out/4G6K_active.txt"));
    }

    #[test]
    fn immuno_flags_follow_options() {
        let mut options = NumberingOptions::default();
        options.rename = false;
        options.scheme = "k".to_string();
        let numbering =
            ExternalNumbering::new(PathBuf::from("python"), PathBuf::from("/tools"), options);
        let args = numbering.immuno_args(Path::new("ab.pdb"), Path::new("ab_ch.pdb"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "/tools/ImmunoPDB.py",
                "-i",
                "ab.pdb",
                "-o",
                "ab_ch.pdb",
                "--scheme",
                "k",
                "--fvonly",
                "--splitscfv"
            ]
        );
    }

    #[test]
    fn format_args_end_with_chain() {
        let numbering = ExternalNumbering::new(
            PathBuf::from("python3"),
            PathBuf::from("tools"),
            NumberingOptions::default(),
        );
        let args = numbering.format_args(Path::new("ab_ch.pdb"), Path::new("ab_HADDOCK.pdb"));
        assert_eq!(args.len(), 4);
        assert_eq!(args[0], OsString::from("tools/ab_haddock_format.py"));
        assert_eq!(args[3], OsString::from("A"));
    }

    #[test]
    fn missing_interpreter_is_an_io_error() {
        let numbering = ExternalNumbering::new(
            PathBuf::from("/nonexistent/python-for-tests"),
            PathBuf::from("tools"),
            NumberingOptions::default(),
        );
        let dir = tempfile::tempdir().unwrap();
        let err = numbering
            .number(Path::new("ab.pdb"), dir.path())
            .unwrap_err();
        assert!(matches!(err, PrepError::Io { .. }));
    }
}
