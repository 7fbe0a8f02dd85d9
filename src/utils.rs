use crate::error::{PrepError, Result};
use crate::residues::ResidueExt;
use pdbtbx::*;
use polars::prelude::*;
use std::path::Path;
use tracing::{error, warn};

/// Open an atomic data file with [`pdbtbx::ReadOptions`] and remove non-protein residues.
///
/// Parser warnings are returned alongside the structure so callers can decide how
/// loudly to report them; breaking errors become a [`PrepError::Structure`].
pub fn load_model(input_file: &Path) -> Result<(PDB, Vec<PDBError>)> {
    let (mut pdb, errors) = open_structure(input_file)?;

    // Remove non-protein residues from model
    pdb.remove_residues_by(|res| res.resn().is_none());

    Ok((pdb, errors))
}

/// Open an atomic data file keeping every residue, nucleic acids included.
pub fn open_structure(input_file: &Path) -> Result<(PDB, Vec<PDBError>)> {
    let path_str = input_file
        .to_str()
        .ok_or_else(|| PrepError::Argument(format!("non UTF-8 path {input_file:?}")))?;

    pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(path_str)
        .map_err(|errors| PrepError::Structure {
            path: input_file.to_path_buf(),
            message: errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        })
}

/// Load a model and forward the parser warnings to the log.
pub fn load_model_logged(input_file: &Path) -> Result<PDB> {
    let (pdb, pdb_warnings) = load_model(input_file)?;
    pdb_warnings.iter().for_each(|e| match e.level() {
        ErrorLevel::BreakingError | ErrorLevel::InvalidatingError => error!("{e}"),
        _ => warn!("{e}"),
    });
    Ok(pdb)
}

/// Parse residue numbers separated by commas and/or whitespace, e.g. `31,32,33` or `31 32 33`.
pub fn parse_residue_list(text: &str) -> Result<Vec<isize>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<isize>()
                .map_err(|_| PrepError::ResidueNumber(s.to_string()))
        })
        .collect()
}

/// Format residue numbers the way HADDOCK active/passive files expect them.
pub fn join_residues(residues: &[isize]) -> String {
    residues
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| PrepError::io(path, e))
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| PrepError::io(path, e))
}

pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| PrepError::io(path, e))
}

/// Replace the `.pdb` suffix of a file name, e.g. `4G6K.pdb` + `_tidy.pdb` -> `4G6K_tidy.pdb`.
pub fn with_pdb_suffix(path: &Path, suffix: &str) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}{suffix}")
}

/// Write a DataFrame to a file, using the extension of the chosen format.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<()> {
    let file_path = file_path.with_extension(file_type.to_string());
    let mut file = std::fs::File::create(&file_path).map_err(|e| PrepError::io(&file_path, e))?;
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(())
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residue_lists_accept_commas_and_spaces() {
        assert_eq!(parse_residue_list("31,32,33").unwrap(), vec![31, 32, 33]);
        assert_eq!(parse_residue_list("31 32\n33\n").unwrap(), vec![31, 32, 33]);
        assert_eq!(parse_residue_list(" 1, 2 ,3,").unwrap(), vec![1, 2, 3]);
        assert!(parse_residue_list("").unwrap().is_empty());
    }

    #[test]
    fn bad_residue_numbers_are_rejected() {
        let err = parse_residue_list("31,abc").unwrap_err();
        assert!(matches!(err, PrepError::ResidueNumber(ref s) if s == "abc"));
    }

    #[test]
    fn residues_are_space_joined() {
        assert_eq!(join_residues(&[1, 5, 10]), "1 5 10");
        assert_eq!(join_residues(&[]), "");
    }

    #[test]
    fn pdb_suffix_replaces_extension() {
        assert_eq!(
            with_pdb_suffix(Path::new("/data/4I1B.pdb"), "_tidy.pdb"),
            "4I1B_tidy.pdb"
        );
        assert_eq!(
            with_pdb_suffix(Path::new("4G6K.pdb"), "_active.txt"),
            "4G6K_active.txt"
        );
    }

    #[test]
    fn missing_files_are_reported_with_their_path() {
        let err = load_model(Path::new("/definitely/not/here.pdb")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.pdb"));
    }
}
