//! Sequence extraction from protein structures.
//!
//! Chains are written as FASTA records with a `>{label}:{chain}` header, one
//! record per chain of the first model.

use crate::chains::ChainExt;
use crate::error::{PrepError, Result};
use crate::utils::{create_dir, load_model_logged, write_text};
use pdbtbx::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Get sequences of all chains in a PDB structure, in file order.
///
/// # Example
///
/// ```no_run
/// use haddock_prep::{load_model, get_sequences};
/// use std::path::Path;
///
/// let (pdb, _errors) = load_model(Path::new("path/to/structure.pdb")).unwrap();
/// for (chain_id, seq) in get_sequences(&pdb) {
///     println!("Chain {}: {}", chain_id, seq);
/// }
/// ```
pub fn get_sequences(pdb: &PDB) -> Vec<(String, String)> {
    pdb.models()
        .take(1)
        .flat_map(|model| model.chains())
        .map(|chain| (chain.id().to_string(), chain.pdb_seq()))
        .collect()
}

/// Render chain sequences as FASTA text.
pub fn to_fasta(sequences: &[(String, String)], label: &str) -> String {
    sequences
        .iter()
        .map(|(chain, seq)| format!(">{label}:{chain}\n{seq}\n"))
        .collect()
}

/// Write the chain sequences of `pdb_path` to the FASTA file `fasta_path`.
pub fn write_fasta(pdb_path: &Path, fasta_path: &Path, label: &str) -> Result<PathBuf> {
    info!(
        "Extracting fasta from {} to {}",
        pdb_path.display(),
        fasta_path.display()
    );
    let pdb = load_model_logged(pdb_path)?;
    let sequences = get_sequences(&pdb);
    if sequences.is_empty() {
        return Err(PrepError::EmptyStructure {
            path: pdb_path.to_path_buf(),
            what: "protein chains",
        });
    }
    write_text(fasta_path, &to_fasta(&sequences, label))?;
    Ok(fasta_path.to_path_buf())
}

/// Extract FASTA sequences from a PDB file, or from every PDB file of a folder tree.
///
/// For a folder, `where_to` becomes a folder mirroring the input: each `*.pdb`
/// file yields `<stem>.fasta` and each subfolder is processed recursively.
pub fn extract_fasta(pdb_path: &Path, where_to: &Path) -> Result<PathBuf> {
    if !pdb_path.is_dir() {
        return write_fasta(pdb_path, where_to, "");
    }

    create_dir(where_to)?;
    let mut children = std::fs::read_dir(pdb_path)
        .map_err(|e| PrepError::io(pdb_path, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<PathBuf>>>()
        .map_err(|e| PrepError::io(pdb_path, e))?;
    children.sort();

    for child in children {
        if child.is_dir() {
            let name = child.file_name().unwrap_or_default();
            extract_fasta(&child, &where_to.join(name))?;
        } else if child.extension().is_some_and(|ext| ext == "pdb") {
            let stem = child.file_stem().unwrap_or_default();
            let mut target = where_to.join(stem);
            target.set_extension("fasta");
            extract_fasta(&child, &target)?;
        } else {
            debug!("Skipping {}", child.display());
        }
    }
    Ok(where_to.to_path_buf())
}
