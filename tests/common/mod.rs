#![allow(dead_code)]

use haddock_prep::tidy::{to_pdb_text, PdbAtom};
use haddock_prep::{AntibodyNumbering, NumberedAntibody, PrepError, Result};
use std::path::{Path, PathBuf};

/// Alanine chains laid along x with one residue every 3.8 Å, one chain per `(id, y)`.
pub fn alanines(chains: &[(&str, f64)], n_res: isize) -> String {
    let mut atoms = Vec::new();
    for &(chain, y) in chains {
        for resi in 1..=n_res {
            let x = 3.8 * resi as f64;
            for (name, element, offset) in [
                ("N", "N", [-1.2, 0.5, 0.0]),
                ("CA", "C", [0.0, 0.0, 0.0]),
                ("C", "C", [1.2, -0.5, 0.0]),
                ("O", "O", [1.5, -1.5, 0.0]),
                ("CB", "C", [0.0, 1.5, 0.8]),
            ] {
                atoms.push(PdbAtom {
                    serial: atoms.len() + 1,
                    name: name.to_string(),
                    resn: "ALA".to_string(),
                    chain: chain.to_string(),
                    resi,
                    insertion: String::new(),
                    pos: [x + offset[0], y + offset[1], offset[2]],
                    occupancy: 1.0,
                    b_factor: 10.0,
                    segid: chain.to_string(),
                    element: element.to_string(),
                });
            }
        }
    }
    to_pdb_text(&atoms)
}

/// Repeat the atoms of `text` as `n_models` MODEL/ENDMDL blocks.
pub fn models(text: &str, n_models: usize) -> String {
    let atoms = text.trim_end_matches("END\n");
    let mut out = String::new();
    for k in 1..=n_models {
        out.push_str(&format!("MODEL     {k:>4}\n{atoms}ENDMDL\n"));
    }
    out.push_str("END\n");
    out
}

/// Heavy and light chain of six residues each, 10 Å apart.
pub fn antibody_text() -> String {
    alanines(&[("H", 0.0), ("L", 10.0)], 6)
}

pub fn antigen_text() -> String {
    alanines(&[("C", 40.0)], 4)
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// Copies the input as the numbered antibody and reports residues 1-3 as loops.
pub struct CopyNumbering;

impl AntibodyNumbering for CopyNumbering {
    fn number(&self, input: &Path, output_dir: &Path) -> Result<NumberedAntibody> {
        let located = NumberedAntibody::locate(input, output_dir);
        std::fs::copy(input, &located.pdb).map_err(|e| PrepError::io(input, e))?;
        std::fs::write(&located.active, "1,2,3").map_err(|e| PrepError::io(&located.active, e))?;
        Ok(located)
    }
}
