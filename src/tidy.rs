//! Clean-up of structures before they are handed to HADDOCK.
//!
//! Tidying keeps the protein ATOM records of the first model and the first
//! alternate location, puts everything on one chain/segment and renumbers the
//! atom serials. Records are written in fixed PDB columns with the segment id
//! in columns 73-76, which HADDOCK uses to tell the partners apart.

use crate::error::{PrepError, Result};
use crate::utils::{load_model_logged, write_text};
use pdbtbx::*;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// One ATOM record.
#[derive(Clone, Debug, PartialEq)]
pub struct PdbAtom {
    pub serial: usize,
    pub name: String,
    pub resn: String,
    pub chain: String,
    pub resi: isize,
    pub insertion: String,
    pub pos: [f64; 3],
    pub occupancy: f64,
    pub b_factor: f64,
    pub segid: String,
    pub element: String,
}

impl PdbAtom {
    /// Format as an 80-column ATOM line (without newline).
    pub fn to_line(&self) -> String {
        // Names shorter than four characters start in column 14
        let name = if self.name.len() >= 4 {
            self.name.clone()
        } else {
            format!(" {:<3}", self.name)
        };
        format!(
            "ATOM  {:>5} {:<4} {:>3} {:1}{:>4}{:1}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}      {:<4}{:>2}  ",
            self.serial % 100_000,
            name,
            self.resn,
            self.chain,
            self.resi,
            self.insertion,
            self.pos[0],
            self.pos[1],
            self.pos[2],
            self.occupancy,
            self.b_factor,
            self.segid,
            self.element,
        )
    }
}

/// Render atoms as PDB text terminated by `TER` and `END`.
pub fn to_pdb_text(atoms: &[PdbAtom]) -> String {
    let mut text = String::new();
    for atom in atoms {
        let _ = writeln!(text, "{}", atom.to_line());
    }
    if let Some(last) = atoms.last() {
        let _ = writeln!(
            text,
            "TER   {:>5}      {:>3} {:1}{:>4}{:1}",
            (last.serial + 1) % 100_000,
            last.resn,
            last.chain,
            last.resi,
            last.insertion
        );
    }
    text.push_str("END\n");
    text
}

/// Collect the atoms to keep from a structure, renamed to `chain`.
///
/// When more than one chain is merged, residues are renumbered from 1 in file
/// order so that overlapping numbering does not collide on the single chain.
pub fn tidy_atoms(pdb: &PDB, chain: &str) -> Vec<PdbAtom> {
    let renumber = pdb
        .models()
        .next()
        .is_some_and(|model| model.chains().filter(|c| c.residue_count() > 0).count() > 1);
    let mut atoms = Vec::new();
    let mut n_residues: isize = 0;
    for residue in pdb
        .models()
        .take(1)
        .flat_map(|model| model.chains())
        .flat_map(|c| c.residues())
    {
        let kept: Vec<&Atom> = residue
            .conformers()
            .filter(|conformer| matches!(conformer.alternative_location(), None | Some("A")))
            .flat_map(|conformer| conformer.atoms())
            .filter(|atom| !atom.hetero())
            .collect();
        if kept.is_empty() {
            continue;
        }
        n_residues += 1;
        let (resi, insertion) = if renumber {
            (n_residues, None)
        } else {
            residue.id()
        };
        for atom in kept {
            let (x, y, z) = atom.pos();
            atoms.push(PdbAtom {
                serial: atoms.len() + 1,
                name: atom.name().to_string(),
                resn: residue.name().unwrap_or("UNK").to_string(),
                chain: chain.to_string(),
                resi,
                insertion: insertion.unwrap_or("").to_string(),
                pos: [x, y, z],
                occupancy: atom.occupancy(),
                b_factor: atom.b_factor(),
                segid: chain.to_string(),
                element: atom
                    .element()
                    .map(|e| e.symbol().to_uppercase())
                    .unwrap_or_default(),
            });
        }
    }
    atoms
}

/// Tidy `input` into `output`, putting every residue on chain and segment `chain`.
pub fn tidy_up(input: &Path, output: &Path, chain: &str) -> Result<PathBuf> {
    if chain.len() != 1 {
        return Err(PrepError::Argument(format!(
            "chain id must be a single character, got '{chain}'"
        )));
    }
    let pdb = load_model_logged(input)?;
    let atoms = tidy_atoms(&pdb, chain);
    if atoms.is_empty() {
        return Err(PrepError::EmptyStructure {
            path: input.to_path_buf(),
            what: "protein atoms",
        });
    }
    write_text(output, &to_pdb_text(&atoms))?;
    info!(
        "Tidied {} ({} atoms) into {}",
        input.display(),
        atoms.len(),
        output.display()
    );
    Ok(output.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(serial: usize, name: &str, element: &str) -> PdbAtom {
        PdbAtom {
            serial,
            name: name.to_string(),
            resn: "ALA".to_string(),
            chain: "B".to_string(),
            resi: 12,
            insertion: String::new(),
            pos: [11.104, -6.5, 0.25],
            occupancy: 1.0,
            b_factor: 20.5,
            segid: "B".to_string(),
            element: element.to_string(),
        }
    }

    #[test]
    fn atom_lines_use_fixed_columns() {
        let line = atom(7, "CA", "C").to_line();
        assert_eq!(line.len(), 80);
        assert_eq!(&line[0..6], "ATOM  ");
        assert_eq!(&line[6..11], "    7");
        assert_eq!(&line[12..16], " CA ");
        assert_eq!(&line[17..20], "ALA");
        assert_eq!(&line[21..22], "B");
        assert_eq!(&line[22..26], "  12");
        assert_eq!(&line[30..38], "  11.104");
        assert_eq!(&line[38..46], "  -6.500");
        assert_eq!(&line[46..54], "   0.250");
        assert_eq!(&line[54..60], "  1.00");
        assert_eq!(&line[60..66], " 20.50");
        assert_eq!(&line[72..76], "B   ");
        assert_eq!(&line[76..78], " C");
    }

    #[test]
    fn four_letter_names_fill_the_field() {
        let line = atom(1, "HD21", "H").to_line();
        assert_eq!(&line[12..16], "HD21");
    }

    #[test]
    fn text_ends_with_ter_and_end() {
        let text = to_pdb_text(&[atom(1, "N", "N"), atom(2, "CA", "C")]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("TER       3      ALA B  12"));
        assert_eq!(lines[3], "END");
        assert_eq!(to_pdb_text(&[]), "END\n");
    }
}
