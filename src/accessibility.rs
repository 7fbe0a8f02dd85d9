//! Per-residue solvent accessibility and the cutoff used to pick surface residues.
//!
//! Atomic SASA is computed with rust-sasa (Shrake-Rupley) over heavy atoms and
//! summed per residue. Relative values are percentages of the Ala-X-Ala
//! reference areas in [`crate::residues::reference_area`].

use crate::error::Result;
use crate::residues::{is_main_chain_atom, reference_area};
use crate::utils::load_model_logged;
use pdbtbx::*;
use polars::prelude::*;
use rust_sasa::calculate_sasa_internal;
use rust_sasa::Atom as SASAAtom;
use std::path::Path;
use tracing::debug;

/// Van der Waals radius used when the element is unknown.
const FALLBACK_RADIUS: f64 = 1.8;

/// Parameters of the Shrake-Rupley calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SasaOptions {
    /// Probe radius in Ångström
    pub probe_radius: f32,
    /// Number of points on each atom sphere
    pub n_points: usize,
}

impl Default for SasaOptions {
    fn default() -> Self {
        Self {
            probe_radius: 1.4,
            n_points: 100,
        }
    }
}

/// Accessible surface of one residue, absolute in Å² and relative in percent.
#[derive(Clone, Debug, PartialEq)]
pub struct ResidueAccessibility {
    pub chain: String,
    pub resi: isize,
    pub insertion: String,
    pub resn: String,
    pub total_abs: f64,
    pub total_rel: Option<f64>,
    pub side_chain_abs: f64,
    pub side_chain_rel: Option<f64>,
    pub main_chain_abs: f64,
    pub main_chain_rel: Option<f64>,
}

impl ResidueAccessibility {
    fn new(chain: &str, resi: isize, insertion: &str, resn: &str) -> Self {
        Self {
            chain: chain.to_string(),
            resi,
            insertion: insertion.to_string(),
            resn: resn.to_string(),
            total_abs: 0.0,
            total_rel: None,
            side_chain_abs: 0.0,
            side_chain_rel: None,
            main_chain_abs: 0.0,
            main_chain_rel: None,
        }
    }

    fn fill_relative(&mut self) {
        if let Some(reference) = reference_area(&self.resn) {
            self.total_rel = Some(100.0 * self.total_abs / reference.total);
            self.side_chain_rel = Some(100.0 * self.side_chain_abs / reference.side_chain);
            self.main_chain_rel = Some(100.0 * self.main_chain_abs / reference.main_chain);
        }
    }
}

/// Residue numbers of one chain passing the accessibility cutoff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainResidues {
    pub chain: String,
    pub residues: Vec<isize>,
}

/// Calculate the per-residue accessibility of the first model.
///
/// Hydrogens are ignored and only the blank or `A` alternate location is used.
pub fn get_accessibility(pdb: &PDB, options: &SasaOptions) -> Vec<ResidueAccessibility> {
    let mut residues: Vec<ResidueAccessibility> = Vec::new();
    let mut atoms: Vec<SASAAtom> = Vec::new();
    // (residue index, main chain flag) per SASA atom
    let mut owners: Vec<(usize, bool)> = Vec::new();

    for chain in pdb.models().take(1).flat_map(|model| model.chains()) {
        for residue in chain.residues() {
            let (resi, insertion) = residue.id();
            let resn = residue.name().unwrap_or("UNK");
            let res_idx = residues.len();
            residues.push(ResidueAccessibility::new(
                chain.id(),
                resi,
                insertion.unwrap_or(""),
                resn,
            ));

            let heavy_atoms = residue
                .conformers()
                .filter(|conformer| matches!(conformer.alternative_location(), None | Some("A")))
                .flat_map(|conformer| conformer.atoms())
                .filter(|atom| atom.element() != Some(&Element::H));
            for atom in heavy_atoms {
                let (x, y, z) = atom.pos();
                let radius = atom
                    .element()
                    .and_then(|e| e.atomic_radius().van_der_waals)
                    .unwrap_or(FALLBACK_RADIUS);
                atoms.push(SASAAtom {
                    position: nalgebra::Point3::new(x as f32, y as f32, z as f32),
                    radius: radius as f32,
                    id: atoms.len(),
                    parent_id: None,
                });
                owners.push((res_idx, is_main_chain_atom(resn, atom.name())));
            }
        }
    }

    if atoms.is_empty() {
        return residues;
    }

    let atom_sasa = calculate_sasa_internal(
        &atoms,
        Some(options.probe_radius),
        Some(options.n_points),
    );
    for (&(res_idx, main_chain), &sasa) in owners.iter().zip(atom_sasa.iter()) {
        let residue = &mut residues[res_idx];
        let sasa = sasa as f64;
        residue.total_abs += sasa;
        if main_chain {
            residue.main_chain_abs += sasa;
        } else {
            residue.side_chain_abs += sasa;
        }
    }
    residues.iter_mut().for_each(|r| r.fill_relative());

    debug!(
        "Computed accessibility of {} residues from {} atoms",
        residues.len(),
        atoms.len()
    );
    residues
}

/// Select, per chain and in structure order, the residues whose relative side-chain
/// accessibility is at least `cutoff * 100` percent.
///
/// The residue lists are sorted and free of duplicates (insertion codes collapse
/// onto their residue number). Chains without any accessible residue are kept
/// with an empty list.
pub fn apply_cutoff(access_data: &[ResidueAccessibility], cutoff: f64) -> Vec<ChainResidues> {
    debug!("Applying cutoff to side_chain_rel - {cutoff}");
    let threshold = cutoff * 100.0;

    let mut result: Vec<ChainResidues> = Vec::new();
    for residue in access_data {
        let idx = match result.iter().position(|c| c.chain == residue.chain) {
            Some(idx) => idx,
            None => {
                result.push(ChainResidues {
                    chain: residue.chain.clone(),
                    residues: Vec::new(),
                });
                result.len() - 1
            }
        };
        if residue.side_chain_rel.is_some_and(|rel| rel >= threshold) {
            result[idx].residues.push(residue.resi);
        }
    }

    for chain in result.iter_mut() {
        chain.residues.sort_unstable();
        chain.residues.dedup();
    }
    result
}

/// Accessible residues of the first chain of a structure file.
pub fn access(path: &Path, cutoff: f64, options: &SasaOptions) -> Result<Vec<isize>> {
    let pdb = load_model_logged(path)?;
    let access_data = get_accessibility(&pdb, options);
    Ok(apply_cutoff(&access_data, cutoff)
        .into_iter()
        .next()
        .map(|c| c.residues)
        .unwrap_or_default())
}

/// Convert per-residue accessibility into a Polars DataFrame.
pub fn accessibility_to_df(res: &[ResidueAccessibility]) -> Result<DataFrame> {
    let df = df!(
        "chain" => res.iter().map(|x| x.chain.to_owned()).collect::<Vec<String>>(),
        "resn" => res.iter().map(|x| x.resn.to_owned()).collect::<Vec<String>>(),
        "resi" => res.iter().map(|x| x.resi as i32).collect::<Vec<i32>>(),
        "insertion" => res.iter().map(|x| x.insertion.to_owned()).collect::<Vec<String>>(),
        "total_abs" => res.iter().map(|x| x.total_abs).collect::<Vec<f64>>(),
        "total_rel" => res.iter().map(|x| x.total_rel).collect::<Vec<Option<f64>>>(),
        "side_chain_abs" => res.iter().map(|x| x.side_chain_abs).collect::<Vec<f64>>(),
        "side_chain_rel" => res.iter().map(|x| x.side_chain_rel).collect::<Vec<Option<f64>>>(),
        "main_chain_abs" => res.iter().map(|x| x.main_chain_abs).collect::<Vec<f64>>(),
        "main_chain_rel" => res.iter().map(|x| x.main_chain_rel).collect::<Vec<Option<f64>>>(),
    )?;
    Ok(df)
}
