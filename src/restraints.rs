//! Unambiguous restraints that keep the rigid bodies of a structure together.
//!
//! A structure is reduced to its `CA`/`P` trace, split into continuous bodies
//! wherever the chain breaks or the trace has a gap, and every pair of bodies is
//! tied together by distance restraints between their closest atoms.

use crate::error::{PrepError, Result};
use crate::utils::open_structure;
use nalgebra as na;
use rayon::prelude::*;
use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree};
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, warn};

/// Gap threshold between consecutive alpha carbons.
pub const PROTEIN_GAP: f64 = 4.0;
/// Gap threshold between consecutive backbone phosphorus atoms.
pub const NUCLEIC_GAP: f64 = 7.5;
/// Restraints of the same body pair must be this many trace positions apart.
pub const MIN_SEPARATION: usize = 3;

const TRACE_ATOMS: [&str; 2] = ["CA", "P"];

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// A trace atom as used in the restraint tables.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomRecord {
    pub segid: String,
    pub resi: isize,
    pub name: String,
    pub pos: [f64; 3],
}

impl AtomRecord {
    pub fn new(segid: &str, resi: isize, name: &str, pos: [f64; 3]) -> Self {
        Self {
            segid: segid.to_string(),
            resi,
            name: name.to_string(),
            pos,
        }
    }

    fn gap_threshold(&self) -> f64 {
        match self.name.as_str() {
            "P" => NUCLEIC_GAP,
            _ => PROTEIN_GAP,
        }
    }

    fn selection(&self) -> String {
        format!(
            "(segid {} and resi {} and name {})",
            self.segid, self.resi, self.name
        )
    }
}

/// A continuous fragment of the atom list, both ends inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Body {
    pub start: usize,
    pub end: usize,
}

impl Body {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// A distance restraint between two atoms of the atom list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Restraint {
    pub i: usize,
    pub j: usize,
    pub distance: f64,
}

/// Euclidean distance between two coordinates.
pub fn calc_euclidean(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    na::distance(&na::Point3::from(*a), &na::Point3::from(*b))
}

/// Read the `CA` and `P` atoms of the first model, keeping the blank or `A`
/// alternate location and skipping the chains listed in `exclude`.
pub fn read_structure(path: &Path, exclude: &[String]) -> Result<Vec<AtomRecord>> {
    let (pdb, _) = open_structure(path)?;

    let atoms: Vec<AtomRecord> = pdb
        .models()
        .take(1)
        .flat_map(|model| model.chains())
        .filter(|chain| !exclude.iter().any(|c| c == chain.id()))
        .flat_map(|chain| {
            chain.residues().flat_map(move |residue| {
                residue
                    .conformers()
                    .filter(|conformer| {
                        matches!(conformer.alternative_location(), None | Some("A"))
                    })
                    .flat_map(|conformer| conformer.atoms())
                    .filter(|atom| !atom.hetero() && TRACE_ATOMS.contains(&atom.name()))
                    .map(move |atom| {
                        let (x, y, z) = atom.pos();
                        AtomRecord::new(chain.id(), residue.serial_number(), atom.name(), [x, y, z])
                    })
            })
        })
        .collect();

    if atoms.is_empty() {
        return Err(PrepError::EmptyStructure {
            path: path.to_path_buf(),
            what: "CA or P atoms",
        });
    }
    debug!("Read {} trace atoms from {}", atoms.len(), path.display());
    Ok(atoms)
}

/// Split the atom list into continuous bodies.
///
/// A body ends when the next atom is on another chain, is of another kind
/// (`CA` vs `P`), or is at least the gap threshold away from the previous atom.
pub fn get_bodies(atoms: &[AtomRecord]) -> Result<Vec<Body>> {
    if atoms.is_empty() {
        return Err(PrepError::NoBodies);
    }

    let mut bodies = Vec::new();
    let mut body_start = 0;
    for (i, pair) in atoms.windows(2).enumerate() {
        let (prev, atom) = (&pair[0], &pair[1]);
        let same_kind = prev.segid == atom.segid && prev.name == atom.name;
        if !same_kind || calc_euclidean(&prev.pos, &atom.pos) >= atom.gap_threshold() {
            bodies.push(Body {
                start: body_start,
                end: i,
            });
            body_start = i + 1;
        }
    }
    bodies.push(Body {
        start: body_start,
        end: atoms.len() - 1,
    });

    debug!("Found {} bodies: {bodies:?}", bodies.len());
    Ok(bodies)
}

/// Closest atom pair between two bodies, restricted to the atoms accepted by the filters.
fn closest_pair(
    atoms: &[AtomRecord],
    body_i: &Body,
    body_j: &Body,
    keep_i: impl Fn(usize) -> bool + Send + Sync,
    keep_j: impl Fn(usize) -> bool,
) -> Option<Restraint> {
    let points: Vec<IndexedPoint> = body_j
        .indices()
        .filter(|&j| keep_j(j))
        .map(|j| IndexedPoint::new(atoms[j].pos, j))
        .collect();
    if points.is_empty() {
        return None;
    }
    let tree = RTree::bulk_load(points);

    body_i
        .indices()
        .into_par_iter()
        .filter(|&i| keep_i(i))
        .filter_map(|i| {
            let query = atoms[i].pos;
            tree.nearest_neighbor(&query)
                .map(|nn| (i, nn.data, nn.geom().distance_2(&query)))
        })
        .min_by(|a, b| a.2.total_cmp(&b.2).then(a.0.cmp(&b.0)))
        .map(|(i, j, _)| Restraint {
            i,
            j,
            distance: calc_euclidean(&atoms[i].pos, &atoms[j].pos),
        })
}

/// Build the restraints holding the bodies together.
///
/// Every pair of bodies gets the restraint between its two closest atoms and,
/// when the bodies are long enough, a second one between the closest atoms
/// lying more than [`MIN_SEPARATION`] positions away from the first pair.
pub fn build_restraints(atoms: &[AtomRecord], bodies: &[Body]) -> Vec<Restraint> {
    if bodies.len() < 2 {
        warn!("Only one body found. No restraints created.");
        return Vec::new();
    }

    let mut restraints = Vec::new();
    for (n, body_i) in bodies.iter().enumerate() {
        for body_j in &bodies[n + 1..] {
            let Some(first) = closest_pair(atoms, body_i, body_j, |_| true, |_| true) else {
                continue;
            };
            restraints.push(first);

            let second = closest_pair(
                atoms,
                body_i,
                body_j,
                |i| i.abs_diff(first.i) > MIN_SEPARATION,
                |j| j.abs_diff(first.j) > MIN_SEPARATION,
            );
            match second {
                Some(second) => restraints.push(second),
                None => debug!("Bodies {body_i:?} and {body_j:?} are too short for a second restraint"),
            }
        }
    }
    restraints
}

/// Render restraints in HADDOCK's TBL format.
pub fn make_tbl(atoms: &[AtomRecord], restraints: &[Restraint]) -> String {
    restraints
        .iter()
        .map(|r| {
            format!(
                "assign {} {} {:3.3} 0.0 0.0\n",
                atoms[r.i].selection(),
                atoms[r.j].selection(),
                r.distance
            )
        })
        .collect()
}

/// Generate the body restraint table of a structure file.
pub fn restrain(path: &Path) -> Result<String> {
    let atoms = read_structure(path, &[])?;
    let bodies = get_bodies(&atoms)?;
    let restraints = build_restraints(&atoms, &bodies);
    Ok(make_tbl(&atoms, &restraints))
}
