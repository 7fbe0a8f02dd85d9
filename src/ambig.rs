//! Ambiguous interaction restraints built from active and passive residues.

use crate::error::Result;
use crate::utils::{join_residues, parse_residue_list, read_text, write_text};
use std::path::Path;
use tracing::warn;

/// Active and passive residues of one docking partner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivePassive {
    pub active: Vec<isize>,
    pub passive: Vec<isize>,
}

impl ActivePassive {
    pub fn new(active: Vec<isize>, passive: Vec<isize>) -> Self {
        Self { active, passive }
    }

    /// Parse the two-line HADDOCK format: active residues, then passive residues.
    /// Missing lines are empty lists.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let active = parse_residue_list(lines.next().unwrap_or(""))?;
        let passive = parse_residue_list(lines.next().unwrap_or(""))?;
        Ok(Self { active, passive })
    }

    pub fn read(path: &Path) -> Result<Self> {
        Self::parse(&read_text(path)?)
    }

    pub fn to_file_contents(&self) -> String {
        format!(
            "{}\n{}\n",
            join_residues(&self.active),
            join_residues(&self.passive)
        )
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        write_text(path, &self.to_file_contents())
    }

    fn all(&self) -> Vec<isize> {
        self.active
            .iter()
            .chain(self.passive.iter())
            .copied()
            .collect()
    }
}

fn assign_block(resi: isize, segid: &str, partners: &[isize], partner_segid: &str) -> String {
    let mut block = format!("assign (resi {resi} and segid {segid})\n(\n");
    let partner_lines: Vec<String> = partners
        .iter()
        .map(|p| format!("       (resi {p} and segid {partner_segid})\n"))
        .collect();
    block.push_str(&partner_lines.join("        or\n"));
    block.push_str(") 2.0 2.0 0.0\n");
    block
}

/// Convert active and passive residues to ambiguous interaction restraints.
///
/// Each active residue of one partner is restrained to the union of active and
/// passive residues of the other partner. Active residues facing an empty
/// partner list are skipped.
pub fn active_passive_to_ambig(
    first: &ActivePassive,
    second: &ActivePassive,
    segid1: &str,
    segid2: &str,
) -> String {
    let all1 = first.all();
    let all2 = second.all();
    let mut result = String::new();

    for (active, segid, partners, partner_segid) in [
        (&first.active, segid1, &all2, segid2),
        (&second.active, segid2, &all1, segid1),
    ] {
        if partners.is_empty() && !active.is_empty() {
            warn!(
                "Segid {partner_segid} has no active or passive residues, skipping restraints from segid {segid}"
            );
            continue;
        }
        for &resi in active {
            result.push_str(&assign_block(resi, segid, partners, partner_segid));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambig_layout() {
        let antibody = ActivePassive::new(vec![10], vec![]);
        let antigen = ActivePassive::new(vec![], vec![5, 6]);
        let expected = "\
assign (resi 10 and segid A)
(
       (resi 5 and segid B)
        or
       (resi 6 and segid B)
) 2.0 2.0 0.0
";
        assert_eq!(
            active_passive_to_ambig(&antibody, &antigen, "A", "B"),
            expected
        );
    }

    #[test]
    fn both_partners_contribute_blocks() {
        let first = ActivePassive::new(vec![1, 2], vec![3]);
        let second = ActivePassive::new(vec![7], vec![]);
        let tbl = active_passive_to_ambig(&first, &second, "A", "B");

        assert_eq!(tbl.matches("assign").count(), 3);
        assert!(tbl.contains("assign (resi 1 and segid A)\n(\n       (resi 7 and segid B)\n) 2.0 2.0 0.0\n"));
        assert!(tbl.ends_with(
            "assign (resi 7 and segid B)
(
       (resi 1 and segid A)
        or
       (resi 2 and segid A)
        or
       (resi 3 and segid A)
) 2.0 2.0 0.0
"
        ));
    }

    #[test]
    fn empty_partner_produces_no_blocks() {
        let first = ActivePassive::new(vec![1, 2], vec![]);
        let second = ActivePassive::default();
        assert_eq!(active_passive_to_ambig(&first, &second, "A", "B"), "");
    }

    #[test]
    fn active_passive_file_format() {
        let ap = ActivePassive::new(vec![31, 32], vec![50]);
        assert_eq!(ap.to_file_contents(), "31 32\n50\n");
        assert_eq!(ActivePassive::parse("31 32\n50\n").unwrap(), ap);

        // Passive-only files start with an empty line
        let passive_only = ActivePassive::parse("\n4 5 6").unwrap();
        assert!(passive_only.active.is_empty());
        assert_eq!(passive_only.passive, vec![4, 5, 6]);

        assert_eq!(ActivePassive::parse("1,2").unwrap().passive, Vec::<isize>::new());
    }
}
