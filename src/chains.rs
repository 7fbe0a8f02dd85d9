use crate::residues::one_letter_code;
use pdbtbx::*;

pub trait ChainExt {
    /// One-letter sequence of the chain. Unknown residues become `X` and
    /// numbering gaps are filled with one `X` per missing residue.
    fn pdb_seq(&self) -> String;
}

impl ChainExt for Chain {
    fn pdb_seq(&self) -> String {
        let mut seq = String::new();
        let mut previous: Option<isize> = None;
        for res in self.residues() {
            let (resi, _) = res.id();
            if let Some(prev) = previous {
                if resi > prev + 1 {
                    seq.extend(std::iter::repeat('X').take((resi - prev - 1) as usize));
                }
            }
            seq.push_str(res.name().and_then(one_letter_code).unwrap_or("X"));
            previous = Some(resi);
        }
        seq
    }
}
