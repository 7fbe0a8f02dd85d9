use pdbtbx::*;

/// Reference areas (Å²) of residue X in an extended Ala-X-Ala tripeptide,
/// as tabulated in the NACCESS `standard.data` file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceArea {
    pub total: f64,
    pub side_chain: f64,
    pub main_chain: f64,
}

impl ReferenceArea {
    const fn new(total: f64, side_chain: f64, main_chain: f64) -> Self {
        Self {
            total,
            side_chain,
            main_chain,
        }
    }
}

/// Reference accessible areas for the 20 standard amino acids.
pub fn reference_area(resn: &str) -> Option<ReferenceArea> {
    let area = match resn.to_uppercase().as_str() {
        "ALA" => ReferenceArea::new(107.95, 69.41, 38.54),
        "ARG" => ReferenceArea::new(238.76, 201.25, 37.51),
        "ASN" => ReferenceArea::new(143.94, 106.33, 37.61),
        "ASP" => ReferenceArea::new(140.39, 102.06, 38.33),
        "CYS" => ReferenceArea::new(134.28, 96.69, 37.59),
        "GLN" => ReferenceArea::new(178.50, 140.58, 37.92),
        "GLU" => ReferenceArea::new(172.25, 134.61, 37.64),
        "GLY" => ReferenceArea::new(80.10, 32.33, 47.77),
        "HIS" => ReferenceArea::new(182.88, 144.93, 37.95),
        "ILE" => ReferenceArea::new(175.12, 137.96, 37.16),
        "LEU" => ReferenceArea::new(178.63, 140.76, 37.87),
        "LYS" => ReferenceArea::new(200.81, 162.50, 38.31),
        "MET" => ReferenceArea::new(194.15, 156.08, 38.07),
        "PHE" => ReferenceArea::new(199.48, 161.80, 37.68),
        "PRO" => ReferenceArea::new(136.13, 99.43, 36.70),
        "SER" => ReferenceArea::new(116.50, 78.16, 38.34),
        "THR" => ReferenceArea::new(139.27, 101.70, 37.57),
        "TRP" => ReferenceArea::new(249.36, 211.29, 38.07),
        "TYR" => ReferenceArea::new(212.76, 174.91, 37.85),
        "VAL" => ReferenceArea::new(151.44, 114.28, 37.16),
        _ => return None,
    };
    Some(area)
}

/// Whether an atom belongs to the main chain when accessibility is split into
/// main-chain and side-chain contributions. Glycine's CA counts as side chain.
pub fn is_main_chain_atom(resn: &str, atom_name: &str) -> bool {
    match atom_name {
        "N" | "C" | "O" | "OXT" => true,
        "CA" => !resn.eq_ignore_ascii_case("GLY"),
        _ => false,
    }
}

/// One-letter code of a three-letter amino acid name.
pub fn one_letter_code(name: &str) -> Option<&'static str> {
    let aa_code = match name.to_uppercase().as_str() {
        "ALA" => "A",
        "ARG" => "R",
        "ASN" => "N",
        "ASP" => "D",
        "CYS" => "C",
        "GLN" => "Q",
        "GLU" => "E",
        "GLY" => "G",
        "HIS" | "HSD" | "HSE" | "HSP" | "HID" | "HIE" | "HIP" => "H",
        "ILE" => "I",
        "LEU" => "L",
        "LYS" => "K",
        "MET" | "MSE" => "M",
        "PHE" => "F",
        "PRO" => "P",
        "SER" => "S",
        "THR" => "T",
        "TRP" => "W",
        "TYR" => "Y",
        "VAL" => "V",
        _ => return None,
    };
    Some(aa_code)
}

pub trait ResidueExt {
    /// The residue one-letter code, or `None` if it's not an amino acid.
    fn resn(&self) -> Option<&str>;
}

impl ResidueExt for Residue {
    fn resn(&self) -> Option<&str> {
        self.name().and_then(one_letter_code)
    }
}
