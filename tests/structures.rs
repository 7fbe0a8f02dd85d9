mod common;

use common::{alanines, antibody_text, models, write_file};
use haddock_prep::{
    access, build_restraints, extract_fasta, get_accessibility, get_bodies, load_model,
    read_structure, restrain, tidy_up, PrepError, SasaOptions,
};
use std::fs::read_to_string;

#[test]
fn restrain_ties_heavy_and_light_chains() {
    let dir = tempfile::tempdir().unwrap();
    let pdb = write_file(dir.path(), "ab.pdb", &antibody_text());

    let tbl = restrain(&pdb).unwrap();
    let lines: Vec<&str> = tbl.lines().collect();
    assert_eq!(
        lines,
        vec![
            "assign (segid H and resi 1 and name CA) (segid L and resi 1 and name CA) 10.000 0.0 0.0",
            "assign (segid H and resi 5 and name CA) (segid L and resi 5 and name CA) 10.000 0.0 0.0",
        ]
    );
}

#[test]
fn excluded_chains_leave_a_single_body() {
    let dir = tempfile::tempdir().unwrap();
    let pdb = write_file(dir.path(), "ab.pdb", &antibody_text());

    let atoms = read_structure(&pdb, &["L".to_string()]).unwrap();
    assert_eq!(atoms.len(), 6);
    assert!(atoms.iter().all(|a| a.segid == "H" && a.name == "CA"));
    let bodies = get_bodies(&atoms).unwrap();
    assert_eq!(bodies.len(), 1);
    assert!(build_restraints(&atoms, &bodies).is_empty());
}

#[test]
fn structure_without_trace_atoms_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let pdb = write_file(dir.path(), "ab.pdb", &antibody_text());
    let err = read_structure(&pdb, &["H".to_string(), "L".to_string()]).unwrap_err();
    assert!(matches!(err, PrepError::EmptyStructure { .. }));
}

#[test]
fn access_reports_the_first_chain() {
    let dir = tempfile::tempdir().unwrap();
    let pdb = write_file(dir.path(), "ab.pdb", &antibody_text());
    let options = SasaOptions::default();

    assert_eq!(access(&pdb, 0.0, &options).unwrap(), vec![1, 2, 3, 4, 5, 6]);
    assert!(access(&pdb, 10.0, &options).unwrap().is_empty());
}

#[test]
fn accessibility_splits_side_and_main_chain() {
    let dir = tempfile::tempdir().unwrap();
    let pdb = write_file(dir.path(), "ag.pdb", &alanines(&[("C", 0.0)], 3));
    let (pdb, _) = load_model(&pdb).unwrap();

    let data = get_accessibility(&pdb, &SasaOptions::default());
    assert_eq!(data.len(), 3);
    for residue in &data {
        assert_eq!(residue.resn, "ALA");
        assert!(residue.side_chain_abs > 0.0);
        assert!(residue.main_chain_abs > 0.0);
        let sum = residue.side_chain_abs + residue.main_chain_abs;
        assert!((residue.total_abs - sum).abs() < 1e-6);
        assert!(residue.total_rel.is_some());
    }
}

#[test]
fn tidy_puts_everything_on_one_chain() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "ag.pdb", &antibody_text());
    let output = dir.path().join("ag_tidy.pdb");

    tidy_up(&input, &output, "B").unwrap();
    let text = read_to_string(&output).unwrap();
    let atoms: Vec<&str> = text.lines().filter(|l| l.starts_with("ATOM")).collect();
    assert_eq!(atoms.len(), 60);
    assert!(atoms.iter().all(|l| &l[21..22] == "B" && &l[72..76] == "B   "));
    assert_eq!(&atoms[0][6..11], "    1");
    assert_eq!(&atoms[59][6..11], "   60");
    assert!(text.ends_with("END\n"));

    let err = tidy_up(&input, &output, "AB").unwrap_err();
    assert!(matches!(err, PrepError::Argument(_)));
}

#[test]
fn extract_fasta_from_file_and_folder() {
    let dir = tempfile::tempdir().unwrap();
    let pdb = write_file(dir.path(), "in/ab.pdb", &antibody_text());
    write_file(dir.path(), "in/sub/ag.pdb", &alanines(&[("C", 0.0)], 2));

    let fasta = extract_fasta(&pdb, &dir.path().join("ab.fasta")).unwrap();
    assert_eq!(
        read_to_string(fasta).unwrap(),
        ">:H\nAAAAAA\n>:L\nAAAAAA\n"
    );

    let out = extract_fasta(&dir.path().join("in"), &dir.path().join("out")).unwrap();
    assert!(out.join("ab.fasta").exists());
    assert_eq!(
        read_to_string(out.join("sub").join("ag.fasta")).unwrap(),
        ">:C\nAA\n"
    );
}

#[test]
fn fasta_reads_the_first_model_only() {
    let dir = tempfile::tempdir().unwrap();
    let nmr = models(&alanines(&[("H", 0.0)], 3), 2);
    let pdb = write_file(dir.path(), "nmr.pdb", &nmr);

    let fasta = extract_fasta(&pdb, &dir.path().join("nmr.fasta")).unwrap();
    assert_eq!(read_to_string(fasta).unwrap(), ">:H\nAAA\n");
}

#[test]
fn tidy_renumbers_merged_chains() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "ag.pdb", &alanines(&[("C", 0.0), ("D", 20.0)], 4));
    let output = dir.path().join("ag_tidy.pdb");

    tidy_up(&input, &output, "B").unwrap();
    let (pdb, _) = load_model(&output).unwrap();
    assert_eq!(pdb.chain_count(), 1);
    assert_eq!(pdb.residue_count(), 8);
    let numbers: Vec<isize> = pdb.residues().map(|r| r.serial_number()).collect();
    assert_eq!(numbers, (1..=8).collect::<Vec<isize>>());

    // chain D follows chain C
    let text = read_to_string(&output).unwrap();
    let first_of_d = text
        .lines()
        .find(|l| l.starts_with("ATOM") && &l[22..26] == "   5" && &l[12..16] == " CA ")
        .unwrap();
    assert_eq!(&first_of_d[38..46], "  20.000");
}

#[test]
fn tidy_keeps_numbering_of_a_single_chain() {
    let dir = tempfile::tempdir().unwrap();
    let text = alanines(&[("C", 0.0)], 3).replace("ALA C   3", "ALA C  13");
    let input = write_file(dir.path(), "ag.pdb", &text);
    let output = dir.path().join("ag_tidy.pdb");

    tidy_up(&input, &output, "B").unwrap();
    let (pdb, _) = load_model(&output).unwrap();
    let numbers: Vec<isize> = pdb.residues().map(|r| r.serial_number()).collect();
    assert_eq!(numbers, vec![1, 2, 13]);
}
