use crate::sequence::CompoundPeptidoform;

/// Assert that a case is rejected with a structural error.
macro_rules! parse_fails {
    ($case:literal, $name:ident) => {
        #[test]
        fn $name() {
            let result = CompoundPeptidoform::pro_forma($case);
            assert!(
                result.is_err(),
                "'{}' unexpectedly parsed as {:?}",
                $case,
                result.unwrap().0
            );
        }
    };
}

parse_fails!("PEP[Phospho", unclosed_square);
parse_fails!("PEP[Phospho[nested]TIDE", unclosed_square_nested);
parse_fails!("<13C", unclosed_angle);
parse_fails!("<13C PEPTIDE", unclosed_angle_with_sequence);
parse_fails!("{Glycan:Hex", unclosed_curly);
parse_fails!("PEPT{OxidationIDE", unclosed_curly_site);
parse_fails!("(?DQ", unclosed_sequence_ambiguity);
parse_fails!("PRT(ESFRMS", unclosed_range);
parse_fails!("PRT)ESFRMS", unmatched_close_paren);
parse_fails!("{Oxidation}PEPTIDE", labile_without_glycan_prefix);
parse_fails!("{Glycan}PEPTIDE", labile_without_colon);
parse_fails!("PEPZIDE", unknown_residue);
parse_fails!("1PEPTIDE", digit_in_sequence);
parse_fails!("PEP TIDE", whitespace_in_sequence);
parse_fails!("PEP_TIDE", underscore_in_sequence);
parse_fails!("[Phospho]PEPTIDE", modification_without_residue);
parse_fails!("{Glycan:Hex}[Phospho]PEPTIDE", modification_without_residue_after_labile);
parse_fails!("PEPTIDE/2[+Na+", unclosed_ionic_species);
parse_fails!("PEPTIDE/2x", trailing_junk_after_charge);
parse_fails!("PEPTIDE-", dangling_terminal_dash);
