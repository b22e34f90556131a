//! The canonical monosaccharide set and the syntactic validator for glycan
//! compositions as they appear in `Glycan:` bodies.

/// The canonical monosaccharide names, longest first so that greedy matching
/// always picks the most specific name (`HexNAcS` before `HexNAc` before
/// `Hex`).
pub const MONOSACCHARIDES: &[&str] = &[
    "HexNAcS", "HexNAc", "NeuAc", "NeuGc", "HexS", "HexP", "dHex", "Hex", "Pen", "Fuc",
];

/// Check the syntax of a glycan composition: a run of monosaccharide names,
/// each optionally followed by a count. Whitespace is ignored. The whole
/// string has to be consumed for the composition to be valid.
pub fn is_valid_glycan(text: &str) -> bool {
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if text.is_empty() {
        return false;
    }
    let mut index = 0;
    'composition: while index < text.len() {
        for name in MONOSACCHARIDES {
            if text[index..].starts_with(name) {
                index += name.len();
                index += text.as_bytes()[index..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                continue 'composition;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compositions() {
        assert!(is_valid_glycan("Hex"));
        assert!(is_valid_glycan("HexNAc"));
        assert!(is_valid_glycan("HexNAc2Hex3NeuAc1"));
        assert!(is_valid_glycan("dHexFuc"));
        assert!(is_valid_glycan("Hex 2 HexNAc"));
        assert!(!is_valid_glycan(""));
        assert!(!is_valid_glycan("Man5"));
        assert!(!is_valid_glycan("hex"));
        assert!(!is_valid_glycan("Hex2X"));
    }
}
