//! The monoisotopic mass calculator over residues with their modifications,
//! and the fragment-pair constructor for the common transition series.

use std::collections::HashMap;

use crate::{
    chemistry::{PROTON, WATER},
    error::ProFormaError,
    sequence::Residue,
};

/// Sum the monoisotopic mass of a stretch of residues including every
/// attached modification. Modifications without an inherent mass are looked
/// up by primary value in `modification_masses` when one is given. `n_term`
/// and `c_term` are scalar offsets, and `with_water` adds the mass of the
/// free peptide's water.
/// # Errors
/// `MissingMass` when a residue or modification has no known mass and no
/// table entry.
pub fn calculate_mass(
    residues: &[Residue],
    modification_masses: Option<&HashMap<String, f64>>,
    n_term: f64,
    c_term: f64,
    with_water: bool,
) -> Result<f64, ProFormaError> {
    let mut total = n_term + c_term + if with_water { WATER } else { 0.0 };
    for residue in residues {
        total += residue
            .mass()
            .ok_or_else(|| ProFormaError::MissingMass(residue.code.to_string()))?;
        for modification in &residue.mods {
            total += modification
                .mass()
                .or_else(|| {
                    modification_masses.and_then(|table| {
                        table.get(&modification.value.primary_value).copied()
                    })
                })
                .ok_or_else(|| {
                    ProFormaError::MissingMass(modification.value.primary_value.clone())
                })?;
        }
    }
    Ok(total)
}

/// The mass over charge for the given charge state, proton weighted.
pub fn mz(mass: f64, charge: i32) -> f64 {
    (mass + f64::from(charge) * PROTON) / f64::from(charge)
}

/// A transition pair of fragment series.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Transition {
    /// b and y ions.
    BY,
    /// a and x ions.
    AX,
    /// c and z ions.
    CZ,
}

impl Transition {
    /// The transition named by its two series letters, `"by"`, `"ax"`, or
    /// `"cz"`.
    pub fn new(name: &str) -> Option<Self> {
        match name {
            "by" => Some(Self::BY),
            "ax" => Some(Self::AX),
            "cz" => Some(Self::CZ),
            _ => None,
        }
    }

    /// The series letters for the N-terminal and C-terminal fragments.
    pub const fn series(self) -> (char, char) {
        match self {
            Self::BY => ('b', 'y'),
            Self::AX => ('a', 'x'),
            Self::CZ => ('c', 'z'),
        }
    }
}

/// One theoretical fragment: a typed stretch of the precursor's residues
/// with its fragment number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment<'a> {
    /// The series letter, for example `b`.
    pub series: char,
    /// The fragment number within its series.
    pub number: usize,
    /// The residues covered by this fragment.
    pub residues: &'a [Residue],
}

impl Fragment<'_> {
    /// The monoisotopic mass of this fragment's residues and modifications.
    /// # Errors
    /// `MissingMass` when any covered modification has no known mass.
    pub fn mass(&self, with_water: bool) -> Result<f64, ProFormaError> {
        calculate_mass(self.residues, None, 0.0, 0.0, with_water)
    }
}

/// All transition pairs for a precursor: for every cleavage site the
/// N-terminal prefix and C-terminal suffix fragment, numbered from their
/// respective ends.
pub fn fragment_pairs(residues: &[Residue], transition: Transition) -> Vec<(Fragment<'_>, Fragment<'_>)> {
    let (n_series, c_series) = transition.series();
    (1..residues.len())
        .map(|site| {
            (
                Fragment {
                    series: n_series,
                    number: site,
                    residues: &residues[..site],
                },
                Fragment {
                    series: c_series,
                    number: residues.len() - site,
                    residues: &residues[site..],
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Peptidoform;

    #[test]
    fn peptide_mass() {
        let (peptide, _) = Peptidoform::pro_forma("PEPTIDE").unwrap();
        let mass = calculate_mass(&peptide.residues, None, 0.0, 0.0, true).unwrap();
        assert!((mass - 799.359964).abs() < 1e-4, "{mass}");
    }

    #[test]
    fn modified_mass() {
        let (peptide, _) = Peptidoform::pro_forma("PEP[+79.966]TIDE").unwrap();
        let mass = calculate_mass(&peptide.residues, None, 0.0, 0.0, true).unwrap();
        assert!((mass - (799.359964 + 79.966)).abs() < 1e-4, "{mass}");
    }

    #[test]
    fn named_modification_needs_a_table() {
        let (peptide, _) = Peptidoform::pro_forma("PEP[Phospho]TIDE").unwrap();
        assert_eq!(
            calculate_mass(&peptide.residues, None, 0.0, 0.0, true),
            Err(ProFormaError::MissingMass("Phospho".to_string()))
        );
        let table = HashMap::from([("Phospho".to_string(), 79.966331)]);
        let mass = calculate_mass(&peptide.residues, Some(&table), 0.0, 0.0, true).unwrap();
        assert!((mass - (799.359964 + 79.966331)).abs() < 1e-4, "{mass}");
    }

    #[test]
    fn gap_mass() {
        let (peptide, _) = Peptidoform::pro_forma("RTAAX[+367.0537]WT").unwrap();
        let mass = calculate_mass(&peptide.residues, None, 0.0, 0.0, false).unwrap();
        let expected = 156.101111 + 101.047679 + 2.0 * 71.037114 + 367.0537 + 186.079313 + 101.047679;
        assert!((mass - expected).abs() < 1e-4, "{mass}");
    }

    #[test]
    fn by_pairs() {
        let (peptide, _) = Peptidoform::pro_forma("PEPTIDE").unwrap();
        let pairs = fragment_pairs(&peptide.residues, Transition::new("by").unwrap());
        assert_eq!(pairs.len(), 6);
        let (b1, y6) = &pairs[0];
        assert_eq!((b1.series, b1.number, b1.residues.len()), ('b', 1, 1));
        assert_eq!((y6.series, y6.number, y6.residues.len()), ('y', 6, 6));
        let (b6, y1) = &pairs[5];
        assert_eq!((b6.series, b6.number), ('b', 6));
        assert_eq!((y1.series, y1.number), ('y', 1));
        let b2_mass = pairs[1].0.mass(false).unwrap();
        assert!((b2_mass - (97.052764 + 129.042593)).abs() < 1e-6);
    }

    #[test]
    fn mass_over_charge() {
        let mass = 799.359964;
        assert!((mz(mass, 1) - (mass + PROTON)).abs() < 1e-9);
        assert!((mz(mass, 2) - (mass + 2.0 * PROTON) / 2.0).abs() < 1e-9);
    }
}
