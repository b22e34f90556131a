use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thin_vec::ThinVec;

use crate::{
    ParserResult,
    error::{ProFormaError, ProFormaWarning},
    helper_functions::{end_of_enclosure, find_outside_brackets, split_outside_brackets},
};

use super::{
    modification::{
        GlobalModType, GlobalModification, Modification, ModificationKind, SequenceAmbiguity,
    },
    parse::parse_pro_forma,
    residue::Residue,
};

/// A single peptidoform: a residue sequence with its modifications, an
/// optional charge, and an optional ionic species. The residues own their
/// site modifications; modifications scoped to the whole chain live on the
/// dedicated lists here.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Peptidoform {
    /// The sequence itself, residue indices match list positions.
    pub residues: Vec<Residue>,
    /// N-terminal modifications.
    pub n_term: ThinVec<Modification>,
    /// C-terminal modifications.
    pub c_term: ThinVec<Modification>,
    /// Labile modifications, lost during fragmentation.
    pub labile: ThinVec<Modification>,
    /// Modifications known to be present but without a known position.
    pub unknown_position: ThinVec<Modification>,
    /// Global modifications applying to the whole sequence.
    pub global: ThinVec<GlobalModification>,
    /// Stretches of alternative residues.
    pub sequence_ambiguities: ThinVec<SequenceAmbiguity>,
    /// The charge state.
    pub charge: Option<i32>,
    /// The ionic species, the interior of the `[…]` after the charge.
    pub ionic_species: Option<String>,
}

/// One peptide chain, holding the chimeric (`+` separated) peptidoforms
/// analysed together in it.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PeptidoformChain {
    /// The co-analysed peptidoforms.
    pub peptidoforms: Vec<Peptidoform>,
}

/// A full ProForma definition: one or more covalently linked peptide chains
/// (`//` separated), each holding its chimeric peptidoforms.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct CompoundPeptidoform {
    /// The peptide chains.
    pub chains: Vec<PeptidoformChain>,
}

impl Peptidoform {
    /// Parse a single peptidoform in ProForma notation. For definitions
    /// that may contain `+` or `//` separators use
    /// [`CompoundPeptidoform::pro_forma`].
    /// # Errors
    /// When the string is not a structurally valid ProForma peptidoform.
    pub fn pro_forma(line: &str) -> ParserResult<Self> {
        let mut warnings = Vec::new();
        let peptidoform = Self::pro_forma_inner(line, &mut warnings)?;
        Ok((peptidoform, warnings))
    }

    pub(super) fn pro_forma_inner(
        line: &str,
        warnings: &mut Vec<ProFormaWarning>,
    ) -> Result<Self, ProFormaError> {
        let (body_end, charge, ionic_species) = strip_charge(line);
        let parsed = parse_pro_forma(&line[..body_end], warnings)?;
        let mut residues = parsed
            .base_sequence
            .chars()
            .enumerate()
            .map(|(index, code)| Residue::new(code, index))
            .collect::<Result<Vec<_>, _>>()?;
        for (index, modification) in parsed.site_mods {
            residues[index].mods.push(modification);
        }
        Ok(Self {
            residues,
            n_term: parsed.n_term.into_iter().collect(),
            c_term: parsed.c_term.into_iter().collect(),
            labile: parsed.labile.into_iter().collect(),
            unknown_position: parsed.unknown_position.into_iter().collect(),
            global: parsed.global.into_iter().collect(),
            sequence_ambiguities: parsed.sequence_ambiguities.into_iter().collect(),
            charge,
            ionic_species,
        })
    }

    /// The bare residue codes without any modifications.
    pub fn to_stripped_string(&self) -> String {
        self.residues.iter().map(|residue| residue.code).collect()
    }

    /// The number of residues.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Whether this peptidoform has no residues at all.
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

impl PeptidoformChain {
    /// Parse one peptide chain, with any chimeric `+` separated pieces.
    /// # Errors
    /// When any piece is not a structurally valid ProForma peptidoform.
    pub fn pro_forma(line: &str) -> ParserResult<Self> {
        let mut warnings = Vec::new();
        let chain = Self::pro_forma_inner(line, &mut warnings)?;
        Ok((chain, warnings))
    }

    pub(super) fn pro_forma_inner(
        line: &str,
        warnings: &mut Vec<ProFormaWarning>,
    ) -> Result<Self, ProFormaError> {
        let peptidoforms = split_outside_brackets(line, "+")
            .into_iter()
            .map(|piece| Peptidoform::pro_forma_inner(piece, warnings))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { peptidoforms })
    }
}

impl CompoundPeptidoform {
    /// Parse a full ProForma definition with all its chains and chimeric
    /// peptidoforms.
    /// # Errors
    /// When any piece is not a structurally valid ProForma peptidoform.
    pub fn pro_forma(line: &str) -> ParserResult<Self> {
        let mut warnings = Vec::new();
        let chains = split_outside_brackets(line, "//")
            .into_iter()
            .map(|chain| PeptidoformChain::pro_forma_inner(chain, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((Self { chains }, warnings))
    }

    /// Whether this definition contains more than one peptide chain.
    pub fn is_multi_chain(&self) -> bool {
        self.chains.len() > 1
    }
}

/// Strip a trailing `/charge` and optional `[ionic]` from a peptidoform
/// piece. Returns the end of the remaining body and the stripped parts; a
/// malformed suffix leaves the piece untouched so the main parser reports
/// the offending character.
fn strip_charge(line: &str) -> (usize, Option<i32>, Option<String>) {
    let Some(slash) = find_outside_brackets(line, b'/') else {
        return (line.len(), None, None);
    };
    let after = &line[slash + 1..];
    let bytes = after.as_bytes();
    let mut number_end = usize::from(matches!(bytes.first(), Some(&(b'+' | b'-'))));
    let digits = bytes[number_end..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return (line.len(), None, None);
    }
    number_end += digits;
    let Ok(charge) = after[..number_end].parse::<i32>() else {
        return (line.len(), None, None);
    };
    match bytes.get(number_end) {
        None => (slash, Some(charge), None),
        Some(&b'[') => match end_of_enclosure(after, number_end + 1, b'[', b']') {
            Some(end) if end == after.len() - 1 => (
                slash,
                Some(charge),
                Some(after[number_end + 1..end].to_string()),
            ),
            _ => (line.len(), None, None),
        },
        Some(_) => (line.len(), None, None),
    }
}

impl Display for Peptidoform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for global in &self.global {
            match global.mod_type {
                GlobalModType::Fixed => write!(
                    f,
                    "<[{}]@{}>",
                    global.modification,
                    global.target_residues.iter().join(",")
                )?,
                GlobalModType::Isotope => write!(f, "<{}>", global.modification)?,
            }
        }
        if !self.unknown_position.is_empty() {
            let mut groups: Vec<(String, usize)> = Vec::new();
            for modification in &self.unknown_position {
                let body = modification.to_string();
                if let Some(group) = groups.iter_mut().find(|(text, _)| *text == body) {
                    group.1 += 1;
                } else {
                    groups.push((body, 1));
                }
            }
            for (body, count) in &groups {
                if *count > 1 {
                    write!(f, "[{body}]^{count}")?;
                } else {
                    write!(f, "[{body}]")?;
                }
            }
            write!(f, "?")?;
        }
        for labile in &self.labile {
            write!(f, "{{{labile}}}")?;
        }
        if !self.n_term.is_empty() {
            for modification in &self.n_term {
                write!(f, "[{modification}]")?;
            }
            write!(f, "-")?;
        }

        // Every distinct range, discovered from the residue that opens it
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for (index, residue) in self.residues.iter().enumerate() {
            for modification in &residue.mods {
                if modification.in_range && modification.range_start == Some(index) {
                    let span = (index, modification.range_end.unwrap_or(index));
                    if !ranges.contains(&span) {
                        ranges.push(span);
                    }
                }
            }
        }

        for (index, residue) in self.residues.iter().enumerate() {
            for ambiguity in self.sequence_ambiguities.iter().filter(|a| a.position == index) {
                write!(f, "(?{})", ambiguity.value)?;
            }
            for _ in ranges.iter().filter(|(start, _)| *start == index) {
                write!(f, "(")?;
            }
            write!(f, "{}", residue.code)?;
            for modification in residue.mods.iter().filter(|m| !m.in_range) {
                if modification.kind == ModificationKind::Ambiguous
                    && modification.ambiguity_group().is_none()
                {
                    write!(f, "{{{modification}}}")?;
                } else {
                    write!(f, "[{modification}]")?;
                }
            }
            let mut closing: Vec<(usize, usize)> = ranges
                .iter()
                .copied()
                .filter(|(_, end)| *end == index)
                .collect();
            closing.sort_by_key(|(start, _)| std::cmp::Reverse(*start));
            for (start, end) in closing {
                write!(f, ")")?;
                for modification in residue.mods.iter().filter(|m| {
                    m.in_range && m.range_start == Some(start) && m.range_end == Some(end)
                }) {
                    write!(f, "[{modification}]")?;
                }
            }
        }
        for ambiguity in self
            .sequence_ambiguities
            .iter()
            .filter(|a| a.position >= self.residues.len())
        {
            write!(f, "(?{})", ambiguity.value)?;
        }

        if !self.c_term.is_empty() {
            write!(f, "-")?;
            for modification in &self.c_term {
                write!(f, "[{modification}]")?;
            }
        }
        if let Some(charge) = self.charge {
            write!(f, "/{charge}")?;
            if let Some(species) = &self.ionic_species {
                write!(f, "[{species}]")?;
            }
        }
        Ok(())
    }
}

impl Display for PeptidoformChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.peptidoforms.iter().join("+"))
    }
}

impl Display for CompoundPeptidoform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.chains.iter().join("//"))
    }
}

impl std::ops::Index<usize> for Peptidoform {
    type Output = Residue;

    fn index(&self, index: usize) -> &Self::Output {
        &self.residues[index]
    }
}

impl FromIterator<Residue> for Peptidoform {
    fn from_iter<Iter: IntoIterator<Item = Residue>>(iter: Iter) -> Self {
        Self {
            residues: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}
