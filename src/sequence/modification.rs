use std::fmt::{Display, Formatter, Write};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// The outer placement of a modification, independent of how its body is
/// classified.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum ModificationKind {
    /// A plain site modification.
    #[default]
    Static,
    /// A mass shift on a residue inside a range.
    Variable,
    /// An N or C terminal modification.
    Terminal,
    /// A modification with an uncertain site, `{…}` or `#group` labelled.
    Ambiguous,
    /// A cross-link definition or reference, `#XLid` labelled.
    Crosslink,
    /// A branch definition or reference, `#BRANCH` labelled.
    Branch,
    /// The defined mass of a gap residue `X`.
    Gap,
    /// A modification lost during fragmentation, `{Glycan:…}` at the front.
    Labile,
    /// A modification known to be present but without a known site.
    UnknownPosition,
    /// A modification applied to the whole sequence, `<…>` at the front.
    Global,
}

/// The classification of one `|`-separated interpretation inside a
/// modification body.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum PipeValueKind {
    /// A named modification, possibly with a controlled-vocabulary source.
    #[default]
    Synonym,
    /// A free text `INFO:` tag.
    InfoTag,
    /// A signed mass shift.
    Mass,
    /// An experimentally observed mass, `Obs:` prefixed.
    ObservedMass,
    /// A cross-link definition or reference.
    Crosslink,
    /// A branch definition or reference.
    Branch,
    /// An ambiguity group label, optionally with a localisation score.
    Ambiguity,
    /// A glycan composition, `Glycan:` prefixed.
    Glycan,
    /// A gap definition, `GNO:`/`G:` prefixed.
    Gap,
    /// A chemical formula, `Formula:` prefixed.
    Formula,
}

/// One `|`-separated interpretation of a modification body. A value can
/// carry several classifications at once, for example a mass shift inside an
/// ambiguity group; `kind` is the first that applied and `assigned_kinds`
/// holds them all.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PipeValue {
    /// The original bracket-interior fragment this was parsed from.
    pub raw: String,
    /// The payload after stripping the source prefix and any `#…` suffix.
    pub value: String,
    /// The primary classification.
    pub kind: PipeValueKind,
    /// Every classification that applied, in the order they applied.
    pub assigned_kinds: Vec<PipeValueKind>,
    /// The controlled-vocabulary source prefix, as written.
    pub source: Option<String>,
    /// The mass shift, set for `+N`/`-N` bodies and `MASS:` annotations.
    pub mass: Option<OrderedFloat<f64>>,
    /// The observed mass, set only under an `Obs:` source.
    pub observed_mass: Option<OrderedFloat<f64>>,
    /// The cross-link id, including its `XL` prefix.
    pub crosslink_id: Option<String>,
    /// True when the value is a bare `#XL…` reference.
    pub is_crosslink_ref: bool,
    /// True when the value defines a branch (`body#BRANCH`).
    pub is_branch: bool,
    /// True when the value is a bare `#BRANCH` reference.
    pub is_branch_ref: bool,
    /// The ambiguity group label, without `#`.
    pub ambiguity_group: Option<String>,
    /// The localisation score within the ambiguity group.
    pub localization_score: Option<OrderedFloat<f64>>,
    /// True when the value is a bare `#label` reference.
    pub is_ambiguity_ref: bool,
    /// Whether the body passed the glycan composition validator.
    pub is_valid_glycan: bool,
    /// Whether the body passed the chemical formula validator.
    pub is_valid_formula: bool,
}

impl PipeValue {
    /// Record a classification. The first one becomes the primary kind.
    pub(crate) fn assign(&mut self, kind: PipeValueKind) {
        if self.assigned_kinds.is_empty() {
            self.kind = kind;
        }
        if !self.assigned_kinds.contains(&kind) {
            self.assigned_kinds.push(kind);
        }
    }

    /// The numeric content of this value, defined or observed.
    pub fn numeric(&self) -> Option<f64> {
        self.mass.or(self.observed_mass).map(OrderedFloat::into_inner)
    }
}

/// The parsed interior of one modification bracket: an ordered list of pipe
/// values with the primary one summarised at the top level.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ModificationValue {
    /// The canonical textual identifier, for mass shift primaries the signed
    /// number string.
    pub primary_value: String,
    /// The source of the first pipe value that declared one.
    pub source: Option<String>,
    /// The first mass found across all pipe values.
    pub mass: Option<OrderedFloat<f64>>,
    /// All interpretations in input order, primary first.
    pub pipe_values: Vec<PipeValue>,
}

impl ModificationValue {
    /// All `INFO:` payloads.
    pub fn info_tags(&self) -> impl Iterator<Item = &str> {
        self.pipe_values
            .iter()
            .filter(|p| p.assigned_kinds.contains(&PipeValueKind::InfoTag))
            .map(|p| p.value.as_str())
    }

    /// All synonym texts beyond the primary value.
    pub fn synonyms(&self) -> impl Iterator<Item = &str> {
        self.pipe_values
            .iter()
            .skip(1)
            .filter(|p| p.assigned_kinds.contains(&PipeValueKind::Synonym))
            .map(|p| p.value.as_str())
    }

    /// The first observed mass on any pipe value.
    pub fn observed_mass(&self) -> Option<f64> {
        self.pipe_values
            .iter()
            .find_map(|p| p.observed_mass)
            .map(OrderedFloat::into_inner)
    }

    /// The first ambiguity group label on any pipe value.
    pub fn ambiguity_group(&self) -> Option<&str> {
        self.pipe_values
            .iter()
            .find_map(|p| p.ambiguity_group.as_deref())
    }

    /// The first localisation score on any ambiguity pipe value.
    pub fn localization_score(&self) -> Option<f64> {
        self.pipe_values
            .iter()
            .find_map(|p| p.localization_score)
            .map(OrderedFloat::into_inner)
    }

    /// The first cross-link id on any pipe value.
    pub fn crosslink_id(&self) -> Option<&str> {
        self.pipe_values.iter().find_map(|p| p.crosslink_id.as_deref())
    }

    /// Whether any pipe value is a bare `#label` reference.
    pub fn is_ambiguity_ref(&self) -> bool {
        self.pipe_values.iter().any(|p| p.is_ambiguity_ref)
    }

    /// Whether any pipe value is a bare `#XL…` reference.
    pub fn is_crosslink_ref(&self) -> bool {
        self.pipe_values.iter().any(|p| p.is_crosslink_ref)
    }

    /// Whether any pipe value defines a branch.
    pub fn is_branch(&self) -> bool {
        self.pipe_values.iter().any(|p| p.is_branch)
    }

    /// Whether any pipe value is a bare `#BRANCH` reference.
    pub fn is_branch_ref(&self) -> bool {
        self.pipe_values.iter().any(|p| p.is_branch_ref)
    }
}

/// A modification placed somewhere on a peptidoform: the parsed body plus
/// its outer placement and, for range modifications, the covered span.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Modification {
    /// The parsed bracket interior.
    pub value: ModificationValue,
    /// The outer placement.
    pub kind: ModificationKind,
    /// Whether this modification is labile.
    pub labile: bool,
    /// The 1-based ordinal among the labile modifications of its sequence.
    pub labile_number: Option<usize>,
    /// Whether this modification covers a contiguous residue range.
    pub in_range: bool,
    /// First residue index of the covered range, inclusive.
    pub range_start: Option<usize>,
    /// Last residue index of the covered range, inclusive.
    pub range_end: Option<usize>,
}

impl Modification {
    /// A modification with the given placement and no range or labile state.
    pub fn new(kind: ModificationKind, value: ModificationValue) -> Self {
        Self {
            value,
            kind,
            labile: false,
            labile_number: None,
            in_range: false,
            range_start: None,
            range_end: None,
        }
    }

    /// The mass of this modification, defined or observed.
    pub fn mass(&self) -> Option<f64> {
        self.value
            .mass
            .map(OrderedFloat::into_inner)
            .or_else(|| self.value.observed_mass())
    }

    /// The ambiguity group label, if any pipe value carries one.
    pub fn ambiguity_group(&self) -> Option<&str> {
        self.value.ambiguity_group()
    }

    /// The localisation score within the ambiguity group.
    pub fn localization_score(&self) -> Option<f64> {
        self.value.localization_score()
    }

    /// The cross-link id this modification defines or references.
    pub fn crosslink_id(&self) -> Option<&str> {
        self.value.crosslink_id()
    }

    /// Whether this is a bare cross-link reference.
    pub fn is_crosslink_ref(&self) -> bool {
        self.value.is_crosslink_ref()
    }

    /// Whether this defines a branch.
    pub fn is_branch(&self) -> bool {
        self.value.is_branch()
    }

    /// Whether this is a bare branch reference.
    pub fn is_branch_ref(&self) -> bool {
        self.value.is_branch_ref()
    }

    /// Whether this is a bare ambiguity group reference.
    pub fn is_ambiguity_ref(&self) -> bool {
        self.value.is_ambiguity_ref()
    }

    /// Write the canonical bracket interior: every pipe value in order, with
    /// source prefix, numeric or textual payload, and reference suffix,
    /// deduplicated on the full piece text.
    pub(crate) fn display_body(&self, f: &mut impl Write) -> std::fmt::Result {
        let mut pieces: Vec<String> = Vec::new();
        for pipe in &self.value.pipe_values {
            let mut piece = String::new();
            if let Some(source) = &pipe.source {
                piece.push_str(source);
                piece.push(':');
            }
            if let Some(numeric) = pipe.numeric() {
                write!(piece, "{numeric:+}")?;
            } else {
                piece.push_str(&pipe.value);
            }
            if pipe.is_branch || pipe.is_branch_ref {
                piece.push_str("#BRANCH");
            } else if let Some(id) = &pipe.crosslink_id {
                write!(piece, "#{id}")?;
            } else if let Some(group) = &pipe.ambiguity_group {
                write!(piece, "#{group}")?;
                if let Some(score) = pipe.localization_score {
                    write!(piece, "({score:.2})")?;
                }
            }
            if !pieces.contains(&piece) {
                pieces.push(piece);
            }
        }
        write!(f, "{}", pieces.iter().join("|"))
    }
}

impl Display for Modification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.display_body(f)
    }
}

/// How a global modification applies to the sequence.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum GlobalModType {
    /// An isotope tag, for example `13C`, applying everywhere.
    Isotope,
    /// A fixed modification on the listed target residues.
    Fixed,
}

/// A modification applied to the whole sequence through a `<…>` block.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct GlobalModification {
    /// The modification itself, with `Global` placement.
    pub modification: Modification,
    /// The residue codes a fixed modification targets. Targets may also be
    /// terminal selectors such as `N-term`. Empty for isotope tags.
    pub target_residues: Vec<String>,
    /// Isotope tag or fixed modification.
    pub mod_type: GlobalModType,
}

/// A stretch of alternative residues, `(?DQ)` in ProForma: the sequence may
/// contain these residues just before the stated position.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SequenceAmbiguity {
    /// The alternative residue codes.
    pub value: String,
    /// The 0-based residue index before which the ambiguity sits.
    pub position: usize,
}
