use std::sync::LazyLock;

use ordered_float::OrderedFloat;
use regex::Regex;

use crate::{chemistry, error::ProFormaWarning, glycan};

use super::modification::{ModificationValue, PipeValue, PipeValueKind};

/// Matches `body#label(score)`: anything without `#`, one alphanumeric
/// label, and an optional parenthesised localisation score.
static LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^#]*)#([0-9A-Za-z]+)(?:\((\d+(?:\.\d+)?)\))?$").unwrap());

/// The behavioural family of a known source prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Source {
    /// Unimod, PSI-MOD, RESID, MOD and their one letter forms: named
    /// modifications this crate does not resolve further.
    Ontology,
    /// XLMOD, XL-MOD, XL, X: cross-linker vocabularies.
    CrossLinker,
    /// GNO, G: glycan accessions, treated as gap definitions.
    Gno,
    /// Obs: an experimentally observed mass.
    Observed,
    /// Formula: a chemical formula.
    Formula,
    /// Glycan: a glycan composition.
    Glycan,
    /// INFO: a free text tag.
    Info,
}

/// The source family for a known prefix, compared case-insensitively.
fn known_source(prefix: &str) -> Option<Source> {
    Some(match prefix.to_ascii_lowercase().as_str() {
        "unimod" | "u" | "psi-mod" | "m" | "resid" | "r" | "mod" => Source::Ontology,
        "xlmod" | "xl-mod" | "xl" | "x" => Source::CrossLinker,
        "gno" | "g" => Source::Gno,
        "obs" => Source::Observed,
        "formula" => Source::Formula,
        "glycan" => Source::Glycan,
        "info" => Source::Info,
        _ => return None,
    })
}

/// Split a known source prefix off, keeping the prefix as written.
fn split_source(text: &str) -> Option<(&str, Source, &str)> {
    let colon = text.find(':')?;
    let prefix = &text[..colon];
    known_source(prefix).map(|source| (prefix, source, &text[colon + 1..]))
}

/// The trailing `#…` label of a pipe value.
enum Label {
    Branch,
    CrossLink(String),
    Group(String, Option<OrderedFloat<f64>>),
}

/// Split a trailing `#…` label off. `#BRANCH` and `#XL…` take precedence
/// over ambiguity group labels.
fn split_label(text: &str) -> (&str, Option<Label>) {
    let Some(groups) = LABEL_REGEX.captures(text) else {
        return (text, None);
    };
    let body = groups.get(1).map_or("", |m| m.as_str());
    let label = groups.get(2).map_or("", |m| m.as_str());
    let score = groups
        .get(3)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(OrderedFloat::from);
    if label.eq_ignore_ascii_case("branch") {
        (body, Some(Label::Branch))
    } else if label.len() > 2 && label[..2].eq_ignore_ascii_case("xl") {
        (body, Some(Label::CrossLink(label.to_string())))
    } else {
        (body, Some(Label::Group(label.to_string(), score)))
    }
}

/// Whether a body looks like a signed mass shift: a leading sign and at
/// least one digit somewhere after it.
fn is_signed_number(body: &str) -> bool {
    (body.starts_with('+') || body.starts_with('-')) && body.bytes().any(|b| b.is_ascii_digit())
}

impl PipeValue {
    /// Classify one `|`-separated component. Classification is an ordered
    /// rule list: branch and cross-link labels first, then ambiguity
    /// groups, then known source prefixes, then `MASS:` annotations and
    /// bare mass shifts, and a synonym as the fallback. Bodies that fail
    /// their promised numeric form degrade to synonyms with a warning.
    pub(crate) fn parse(raw: &str, warnings: &mut Vec<ProFormaWarning>) -> Self {
        let mut this = Self {
            raw: raw.to_string(),
            value: raw.to_string(),
            ..Self::default()
        };

        // Info tags keep their payload untouched, nothing after the prefix
        // is interpreted, not even `#` labels.
        if let Some((prefix, Source::Info, payload)) = split_source(raw) {
            this.source = Some(prefix.to_string());
            this.value = payload.to_string();
            this.assign(PipeValueKind::InfoTag);
            return this;
        }

        let (mut body, label) = split_label(raw);
        match label {
            Some(Label::Branch) => {
                this.is_branch = !body.is_empty();
                this.is_branch_ref = body.is_empty();
                this.assign(PipeValueKind::Branch);
            }
            Some(Label::CrossLink(id)) => {
                this.is_crosslink_ref = body.is_empty();
                this.crosslink_id = Some(id);
                this.assign(PipeValueKind::Crosslink);
            }
            Some(Label::Group(group, score)) => {
                this.is_ambiguity_ref = body.is_empty();
                this.ambiguity_group = Some(group);
                this.localization_score = score;
                this.assign(PipeValueKind::Ambiguity);
            }
            None => (),
        }

        let mut source = None;
        if let Some((prefix, family, payload)) = split_source(body) {
            this.source = Some(prefix.to_string());
            source = Some(family);
            body = payload;
        }
        this.value = body.to_string();

        match source {
            Some(Source::Observed) => match body.parse::<f64>() {
                Ok(mass) if is_signed_number(body) || body.bytes().any(|b| b.is_ascii_digit()) => {
                    this.observed_mass = Some(mass.into());
                    this.assign(PipeValueKind::ObservedMass);
                }
                _ => {
                    warnings.push(ProFormaWarning::MalformedModifier(raw.to_string()));
                    this.assign(PipeValueKind::Synonym);
                }
            },
            Some(Source::Glycan) => {
                this.is_valid_glycan = glycan::is_valid_glycan(body);
                this.assign(PipeValueKind::Glycan);
            }
            Some(Source::Gno) => {
                this.is_valid_glycan = true;
                this.assign(PipeValueKind::Gap);
            }
            Some(Source::Formula) => {
                this.is_valid_formula = chemistry::is_valid_formula(body);
                this.assign(PipeValueKind::Formula);
            }
            Some(Source::CrossLinker) => {
                if !body.is_empty() {
                    this.assign(PipeValueKind::Synonym);
                }
            }
            Some(Source::Ontology) => {
                this.assign(PipeValueKind::Synonym);
            }
            Some(Source::Info) => unreachable!("info tags return early"),
            None => {
                if let Some(rest) = body
                    .get(..5)
                    .filter(|p| p.eq_ignore_ascii_case("mass:"))
                    .map(|_| &body[5..])
                {
                    match rest.parse::<f64>() {
                        Ok(mass) => {
                            this.value = rest.to_string();
                            this.mass = Some(mass.into());
                            this.assign(PipeValueKind::Mass);
                        }
                        Err(_) => {
                            warnings.push(ProFormaWarning::MalformedModifier(raw.to_string()));
                            this.assign(PipeValueKind::Synonym);
                        }
                    }
                } else if is_signed_number(body) {
                    match body.parse::<f64>() {
                        Ok(mass) => {
                            this.mass = Some(mass.into());
                            this.assign(PipeValueKind::Mass);
                        }
                        Err(_) => {
                            warnings.push(ProFormaWarning::MalformedModifier(raw.to_string()));
                            this.assign(PipeValueKind::Synonym);
                        }
                    }
                } else if !body.is_empty() {
                    this.assign(PipeValueKind::Synonym);
                }
            }
        }
        this
    }
}

impl ModificationValue {
    /// Parse the interior of one modification bracket: split on `|`, run
    /// every component through the pipe value classifier, and summarise the
    /// primary component at the top level.
    pub fn parse(raw: &str, warnings: &mut Vec<ProFormaWarning>) -> Self {
        let pipe_values: Vec<PipeValue> = raw
            .split('|')
            .map(|part| PipeValue::parse(part, warnings))
            .collect();
        Self {
            primary_value: pipe_values[0].value.clone(),
            source: pipe_values.iter().find_map(|p| p.source.clone()),
            mass: pipe_values.iter().find_map(|p| p.mass),
            pipe_values,
        }
    }
}
