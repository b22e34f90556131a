use std::sync::LazyLock;

use regex::Regex;

use crate::{
    error::{ProFormaError, ProFormaWarning},
    helper_functions::{end_of_enclosure, find_outside_brackets, rfind_outside_brackets},
};

use super::modification::{
    GlobalModType, GlobalModification, Modification, ModificationKind, ModificationValue,
    SequenceAmbiguity,
};

/// A signed mass shift and nothing else.
static MASS_SHIFT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]\d+(\.\d+)?$").unwrap());

/// The output of parsing one peptidoform piece (charge already stripped):
/// the base residue string and every modification keyed by where it sits.
#[derive(Debug, Default)]
pub(crate) struct ParsedChain {
    pub base_sequence: String,
    /// Site modifications as `(residue index, modification)` in encounter
    /// order. Range modifications occur once per covered residue.
    pub site_mods: Vec<(usize, Modification)>,
    pub n_term: Vec<Modification>,
    pub c_term: Vec<Modification>,
    pub labile: Vec<Modification>,
    pub unknown_position: Vec<Modification>,
    pub global: Vec<GlobalModification>,
    pub sequence_ambiguities: Vec<SequenceAmbiguity>,
}

/// Parse one peptidoform piece of a ProForma string. The phases run in a
/// fixed order over a shrinking prefix: global `<…>` blocks, the
/// unknown-position prefix, labile `{…}` blocks, N-terminal modifications,
/// C-terminal modifications from the right, and finally the residue walk.
pub(crate) fn parse_pro_forma(
    line: &str,
    warnings: &mut Vec<ProFormaWarning>,
) -> Result<ParsedChain, ProFormaError> {
    let mut out = ParsedChain::default();
    let bytes = line.as_bytes();
    let mut index = 0;

    // Global modifications
    while bytes.get(index) == Some(&b'<') {
        let end = end_of_enclosure(line, index + 1, b'<', b'>')
            .ok_or(ProFormaError::UnclosedAngle(index))?;
        out.global.push(parse_global(&line[index + 1..end], warnings));
        index = end + 1;
    }

    // Unknown position modifications. A run of bracket groups with optional
    // `^N` multiplicity only counts when terminated by `?`, otherwise it is
    // the start of the normal sequence and nothing is consumed.
    if line[index..].contains('?') {
        let mut cursor = index;
        let mut collected = Vec::new();
        let mut collected_warnings = Vec::new();
        while bytes.get(cursor) == Some(&b'[') {
            let end = end_of_enclosure(line, cursor + 1, b'[', b']')
                .ok_or(ProFormaError::UnclosedSquare(cursor))?;
            let modification = Modification::new(
                ModificationKind::UnknownPosition,
                ModificationValue::parse(&line[cursor + 1..end], &mut collected_warnings),
            );
            cursor = end + 1;
            let mut count = 1;
            if bytes.get(cursor) == Some(&b'^') {
                let digits = line[cursor + 1..]
                    .bytes()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if digits == 0 {
                    break;
                }
                count = line[cursor + 1..cursor + 1 + digits].parse().unwrap_or(1);
                cursor += 1 + digits;
            }
            collected.extend(std::iter::repeat_n(modification, count));
        }
        if bytes.get(cursor) == Some(&b'?') {
            out.unknown_position = collected;
            warnings.append(&mut collected_warnings);
            index = cursor + 1;
        }
    }

    // Labile modifications
    let mut labile_number = 1;
    while bytes.get(index) == Some(&b'{') {
        let end = end_of_enclosure(line, index + 1, b'{', b'}')
            .ok_or(ProFormaError::UnclosedCurly(index))?;
        let interior = &line[index + 1..end];
        if !interior.starts_with("Glycan:") {
            return Err(ProFormaError::MalformedLabile(index));
        }
        let mut modification = Modification::new(
            ModificationKind::Labile,
            ModificationValue::parse(interior, warnings),
        );
        modification.labile = true;
        modification.labile_number = Some(labile_number);
        labile_number += 1;
        out.labile.push(modification);
        index = end + 1;
    }

    // N-terminal modifications: bracket groups before the first free dash
    if bytes.get(index) == Some(&b'[')
        && let Some(dash) = find_outside_brackets(&line[index..], b'-')
    {
        let dash = index + dash;
        let mut cursor = index;
        let mut mods = Vec::new();
        let mut terminal_warnings = Vec::new();
        while cursor < dash && bytes[cursor] == b'[' {
            let end = end_of_enclosure(line, cursor + 1, b'[', b']')
                .ok_or(ProFormaError::UnclosedSquare(cursor))?;
            mods.push(Modification::new(
                ModificationKind::Terminal,
                ModificationValue::parse(&line[cursor + 1..end], &mut terminal_warnings),
            ));
            cursor = end + 1;
        }
        if cursor == dash {
            out.n_term = mods;
            warnings.append(&mut terminal_warnings);
            index = dash + 1;
        }
    }

    // C-terminal modifications: bracket groups after the last free dash,
    // searched right to left so dashes inside bodies are skipped
    let mut limit = line.len();
    if let Some(dash) = rfind_outside_brackets(&line[index..], b'-') {
        let dash = index + dash;
        let mut cursor = dash + 1;
        let mut mods = Vec::new();
        let mut terminal_warnings = Vec::new();
        while cursor < line.len() && bytes[cursor] == b'[' {
            let end = end_of_enclosure(line, cursor + 1, b'[', b']')
                .ok_or(ProFormaError::UnclosedSquare(cursor))?;
            mods.push(Modification::new(
                ModificationKind::Terminal,
                ModificationValue::parse(&line[cursor + 1..end], &mut terminal_warnings),
            ));
            cursor = end + 1;
        }
        if cursor == line.len() && !mods.is_empty() {
            out.c_term = mods;
            warnings.append(&mut terminal_warnings);
            limit = dash;
        }
    }

    // Main residue walk
    let mut position = 0_usize;
    let mut range_stack: Vec<(usize, usize)> = Vec::new();
    let mut gap_armed = false;
    while index < limit {
        match bytes[index] {
            b'(' if bytes.get(index + 1) == Some(&b'?') => {
                let end = end_of_enclosure(line, index + 1, b'(', b')')
                    .ok_or(ProFormaError::UnclosedParen(index))?;
                out.sequence_ambiguities.push(SequenceAmbiguity {
                    value: line[index + 2..end].to_string(),
                    position,
                });
                index = end + 1;
            }
            b'(' => {
                range_stack.push((index, position));
                index += 1;
            }
            b')' => {
                let (_, start) = range_stack
                    .pop()
                    .ok_or(ProFormaError::UnmatchedCloseParen(index))?;
                index += 1;
                while bytes.get(index) == Some(&b'[') {
                    let end = end_of_enclosure(line, index + 1, b'[', b']')
                        .ok_or(ProFormaError::UnclosedSquare(index))?;
                    if position > start {
                        let end_position = position - 1;
                        let mut modification =
                            classify_site_mod(&line[index + 1..end], false, true, warnings);
                        modification.in_range = true;
                        modification.range_start = Some(start);
                        modification.range_end = Some(end_position);
                        for covered in start..=end_position {
                            out.site_mods.push((covered, modification.clone()));
                        }
                    }
                    index = end + 1;
                }
            }
            b'[' => {
                let end = end_of_enclosure(line, index + 1, b'[', b']')
                    .ok_or(ProFormaError::UnclosedSquare(index))?;
                if position == 0 {
                    return Err(ProFormaError::MisplacedModification(index));
                }
                let modification = classify_site_mod(
                    &line[index + 1..end],
                    gap_armed,
                    !range_stack.is_empty(),
                    warnings,
                );
                out.site_mods.push((position - 1, modification));
                gap_armed = false;
                index = end + 1;
            }
            b'{' => {
                let end = end_of_enclosure(line, index + 1, b'{', b'}')
                    .ok_or(ProFormaError::UnclosedCurly(index))?;
                if position == 0 {
                    return Err(ProFormaError::MisplacedModification(index));
                }
                out.site_mods.push((
                    position - 1,
                    Modification::new(
                        ModificationKind::Ambiguous,
                        ModificationValue::parse(&line[index + 1..end], warnings),
                    ),
                ));
                index = end + 1;
            }
            byte if byte.is_ascii_alphabetic() => {
                let code = (byte as char).to_ascii_uppercase();
                if crate::chemistry::residue_mass(code).is_none() {
                    return Err(ProFormaError::UnknownResidue(code));
                }
                out.base_sequence.push(code);
                position += 1;
                gap_armed = code == 'X' && bytes.get(index + 1) == Some(&b'[');
                index += 1;
            }
            byte => return Err(ProFormaError::UnknownResidue(byte as char)),
        }
    }
    if let Some((open, _)) = range_stack.first() {
        return Err(ProFormaError::UnclosedParen(*open));
    }
    Ok(out)
}

/// One `<…>` interior: `modPart@targets` is a fixed modification with its
/// target list, anything else an isotope tag.
fn parse_global(interior: &str, warnings: &mut Vec<ProFormaWarning>) -> GlobalModification {
    if let Some(at) = find_outside_brackets(interior, b'@') {
        let mod_part = &interior[..at];
        let mod_part = mod_part
            .strip_prefix('[')
            .and_then(|part| part.strip_suffix(']'))
            .unwrap_or(mod_part);
        let target_residues: Vec<String> = interior[at + 1..]
            .split(',')
            .filter(|target| !target.is_empty())
            .map(ToString::to_string)
            .collect();
        if !target_residues.is_empty() {
            return GlobalModification {
                modification: Modification::new(
                    ModificationKind::Global,
                    ModificationValue::parse(mod_part, warnings),
                ),
                target_residues,
                mod_type: GlobalModType::Fixed,
            };
        }
    }
    GlobalModification {
        modification: Modification::new(
            ModificationKind::Global,
            ModificationValue::parse(interior, warnings),
        ),
        target_residues: Vec::new(),
        mod_type: GlobalModType::Isotope,
    }
}

/// Classify a site modification interior into its outer placement:
/// cross-links and branches first, then ambiguity groups, then gaps, and
/// for plain bodies the mass shift fast path decides between gap, variable,
/// and static.
fn classify_site_mod(
    interior: &str,
    gap_armed: bool,
    in_range: bool,
    warnings: &mut Vec<ProFormaWarning>,
) -> Modification {
    let value = ModificationValue::parse(interior, warnings);
    let kind = if value.is_crosslink_ref() || value.crosslink_id().is_some() {
        ModificationKind::Crosslink
    } else if value.is_branch() || value.is_branch_ref() {
        ModificationKind::Branch
    } else if value.ambiguity_group().is_some() {
        ModificationKind::Ambiguous
    } else if gap_armed {
        ModificationKind::Gap
    } else if MASS_SHIFT.is_match(interior) && in_range {
        ModificationKind::Variable
    } else {
        ModificationKind::Static
    };
    Modification::new(kind, value)
}
