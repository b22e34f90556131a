use crate::sequence::{Modification, ModificationKind, ModificationValue, PipeValueKind};

fn parse(raw: &str) -> ModificationValue {
    let mut warnings = Vec::new();
    let value = ModificationValue::parse(raw, &mut warnings);
    assert!(warnings.is_empty(), "'{raw}' produced warnings: {warnings:?}");
    value
}

#[test]
fn plain_synonym() {
    let value = parse("Phospho");
    assert_eq!(value.primary_value, "Phospho");
    assert_eq!(value.source, None);
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Synonym);
}

#[test]
fn sourced_synonym() {
    let value = parse("U:Phospho");
    assert_eq!(value.primary_value, "Phospho");
    assert_eq!(value.source.as_deref(), Some("U"));
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Synonym);
}

#[test]
fn mass_shift() {
    let value = parse("+79.966");
    assert_eq!(value.primary_value, "+79.966");
    assert_eq!(value.mass, Some(79.966.into()));
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Mass);
}

#[test]
fn mass_annotation() {
    let value = parse("MASS:79.966");
    assert_eq!(value.mass, Some(79.966.into()));
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Mass);
    let value = parse("mass:-5");
    assert_eq!(value.mass, Some((-5.0).into()));
}

#[test]
fn sourced_numeric_body_is_a_synonym() {
    let value = parse("U:+15.995");
    assert_eq!(value.source.as_deref(), Some("U"));
    assert!(value.mass.is_none());
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Synonym);
    assert_eq!(value.pipe_values[0].assigned_kinds, vec![PipeValueKind::Synonym]);
}

#[test]
fn observed_mass() {
    let value = parse("Obs:+79.978");
    assert_eq!(value.source.as_deref(), Some("Obs"));
    assert_eq!(value.mass, None);
    assert_eq!(value.observed_mass(), Some(79.978));
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::ObservedMass);
}

#[test]
fn malformed_observed_mass_degrades() {
    let mut warnings = Vec::new();
    let value = ModificationValue::parse("Obs:notanumber", &mut warnings);
    assert_eq!(warnings.len(), 1);
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Synonym);
    assert_eq!(value.primary_value, "notanumber");
    assert_eq!(value.source.as_deref(), Some("Obs"));
}

#[test]
fn glycans() {
    let value = parse("Glycan:HexNAc2Hex3");
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Glycan);
    assert!(value.pipe_values[0].is_valid_glycan);
    let value = parse("Glycan:Mystery");
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Glycan);
    assert!(!value.pipe_values[0].is_valid_glycan);
}

#[test]
fn gno_is_a_gap() {
    let value = parse("GNO:G59626AS");
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Gap);
    assert!(value.pipe_values[0].is_valid_glycan);
}

#[test]
fn formulas() {
    let value = parse("Formula:C12H20O2");
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Formula);
    assert!(value.pipe_values[0].is_valid_formula);
    let value = parse("Formula:c12");
    assert!(!value.pipe_values[0].is_valid_formula);
}

#[test]
fn info_tags_keep_their_payload() {
    let value = parse("INFO:Created on 2021-06");
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::InfoTag);
    assert_eq!(value.primary_value, "Created on 2021-06");
}

#[test]
fn crosslink_definition_and_reference() {
    let value = parse("XLMOD:02001#XL1");
    assert_eq!(value.crosslink_id(), Some("XL1"));
    assert!(!value.is_crosslink_ref());
    assert_eq!(value.source.as_deref(), Some("XLMOD"));
    assert_eq!(value.primary_value, "02001");

    let value = parse("#XL1");
    assert_eq!(value.crosslink_id(), Some("XL1"));
    assert!(value.is_crosslink_ref());
    assert_eq!(value.primary_value, "");
}

#[test]
fn branch_definition_and_reference() {
    let value = parse("MOD:00093#BRANCH");
    assert!(value.is_branch());
    assert!(!value.is_branch_ref());
    assert_eq!(value.primary_value, "00093");

    let value = parse("#BRANCH");
    assert!(value.is_branch_ref());
    assert!(!value.is_branch());
}

#[test]
fn ambiguity_groups() {
    let value = parse("Phospho#g1(0.90)");
    assert_eq!(value.ambiguity_group(), Some("g1"));
    assert_eq!(value.localization_score(), Some(0.9));
    assert!(!value.is_ambiguity_ref());
    assert_eq!(value.pipe_values[0].kind, PipeValueKind::Ambiguity);
    assert!(value.pipe_values[0].assigned_kinds.contains(&PipeValueKind::Synonym));

    let value = parse("#g1");
    assert!(value.is_ambiguity_ref());
    assert_eq!(value.ambiguity_group(), Some("g1"));
}

#[test]
fn pipes_keep_their_order() {
    let value = parse("Phospho|+79.966331|INFO:newly discovered");
    assert_eq!(value.primary_value, "Phospho");
    assert_eq!(value.mass, Some(79.966331.into()));
    assert_eq!(value.pipe_values.len(), 3);
    assert_eq!(value.pipe_values[1].kind, PipeValueKind::Mass);
    assert_eq!(value.info_tags().collect::<Vec<_>>(), vec!["newly discovered"]);
    assert!(value.synonyms().next().is_none());
}

#[test]
fn duplicate_pipes_serialise_once() {
    let mut warnings = Vec::new();
    let modification = Modification::new(
        ModificationKind::Static,
        ModificationValue::parse("Phospho|Phospho", &mut warnings),
    );
    assert_eq!(modification.to_string(), "Phospho");
}

#[test]
fn negative_mass_drops_redundant_zeros() {
    let mut warnings = Vec::new();
    let modification = Modification::new(
        ModificationKind::Static,
        ModificationValue::parse("-10.0", &mut warnings),
    );
    assert_eq!(modification.to_string(), "-10");
}
