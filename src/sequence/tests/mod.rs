#![allow(clippy::missing_panics_doc)]

/// Parse a case, serialise it, and reparse the result: the serialised form
/// has to match the canonical text (the case itself unless given
/// explicitly) and reparsing has to reproduce the same model.
macro_rules! round_trip {
    ($case:literal, $name:ident) => {
        round_trip!($case => $case, $name);
    };
    ($case:literal => $canonical:literal, $name:ident) => {
        #[test]
        fn $name() {
            let (parsed, _warnings) = $crate::sequence::CompoundPeptidoform::pro_forma($case)
                .unwrap_or_else(|error| panic!("'{}' failed to parse: {error}", $case));
            let back = parsed.to_string();
            assert_eq!(back, $canonical, "'{}' did not serialise canonically", $case);
            let (reparsed, _) = $crate::sequence::CompoundPeptidoform::pro_forma(&back)
                .unwrap_or_else(|error| panic!("'{back}' failed to reparse: {error}"));
            assert_eq!(
                reparsed.to_string(),
                $canonical,
                "'{}' is not a serialisation fixed point",
                $case
            );
        }
    };
}
pub(crate) use round_trip;

mod modification;
mod negative;
