#![doc = include_str!("../README.md")]

mod error;
mod helper_functions;

/// Monoisotopic masses and chemical formula syntax.
pub mod chemistry;
/// The mass calculator and fragment-pair constructor.
pub mod fragment;
/// Monosaccharides and glycan composition syntax.
pub mod glycan;
/// Peptidoforms, residues, and modifications.
pub mod sequence;

pub use error::{ProFormaError, ProFormaWarning};

/// The result of a parser: the parsed value plus any recoverable warnings if
/// it succeeded, or a fatal error if it failed.
pub type ParserResult<T> = Result<(T, Vec<ProFormaWarning>), ProFormaError>;

/// A subset of the types that are envisioned to be used the most, importing
/// this is a good starting point for working with the crate.
pub mod prelude {
    pub use crate::sequence::{
        CompoundPeptidoform, GlobalModType, GlobalModification, Modification, ModificationKind,
        ModificationValue, Peptidoform, PeptidoformChain, PipeValue, PipeValueKind, Residue,
        SequenceAmbiguity,
    };
    pub use crate::{ParserResult, ProFormaError, ProFormaWarning};
}
