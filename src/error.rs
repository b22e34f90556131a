use thiserror::Error;

/// A fatal error raised while reading a ProForma string. All byte positions
/// are relative to the peptidoform piece being parsed.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum ProFormaError {
    /// A `<` without matching `>`.
    #[error("unclosed '<' opened at byte {0}")]
    UnclosedAngle(usize),
    /// A `[` without matching `]`.
    #[error("unclosed '[' opened at byte {0}")]
    UnclosedSquare(usize),
    /// A `{` without matching `}`.
    #[error("unclosed '{{' opened at byte {0}")]
    UnclosedCurly(usize),
    /// A `(` without matching `)`.
    #[error("unclosed '(' opened at byte {0}")]
    UnclosedParen(usize),
    /// A `)` without a preceding open.
    #[error("unmatched ')' at byte {0}")]
    UnmatchedCloseParen(usize),
    /// A labile block whose interior does not start with `Glycan:`.
    #[error("labile modification at byte {0} does not start with 'Glycan:'")]
    MalformedLabile(usize),
    /// A residue code without a mass table entry.
    #[error("unknown residue '{0}'")]
    UnknownResidue(char),
    /// A modification group with no residue in front of it to attach to.
    #[error("modification at byte {0} is not preceded by a residue")]
    MisplacedModification(usize),
    /// Mass calculation hit a residue or modification without a known mass.
    #[error("no mass known for '{0}'")]
    MissingMass(String),
}

/// A recoverable problem found while reading a modification body. The
/// offending pipe value is kept as a synonym with its raw text intact, so
/// serialisation still reproduces the original characters.
#[derive(Clone, Debug, Eq, Error, Hash, PartialEq)]
pub enum ProFormaWarning {
    /// A pipe value that promised a number but did not deliver one, for
    /// example a non-numeric body after `Obs:`.
    #[error("'{0}' could not be read as a numeric modification, it is kept as a synonym")]
    MalformedModifier(String),
}
