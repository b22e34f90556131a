use serde::{Deserialize, Serialize};
use thin_vec::ThinVec;

use crate::{chemistry, error::ProFormaError};

use super::modification::Modification;

/// One position in a peptidoform: a residue code and the modifications
/// attached to it, in attachment order.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Residue {
    /// The single letter residue code, uppercase. `X` is the gap marker.
    pub code: char,
    /// The 0-based position within the owning chain.
    pub index: usize,
    /// All modifications attached to this site.
    pub mods: ThinVec<Modification>,
}

impl Residue {
    /// A bare residue at the given position. Lowercase codes are accepted
    /// and canonicalised to uppercase.
    /// # Errors
    /// When the code has no mass table entry.
    pub fn new(code: char, index: usize) -> Result<Self, ProFormaError> {
        let code = code.to_ascii_uppercase();
        if chemistry::residue_mass(code).is_none() {
            return Err(ProFormaError::UnknownResidue(code));
        }
        Ok(Self {
            code,
            index,
            mods: ThinVec::new(),
        })
    }

    /// The monoisotopic mass of the bare residue, without modifications.
    pub fn mass(&self) -> Option<f64> {
        chemistry::residue_mass(self.code)
    }

    /// Whether this is the gap marker `X`.
    pub fn is_gap(&self) -> bool {
        self.code == 'X'
    }
}
