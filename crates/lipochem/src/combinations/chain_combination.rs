// Standard Library Imports
use std::cmp::Reverse;

// External Crate Imports
use itertools::Itertools;

// Local Crate Imports
use super::{canonicalize, join};
use crate::{
    ChainCombination, ChainError, ChainSymbols, Encoding, RESOLVED_SEPARATOR, Result, Slot,
    UNRESOLVED_SEPARATOR,
    parsers::{combination_key, errors::final_parser},
};

// Public API ==========================================================================================================

impl ChainCombination {
    /// Decodes a combination key. Keys containing any `_` separator (or only a single slot) are unresolved, whilst
    /// keys joined entirely by `/` are resolved.
    pub fn decode(key: impl AsRef<str>, symbols: &ChainSymbols) -> Result<Self> {
        Ok(final_parser(combination_key(symbols), key.as_ref())?)
    }

    /// The slots of this combination, in the order they were given
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        match self {
            Self::Unresolved(slots) | Self::Resolved(slots) => slots,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Resolved slots are kept in their sn-position order, whilst unresolved slots are put in canonical order
    #[must_use]
    pub fn ordered_slots(&self) -> Vec<Slot> {
        match self {
            Self::Unresolved(slots) => canonicalize(slots),
            Self::Resolved(slots) => slots.clone(),
        }
    }

    /// The same combination, with its slots stored in [`ChainCombination::ordered_slots()`] order
    #[must_use]
    pub fn ordered(&self) -> Self {
        self.with_slots(self.ordered_slots())
    }

    /// The same chains as an unresolved combination, in the canonical order of their omega-free forms. Two
    /// combinations sharing an unresolved key line up slot-for-slot, however they were resolved and whichever omega
    /// positions they carry. Copies of the same chain are ordered by omega position, unknown positions first.
    #[must_use]
    pub fn aligned(&self) -> Self {
        let mut copies = self
            .slots()
            .iter()
            .cloned()
            .into_group_map_by(Slot::without_omega);
        for slots in copies.values_mut() {
            slots.sort_by_key(|slot| Reverse(slot.omega()));
        }

        let stripped: Vec<_> = self.slots().iter().map(Slot::without_omega).collect();
        let slots = canonicalize(&stripped)
            .iter()
            .filter_map(|chain| copies.get_mut(chain)?.pop())
            .collect();
        Self::Unresolved(slots)
    }

    /// The full name of this combination, including any omega positions
    pub fn key(&self, symbols: &ChainSymbols) -> Result<String> {
        join(
            &self.ordered_slots(),
            self.separator(),
            symbols,
            Encoding::FULL,
        )
    }

    /// Identifies the combination regardless of sn-positions and omega positions. Any two detections of the same
    /// chains, however they were resolved, will share this key.
    pub fn unresolved_key(&self, symbols: &ChainSymbols) -> Result<String> {
        let stripped: Vec<_> = self.slots().iter().map(Slot::without_omega).collect();
        join(
            &canonicalize(&stripped),
            UNRESOLVED_SEPARATOR,
            symbols,
            Encoding::WITHOUT_OMEGA,
        )
    }

    /// Names the sn-positions of a resolved combination, ignoring omega positions
    pub fn resolved_key(&self, symbols: &ChainSymbols) -> Result<Option<String>> {
        match self {
            Self::Unresolved(_) => Ok(None),
            Self::Resolved(slots) => {
                join(slots, RESOLVED_SEPARATOR, symbols, Encoding::WITHOUT_OMEGA).map(Some)
            }
        }
    }

    /// The omega position of every slot, in the order they were given
    #[must_use]
    pub fn omegas(&self) -> Vec<Option<u32>> {
        self.slots().iter().map(Slot::omega).collect()
    }

    /// Replaces the omega position of every slot (in the order they were given), failing unless exactly one omega
    /// is supplied per slot
    pub fn with_omegas(&self, omegas: &[Option<u32>]) -> Result<Self> {
        ChainError::check_cardinality(self.len(), omegas.len())?;
        let slots = self
            .slots()
            .iter()
            .zip(omegas)
            .map(|(slot, &omega)| slot.with_omega(omega))
            .collect();
        Ok(self.with_slots(slots))
    }

    #[must_use]
    pub fn without_omegas(&self) -> Self {
        self.with_slots(self.slots().iter().map(Slot::without_omega).collect())
    }

    fn with_slots(&self, slots: Vec<Slot>) -> Self {
        match self {
            Self::Unresolved(_) => Self::Unresolved(slots),
            Self::Resolved(_) => Self::Resolved(slots),
        }
    }

    const fn separator(&self) -> char {
        match self {
            Self::Unresolved(_) => UNRESOLVED_SEPARATOR,
            Self::Resolved(_) => RESOLVED_SEPARATOR,
        }
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use crate::{ChainDescriptor, DecodingErrorKind};

    use super::*;

    static SYMBOLS: LazyLock<ChainSymbols> = LazyLock::new(ChainSymbols::default);

    fn decode(key: &str) -> ChainCombination {
        ChainCombination::decode(key, &SYMBOLS).unwrap()
    }

    #[test]
    fn decode_combinations() {
        let palmitoyl = Slot::from(ChainDescriptor::acyl(16, 0));
        let oleoyl = Slot::from(ChainDescriptor::acyl(18, 1).with_omega(9));

        assert_eq!(
            decode("16:0/18:1(n-9)"),
            ChainCombination::Resolved(vec![palmitoyl.clone(), oleoyl.clone()])
        );
        assert_eq!(
            decode("18:1(n-9)_16:0"),
            ChainCombination::Unresolved(vec![oleoyl, palmitoyl.clone()])
        );
        assert_eq!(
            decode("16:0"),
            ChainCombination::Unresolved(vec![palmitoyl])
        );
    }

    #[test]
    fn decode_errors_point_into_the_key() {
        let Err(ChainError::Decoding { error }) = ChainCombination::decode("16:0_O-d18:1", &SYMBOLS)
        else {
            panic!("expected a decoding error");
        };
        assert_eq!(error.token(), "16:0_O-d18:1");
        assert_eq!(error.span().offset(), 7);
        assert_eq!(
            error.kind(),
            &DecodingErrorKind::LinkageWithLongChainBase("d".to_owned())
        );

        let Err(ChainError::Decoding { error }) = ChainCombination::decode("16:0 18:1", &SYMBOLS)
        else {
            panic!("expected a decoding error");
        };
        assert_eq!(error.kind(), &DecodingErrorKind::Incomplete);
        assert_eq!(error.span().offset(), 4);
    }

    #[test]
    fn combination_keys() {
        let unresolved = decode("18:1(n-9)_16:0");
        assert_eq!(unresolved.key(&SYMBOLS).unwrap(), "16:0_18:1(n-9)");
        assert_eq!(unresolved.unresolved_key(&SYMBOLS).unwrap(), "16:0_18:1");
        assert_eq!(unresolved.resolved_key(&SYMBOLS).unwrap(), None);

        let resolved = decode("18:1(n-9)/16:0");
        assert_eq!(resolved.key(&SYMBOLS).unwrap(), "18:1(n-9)/16:0");
        assert_eq!(resolved.unresolved_key(&SYMBOLS).unwrap(), "16:0_18:1");
        assert_eq!(
            resolved.resolved_key(&SYMBOLS).unwrap().as_deref(),
            Some("18:1/16:0")
        );
    }

    #[test]
    fn unresolved_keys_forget_omegas_before_ordering() {
        // With omegas, these two would be ordered differently, so they must be stripped before canonicalizing
        let a = decode("18:1(n-7)/18:1(n-9)/16:0");
        let b = decode("18:1(n-9)_[D7]16:0_18:1(n-7)");
        assert_eq!(a.unresolved_key(&SYMBOLS).unwrap(), "16:0_18:1_18:1");
        assert_eq!(b.unresolved_key(&SYMBOLS).unwrap(), "[D7]16:0_18:1_18:1");
        assert_eq!(
            decode("P-18:0_-_20:4").unresolved_key(&SYMBOLS).unwrap(),
            "P-18:0_20:4_-"
        );
    }

    #[test]
    fn ordered_slots() {
        let unresolved = decode("20:4_16:0");
        assert_eq!(
            unresolved.ordered_slots(),
            [
                Slot::from(ChainDescriptor::acyl(16, 0)),
                Slot::from(ChainDescriptor::acyl(20, 4))
            ]
        );
        assert_eq!(unresolved.ordered(), decode("16:0_20:4"));

        let resolved = decode("20:4/16:0");
        assert_eq!(resolved.ordered_slots(), resolved.slots());
        assert!(resolved.is_resolved());
        assert!(!unresolved.is_resolved());
        assert_eq!(resolved.len(), 2);
        assert!(!resolved.is_empty());
    }

    #[test]
    fn aligned_slots() {
        let expected = decode("16:0_18:1(n-9)");
        assert_eq!(decode("18:1(n-9)/16:0").aligned(), expected);
        assert_eq!(decode("16:0/18:1(n-9)").aligned(), expected);
        assert_eq!(decode("18:1(n-9)_16:0").aligned(), expected);

        // Omega positions never change which slot a chain lands in
        let ether = decode("P-18:1(n-7)_18:1(n-9)");
        assert_eq!(ether.ordered().omegas(), [Some(7), Some(9)]);
        assert_eq!(ether.aligned().omegas(), [Some(9), Some(7)]);
        assert_eq!(
            ether.aligned().unresolved_key(&SYMBOLS).unwrap(),
            ether.unresolved_key(&SYMBOLS).unwrap()
        );

        let copies = decode("18:1(n-9)/18:1/18:1(n-7)");
        assert_eq!(copies.aligned().omegas(), [None, Some(7), Some(9)]);

        assert_eq!(decode("-/18:1(n-9)").aligned(), decode("18:1(n-9)_-"));
    }

    #[test]
    fn replace_omegas() {
        let combination = decode("16:0/18:1/20:4");
        let with_omegas = combination.with_omegas(&[None, Some(9), Some(6)]).unwrap();
        assert_eq!(with_omegas.key(&SYMBOLS).unwrap(), "16:0/18:1(n-9)/20:4(n-6)");
        assert_eq!(with_omegas.omegas(), [None, Some(9), Some(6)]);
        assert_eq!(with_omegas.without_omegas(), combination);

        // Vacant slots still need an entry, but never keep an omega
        let vacant = decode("18:1_-");
        assert_eq!(
            vacant.with_omegas(&[Some(9), Some(3)]).unwrap().omegas(),
            [Some(9), None]
        );

        assert_eq!(
            combination.with_omegas(&[Some(9)]),
            Err(ChainError::CardinalityMismatch {
                expected: 3,
                found: 1
            })
        );
    }
}
