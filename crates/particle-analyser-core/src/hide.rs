//! Hide reasons.
//!
//! A particle can be hidden for several independent reasons at once. Each
//! filter only ever adds or removes its own reason, so turning one filter off
//! never reveals a particle another filter still hides.

use std::fmt;

/// An independent cause for a particle to be hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HideReason {
    /// Hidden explicitly by the user.
    ManuallyHidden,
    /// Volume lies outside the current `[min, max]` volume range.
    OutOfVolumeRange,
    /// Touches at least one currently excluded face.
    TouchesExcludedEdge,
}

impl HideReason {
    /// All reasons in declaration order.
    pub const ALL: [HideReason; 3] = [
        HideReason::ManuallyHidden,
        HideReason::OutOfVolumeRange,
        HideReason::TouchesExcludedEdge,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for HideReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HideReason::ManuallyHidden => "manually hidden",
            HideReason::OutOfVolumeRange => "out of volume range",
            HideReason::TouchesExcludedEdge => "touches excluded edge",
        };
        f.write_str(name)
    }
}

/// The set of reasons currently hiding a particle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HideReasons(u8);

impl HideReasons {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self(0)
    }

    /// Adds a reason. Returns true if it was not already present.
    pub fn insert(&mut self, reason: HideReason) -> bool {
        let added = !self.contains(reason);
        self.0 |= reason.bit();
        added
    }

    /// Removes a reason. Returns true if it was present.
    pub fn remove(&mut self, reason: HideReason) -> bool {
        let present = self.contains(reason);
        self.0 &= !reason.bit();
        present
    }

    /// Returns true if `reason` is active.
    pub fn contains(self, reason: HideReason) -> bool {
        self.0 & reason.bit() != 0
    }

    /// Removes every reason.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Returns true if no reason is active.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of active reasons.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the active reasons in declaration order.
    pub fn iter(self) -> impl Iterator<Item = HideReason> {
        HideReason::ALL
            .into_iter()
            .filter(move |reason| self.contains(*reason))
    }
}

impl FromIterator<HideReason> for HideReasons {
    fn from_iter<I: IntoIterator<Item = HideReason>>(iter: I) -> Self {
        let mut set = Self::new();
        for reason in iter {
            set.insert(reason);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_independent_reasons() {
        let mut reasons = HideReasons::new();
        reasons.insert(HideReason::ManuallyHidden);
        reasons.insert(HideReason::OutOfVolumeRange);
        assert_eq!(reasons.len(), 2);

        reasons.remove(HideReason::OutOfVolumeRange);
        assert!(!reasons.is_empty());
        assert!(reasons.contains(HideReason::ManuallyHidden));
    }

    #[test]
    fn test_idempotent() {
        let mut reasons = HideReasons::new();
        assert!(reasons.insert(HideReason::TouchesExcludedEdge));
        assert!(!reasons.insert(HideReason::TouchesExcludedEdge));
        assert_eq!(reasons.len(), 1);

        assert!(reasons.remove(HideReason::TouchesExcludedEdge));
        assert!(!reasons.remove(HideReason::TouchesExcludedEdge));
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_iter_and_clear() {
        let mut reasons: HideReasons = [HideReason::TouchesExcludedEdge, HideReason::ManuallyHidden]
            .into_iter()
            .collect();
        let listed: Vec<_> = reasons.iter().collect();
        assert_eq!(
            listed,
            vec![HideReason::ManuallyHidden, HideReason::TouchesExcludedEdge]
        );

        reasons.clear();
        assert!(reasons.is_empty());
        assert_eq!(reasons.iter().count(), 0);
    }

    proptest! {
        #[test]
        fn prop_matches_set_model(ops in prop::collection::vec((0usize..3, any::<bool>()), 0..40)) {
            let mut reasons = HideReasons::new();
            let mut model = std::collections::BTreeSet::new();
            for (i, add) in ops {
                let reason = HideReason::ALL[i];
                if add {
                    prop_assert_eq!(reasons.insert(reason), model.insert(reason));
                } else {
                    prop_assert_eq!(reasons.remove(reason), model.remove(&reason));
                }
            }
            prop_assert_eq!(reasons.len(), model.len());
            prop_assert_eq!(reasons.is_empty(), model.is_empty());
            prop_assert!(reasons.iter().eq(model.iter().copied()));
        }
    }
}
