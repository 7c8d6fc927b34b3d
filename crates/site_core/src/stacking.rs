//! Stacking precedence over the aside drawer.
//!
//! Neither controller owns the drawer's z-index. An owner that needs to sit
//! above the drawer raises itself here; the drawer's override is derived from
//! whoever currently holds precedence.

use std::collections::BTreeSet;

use shared::domain::StackingOwner;
use tracing::debug;

/// z-index applied to the aside while any owner holds precedence.
pub const ASIDE_LOWERED_Z_INDEX: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackingArbiter {
    aside_present: bool,
    holders: BTreeSet<StackingOwner>,
}

impl StackingArbiter {
    pub fn new(aside_present: bool) -> Self {
        Self {
            aside_present,
            holders: BTreeSet::new(),
        }
    }

    /// Returns `false` when there is no aside to lower; nothing is recorded.
    pub fn raise(&mut self, owner: StackingOwner) -> bool {
        if !self.aside_present {
            debug!(?owner, "no aside present; stacking raise skipped");
            return false;
        }
        if self.holders.insert(owner) {
            debug!(?owner, "stacking precedence raised over aside");
        }
        true
    }

    pub fn release(&mut self, owner: StackingOwner) {
        if self.holders.remove(&owner) {
            debug!(?owner, "stacking precedence released");
        }
    }

    pub fn holds(&self, owner: StackingOwner) -> bool {
        self.holders.contains(&owner)
    }

    pub fn aside_z_index(&self) -> Option<i32> {
        (!self.holders.is_empty()).then_some(ASIDE_LOWERED_Z_INDEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_lowers_aside_until_released() {
        let mut arbiter = StackingArbiter::new(true);
        assert_eq!(arbiter.aside_z_index(), None);

        assert!(arbiter.raise(StackingOwner::PreviewModal));
        assert_eq!(arbiter.aside_z_index(), Some(ASIDE_LOWERED_Z_INDEX));

        arbiter.release(StackingOwner::PreviewModal);
        assert_eq!(arbiter.aside_z_index(), None);
    }

    #[test]
    fn raise_without_aside_records_nothing() {
        let mut arbiter = StackingArbiter::new(false);
        assert!(!arbiter.raise(StackingOwner::PreviewModal));
        assert!(!arbiter.holds(StackingOwner::PreviewModal));
        assert_eq!(arbiter.aside_z_index(), None);
    }

    #[test]
    fn release_of_non_holder_is_noop() {
        let mut arbiter = StackingArbiter::new(true);
        arbiter.release(StackingOwner::PreviewModal);
        assert_eq!(arbiter, StackingArbiter::new(true));
    }
}
