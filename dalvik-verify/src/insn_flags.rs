//! The per-code-unit instruction flag array.
//!
//! One 32-bit word per code unit: the low 16 bits hold the instruction
//! width, the high bits hold `in_try`/`branch_target`/`gc_point` and the
//! work-list `visited`/`changed` pair. `gc_point` is computed once during
//! the structural checks rather than recomputed on every register-map
//! emission.

use alloc::vec::Vec;
use alloc::vec;

use bitflags::bitflags;

const WIDTH_MASK: u32 = 0x0000_ffff;

bitflags! {
    struct Bits: u32 {
        const IN_TRY        = 1 << 16;
        const BRANCH_TARGET = 1 << 17;
        const GC_POINT      = 1 << 18;
        const VISITED       = 1 << 30;
        const CHANGED       = 1 << 31;
    }
}

/// The packed flags for a single code unit. `width != 0` iff this address
/// begins an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsnFlags(u32);

impl Default for InsnFlags {
    fn default() -> Self {
        Self(0)
    }
}

impl InsnFlags {
    /// Width in code units (0 = mid-instruction, or not yet visited by
    /// Pass A).
    #[must_use]
    pub const fn width(self) -> u16 {
        (self.0 & WIDTH_MASK) as u16
    }

    /// Set the width. Pass A calls this exactly once per instruction start.
    pub fn set_width(&mut self, width: u16) {
        self.0 = (self.0 & !WIDTH_MASK) | u32::from(width);
    }

    /// `true` if this address begins an instruction.
    #[must_use]
    pub const fn is_opcode_start(self) -> bool {
        self.width() != 0
    }

    #[must_use]
    pub const fn in_try(self) -> bool {
        self.0 & Bits::IN_TRY.bits() != 0
    }

    pub fn set_in_try(&mut self) {
        self.0 |= Bits::IN_TRY.bits();
    }

    #[must_use]
    pub const fn is_branch_target(self) -> bool {
        self.0 & Bits::BRANCH_TARGET.bits() != 0
    }

    pub fn set_branch_target(&mut self) {
        self.0 |= Bits::BRANCH_TARGET.bits();
    }

    #[must_use]
    pub const fn is_gc_point(self) -> bool {
        self.0 & Bits::GC_POINT.bits() != 0
    }

    pub fn set_gc_point(&mut self) {
        self.0 |= Bits::GC_POINT.bits();
    }

    #[must_use]
    pub const fn visited(self) -> bool {
        self.0 & Bits::VISITED.bits() != 0
    }

    pub fn set_visited(&mut self) {
        self.0 |= Bits::VISITED.bits();
    }

    #[must_use]
    pub const fn changed(self) -> bool {
        self.0 & Bits::CHANGED.bits() != 0
    }

    pub fn set_changed(&mut self) {
        self.0 |= Bits::CHANGED.bits();
    }

    pub fn clear_changed(&mut self) {
        self.0 &= !Bits::CHANGED.bits();
    }
}

/// One `InsnFlags` word per code unit in a method, plus the derived
/// "requires tracking" predicate.
#[derive(Debug, Clone)]
pub struct InsnFlagArray {
    flags: Vec<InsnFlags>,
    track_all: bool,
    want_register_map: bool,
}

impl InsnFlagArray {
    /// Allocate a flag array sized to `insns_size` code units, all zeroed.
    #[must_use]
    pub fn new(insns_size: usize, want_register_map: bool, track_all: bool) -> Self {
        Self {
            flags: vec![InsnFlags::default(); insns_size],
            track_all,
            want_register_map,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    #[must_use]
    pub fn get(&self, addr: usize) -> Option<InsnFlags> {
        self.flags.get(addr).copied()
    }

    pub fn get_mut(&mut self, addr: usize) -> Option<&mut InsnFlags> {
        self.flags.get_mut(addr)
    }

    /// `true` if `addr` needs a persisted register line during data-flow.
    #[must_use]
    pub fn requires_tracking(&self, addr: usize) -> bool {
        let Some(f) = self.get(addr) else {
            return false;
        };
        self.track_all
            || f.is_branch_target()
            || (self.want_register_map && f.is_gc_point())
            || addr == 0
    }

    /// Iterate `(address, flags)` for every instruction start.
    pub fn instruction_starts(&self) -> impl Iterator<Item = (usize, InsnFlags)> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_opcode_start())
            .map(|(i, f)| (i, *f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_round_trips_without_disturbing_other_bits() {
        let mut f = InsnFlags::default();
        f.set_in_try();
        f.set_width(3);
        assert_eq!(f.width(), 3);
        assert!(f.in_try());
        assert!(f.is_opcode_start());
    }

    #[test]
    fn zero_width_is_not_an_opcode_start() {
        let f = InsnFlags::default();
        assert_eq!(f.width(), 0);
        assert!(!f.is_opcode_start());
    }

    #[test]
    fn changed_can_be_set_and_cleared_independently_of_visited() {
        let mut f = InsnFlags::default();
        f.set_visited();
        f.set_changed();
        assert!(f.visited());
        assert!(f.changed());
        f.clear_changed();
        assert!(f.visited());
        assert!(!f.changed());
    }

    #[test]
    fn requires_tracking_always_true_at_address_zero() {
        let arr = InsnFlagArray::new(4, false, false);
        assert!(arr.requires_tracking(0));
        assert!(!arr.requires_tracking(1));
    }

    #[test]
    fn requires_tracking_honors_track_all() {
        let arr = InsnFlagArray::new(4, false, true);
        assert!(arr.requires_tracking(2));
    }

    #[test]
    fn requires_tracking_honors_branch_targets_and_gc_points() {
        let mut arr = InsnFlagArray::new(4, true, false);
        arr.get_mut(1).unwrap().set_branch_target();
        arr.get_mut(2).unwrap().set_gc_point();
        assert!(arr.requires_tracking(1));
        assert!(arr.requires_tracking(2));
        assert!(!arr.requires_tracking(3));
    }

    #[test]
    fn instruction_starts_skips_mid_instruction_addresses() {
        let mut arr = InsnFlagArray::new(3, false, false);
        arr.get_mut(0).unwrap().set_width(2);
        arr.get_mut(2).unwrap().set_width(1);
        let starts: Vec<usize> = arr.instruction_starts().map(|(a, _)| a).collect();
        assert_eq!(starts, vec![0, 2]);
    }
}
