//! The abstract register-type lattice used by the data-flow verifier.
//!
//! `PrimKind` is the closed 17-member primitive set; `RegType` adds the two
//! reference variants on top, generic over a caller-supplied class handle so
//! this crate never has to own a class pool.

use core::cmp::Ordering;
use core::fmt;

#[cfg(test)]
use alloc::vec;
#[cfg(test)]
use alloc::vec::Vec;

/// A site index into the uninitialized-instance map (`uninit::UninitMap`).
/// Site `0` is reserved for a constructor's implicit `this`
/// (`kUninitThisArgSlot` in the original verifier).
pub type SiteIdx = u32;

/// The constructor `this` pseudo-site.
pub const UNINIT_THIS_SLOT: SiteIdx = 0;

/// The 17-member closed primitive lattice.
/// Order here is cosmetic (it drives `Debug`/`strum` derive output); merge
/// behavior is defined in [`merge_primitive`], not by this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumCount, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimKind {
    /// Bottom of the lattice: a register slot that has never been assigned.
    Unknown,
    /// The uninitialized pseudo-value. Distinct from an uninitialized
    /// *reference* (`RegType::UninitRef`); merges only with itself.
    UninitVal,
    /// Top of the lattice: an irreconcilable merge, or a known-bad value.
    Conflict,
    Float,
    Zero,
    One,
    Boolean,
    PosByte,
    Byte,
    PosShort,
    Short,
    Char,
    Integer,
    LongLo,
    LongHi,
    DoubleLo,
    DoubleHi,
}

/// Ascending interval ladder for the "category-1 integer" domain. The merge
/// of two int-domain kinds is the first ladder entry whose interval
/// contains the union of both operands' intervals — this makes symmetry,
/// idempotence and monotonicity hold by construction rather than by
/// transcription of a hand-written table.
const INT_LADDER: &[(PrimKind, i64, i64)] = &[
    (PrimKind::Zero, 0, 0),
    (PrimKind::One, 1, 1),
    (PrimKind::Boolean, 0, 1),
    (PrimKind::PosByte, 0, i8::MAX as i64),
    (PrimKind::Byte, i8::MIN as i64, i8::MAX as i64),
    (PrimKind::PosShort, 0, i16::MAX as i64),
    (PrimKind::Short, i16::MIN as i64, i16::MAX as i64),
    (PrimKind::Char, 0, u16::MAX as i64),
    (PrimKind::Integer, i32::MIN as i64, i32::MAX as i64),
];

fn int_interval(kind: PrimKind) -> Option<(i64, i64)> {
    INT_LADDER
        .iter()
        .find(|(k, ..)| *k == kind)
        .map(|(_, lo, hi)| (*lo, *hi))
}

/// Merge two primitive kinds:
/// `Unknown` is the bottom (identity element), `Conflict` is the top
/// (absorbing element), `UninitVal` and the category-2 halves merge only
/// with themselves, `Float` is its own domain, and the category-1 integer
/// kinds widen along [`INT_LADDER`].
#[must_use]
pub fn merge_primitive(a: PrimKind, b: PrimKind) -> PrimKind {
    use PrimKind::*;
    if a == b {
        return a;
    }
    match (a, b) {
        (Unknown, x) | (x, Unknown) => x,
        (Conflict, _) | (_, Conflict) => Conflict,
        (UninitVal, _) | (_, UninitVal) => Conflict,
        (Float, Float) => Float,
        (Float, _) | (_, Float) => Conflict,
        (LongLo, LongLo) | (LongHi, LongHi) | (DoubleLo, DoubleLo) | (DoubleHi, DoubleHi) => a,
        (LongLo | LongHi | DoubleLo | DoubleHi, _) | (_, LongLo | LongHi | DoubleLo | DoubleHi) => {
            Conflict
        }
        _ => match (int_interval(a), int_interval(b)) {
            (Some((lo_a, hi_a)), Some((lo_b, hi_b))) => {
                let (lo, hi) = (lo_a.min(lo_b), hi_a.max(hi_b));
                INT_LADDER
                    .iter()
                    .find(|(_, l, h)| *l <= lo && hi <= *h)
                    .map_or(Conflict, |(k, ..)| *k)
            }
            _ => Conflict,
        },
    }
}

/// A register's abstract type: either a primitive, an initialized
/// reference, or an uninitialized reference tied to a `new-instance` site.
///
/// Generic over `C`, the caller's class-handle type (an index into its own
/// loaded-class pool — this crate never owns class identity).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegType<C> {
    /// One of the 17 primitive kinds.
    Primitive(PrimKind),
    /// A reference to a fully initialized instance of `C`.
    InitRef(C),
    /// A reference produced by `new-instance` at `site`, not yet passed to
    /// its matching constructor.
    UninitRef(SiteIdx),
}

impl<C: fmt::Debug> fmt::Debug for RegType<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p:?}"),
            Self::InitRef(c) => write!(f, "InitRef({c:?})"),
            Self::UninitRef(site) => write!(f, "UninitRef(@{site})"),
        }
    }
}

impl<C> RegType<C> {
    /// The bottom of the lattice: a register that has never been assigned.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::Primitive(PrimKind::Unknown)
    }

    /// The top of the lattice: an irreconcilable type.
    #[must_use]
    pub const fn conflict() -> Self {
        Self::Primitive(PrimKind::Conflict)
    }

    /// The constant `0`, which doubles as the reference lattice's bottom
    /// "`Zero` acts as the lattice bottom for references".
    #[must_use]
    pub const fn zero() -> Self {
        Self::Primitive(PrimKind::Zero)
    }

    /// `true` for any variant that denotes a reference value at runtime
    /// (initialized, uninitialized, or the `Zero` bottom which the GC-map
    /// generator also treats as a reference).
    #[must_use]
    pub fn is_reference_like(&self) -> bool {
        matches!(
            self,
            Self::InitRef(_) | Self::UninitRef(_) | Self::Primitive(PrimKind::Zero)
        )
    }

    /// `true` if this is a category-2 (64-bit) half.
    #[must_use]
    pub fn is_wide_half(&self) -> bool {
        matches!(
            self,
            Self::Primitive(
                PrimKind::LongLo | PrimKind::LongHi | PrimKind::DoubleLo | PrimKind::DoubleHi
            )
        )
    }

    /// `true` if this holds an uninitialized reference (site-tracked, or
    /// the constructor's implicit `this`).
    #[must_use]
    pub fn is_uninit_ref(&self) -> bool {
        matches!(self, Self::UninitRef(_))
    }

    /// `true` for the category-1 (32-bit) integer domain: `Float` is its own
    /// domain and is excluded, as are the category-2 halves, `Unknown`,
    /// `UninitVal`, and `Conflict`.
    #[must_use]
    pub fn is_int_category1(&self) -> bool {
        matches!(
            self,
            Self::Primitive(
                PrimKind::Zero
                    | PrimKind::One
                    | PrimKind::Boolean
                    | PrimKind::PosByte
                    | PrimKind::Byte
                    | PrimKind::PosShort
                    | PrimKind::Short
                    | PrimKind::Char
                    | PrimKind::Integer
            )
        )
    }

    /// `true` for any reference-denoting value the GC root scanner must
    /// treat as live: an initialized or uninitialized reference, or the
    /// `Uninit` pseudo-value. `Zero` is excluded here even though
    /// [`Self::is_reference_like`] counts it — the register map only scans
    /// registers that genuinely hold an object at the GC point.
    #[must_use]
    pub fn is_gc_reference(&self) -> bool {
        matches!(
            self,
            Self::InitRef(_) | Self::UninitRef(_) | Self::Primitive(PrimKind::UninitVal)
        )
    }
}

impl<C: Copy + Eq> RegType<C> {
    /// Merge two register types at a control-flow join point.
    ///
    /// `find_common_superclass` is consulted only when both operands are
    /// distinct initialized references; it must be symmetric in its own
    /// right for the overall merge to stay commutative.
    pub fn merge(self, other: Self, find_common_superclass: impl FnOnce(C, C) -> C) -> Self {
        match (self, other) {
            (Self::UninitRef(a), Self::UninitRef(b)) if a == b => Self::UninitRef(a),
            (Self::UninitRef(_), Self::UninitRef(_)) => Self::conflict(),
            (Self::UninitRef(_), Self::Primitive(PrimKind::Unknown)) => self,
            (Self::Primitive(PrimKind::Unknown), Self::UninitRef(_)) => other,
            (Self::UninitRef(_), _) | (_, Self::UninitRef(_)) => Self::conflict(),
            (Self::InitRef(a), Self::InitRef(b)) => {
                if a == b {
                    Self::InitRef(a)
                } else {
                    Self::InitRef(find_common_superclass(a, b))
                }
            }
            (Self::InitRef(c), Self::Primitive(PrimKind::Zero))
            | (Self::Primitive(PrimKind::Zero), Self::InitRef(c)) => Self::InitRef(c),
            (Self::InitRef(_), Self::Primitive(PrimKind::Unknown))
            | (Self::Primitive(PrimKind::Unknown), Self::InitRef(_)) => {
                if let Self::InitRef(c) = self {
                    Self::InitRef(c)
                } else {
                    other
                }
            }
            (Self::InitRef(_), Self::Primitive(_)) | (Self::Primitive(_), Self::InitRef(_)) => {
                Self::conflict()
            }
            (Self::Primitive(a), Self::Primitive(b)) => Self::Primitive(merge_primitive(a, b)),
        }
    }
}

/// A total order used only to check monotonic widening in tests: `rank` must never strictly decrease across a merge.
#[must_use]
pub fn lattice_rank(kind: PrimKind) -> u32 {
    use PrimKind::*;
    match kind {
        Unknown => 0,
        Zero => 1,
        One => 2,
        Boolean => 3,
        PosByte => 4,
        Byte => 5,
        PosShort => 6,
        Short => 7,
        Char => 8,
        Integer => 9,
        Float | LongLo | LongHi | DoubleLo | DoubleHi | UninitVal => 10,
        Conflict => 11,
    }
}

/// Compares two primitive kinds by lattice rank only (not a true partial
/// order — incomparable kinds at the same rank compare `Equal`). Exists so
/// tests can assert "merge never moves backward" without hand-maintaining a
/// second copy of the widening rules.
#[must_use]
pub fn rank_cmp(a: PrimKind, b: PrimKind) -> Ordering {
    lattice_rank(a).cmp(&lattice_rank(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_kinds() -> Vec<PrimKind> {
        use PrimKind::*;
        vec![
            Unknown, UninitVal, Conflict, Float, Zero, One, Boolean, PosByte, Byte, PosShort,
            Short, Char, Integer, LongLo, LongHi, DoubleLo, DoubleHi,
        ]
    }

    #[test]
    fn merge_is_symmetric() {
        for &a in &all_kinds() {
            for &b in &all_kinds() {
                assert_eq!(merge_primitive(a, b), merge_primitive(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn merge_is_idempotent() {
        for &a in &all_kinds() {
            assert_eq!(merge_primitive(a, a), a, "{a:?}");
        }
    }

    #[test]
    fn merge_never_narrows_rank() {
        for &a in &all_kinds() {
            for &b in &all_kinds() {
                let m = merge_primitive(a, b);
                assert!(lattice_rank(m) >= lattice_rank(a).max(lattice_rank(b)));
            }
        }
    }

    #[test]
    fn unknown_is_identity() {
        for &a in &all_kinds() {
            assert_eq!(merge_primitive(PrimKind::Unknown, a), a);
        }
    }

    #[test]
    fn conflict_is_absorbing() {
        for &a in &all_kinds() {
            assert_eq!(merge_primitive(PrimKind::Conflict, a), PrimKind::Conflict);
        }
    }

    #[test]
    fn byte_and_char_widen_to_integer() {
        assert_eq!(merge_primitive(PrimKind::Byte, PrimKind::Char), PrimKind::Integer);
    }

    #[test]
    fn byte_and_posshort_widen_to_short() {
        assert_eq!(merge_primitive(PrimKind::Byte, PrimKind::PosShort), PrimKind::Short);
    }

    #[test]
    fn uninit_ref_merges_only_with_same_site() {
        let a = RegType::<u32>::UninitRef(3);
        let b = RegType::<u32>::UninitRef(3);
        let c = RegType::<u32>::UninitRef(4);
        assert_eq!(a.merge(b, |x, _| x), RegType::UninitRef(3));
        assert_eq!(a.merge(c, |x, _| x), RegType::conflict());
    }

    #[test]
    fn zero_is_reference_bottom() {
        let zero = RegType::<u32>::zero();
        let obj = RegType::InitRef(7u32);
        assert_eq!(zero.merge(obj, |x, _| x), RegType::InitRef(7));
        assert_eq!(obj.merge(zero, |x, _| x), RegType::InitRef(7));
    }
}
