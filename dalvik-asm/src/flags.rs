//! Per-opcode control-flow flags and constant-pool index kinds.
//!
//! `IS_INVOKE` sits alongside the four flow flags (branch/continue/switch/
//! throw/return) because the register-map generator needs to recognize
//! invoke-shaped instructions as GC points even when they don't otherwise
//! branch, switch, throw, or return.

use bitflags::bitflags;

bitflags! {
    /// Flags describing how an instruction can affect control flow.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OpFlags: u8 {
        /// Conditional or unconditional branch.
        const CAN_BRANCH = 1 << 0;
        /// Control flow may continue to the next instruction.
        const CAN_CONTINUE = 1 << 1;
        /// `packed-switch` / `sparse-switch`.
        const CAN_SWITCH = 1 << 2;
        /// May cause an exception to be thrown.
        const CAN_THROW = 1 << 3;
        /// Returns; no successor instruction.
        const CAN_RETURN = 1 << 4;
        /// Any `invoke-*` form (including quickened and inlined forms).
        const IS_INVOKE = 1 << 5;
    }
}

impl OpFlags {
    /// A GC point is any place the interpreter may yield to the collector:
    /// branches, switches, throws, returns, and invokes.
    #[must_use]
    pub const fn is_gc_point(self) -> bool {
        self.intersects(Self::CAN_BRANCH
            .union(Self::CAN_SWITCH)
            .union(Self::CAN_THROW)
            .union(Self::CAN_RETURN)
            .union(Self::IS_INVOKE))
    }
}

/// What kind of constant-pool reference (if any) an opcode's index operand
/// names. Mirrors `InstructionIndexType` in `InstrUtils.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum IndexKind {
    /// No index operand.
    None_,
    /// "It depends" — used only by `throw-verification-error`, whose high
    /// byte selects whether the buried index is a class/field/method ref.
    Varies,
    /// `new-instance`, `new-array`, `check-cast`, `instance-of`, ...
    TypeRef,
    /// `const-string`.
    StringRef,
    /// `invoke-*`.
    MethodRef,
    /// `iget`/`iput`/`sget`/`sput`.
    FieldRef,
    /// Resolved inline-method table slot (quickened).
    InlineMethod,
    /// Resolved vtable slot (quickened `invoke-virtual-quick`/`invoke-super-quick`).
    VtableOffset,
    /// Resolved byte offset into the holding object (quickened `iget`/`iput`).
    FieldOffset,
}
