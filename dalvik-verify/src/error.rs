//! Error taxonomy.
//!
//! Generic over the resolver's own error type, since `ResolutionFailure`
//! just carries whatever the resolver reported.

use alloc::string::String;

use thiserror::Error;

/// The resolution sub-kind carried by a soft-mode `ResolutionFailure`,
/// used both to classify the error and to pick the
/// `throw-verification-error` sub-opcode when rewriting in soft mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ResolutionKind {
    NoClass,
    ClassChange,
    AccessClass,
    NoField,
    AccessField,
    NoMethod,
    AccessMethod,
    InstantiationError,
    Generic,
}

/// Why static checking (Pass A/B/C) rejected a method. Always fatal.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StructuralReject {
    #[error("instruction at {addr} has width 0 (undefined opcode)")]
    UndefinedOpcode { addr: u32 },
    #[error("instruction at {addr} claims width {width}, exceeding the maximum of 5")]
    WidthTooLarge { addr: u32, width: u16 },
    #[error("instruction stream ends at {actual}, expected exactly {expected}")]
    StreamLengthMismatch { actual: u32, expected: u32 },
    #[error("method is declared with a body but has zero code")]
    EmptyConcreteMethod,
    #[error("try span [{start}, {end}) is empty or out of range (insns_size={insns_size})")]
    BadTrySpan { start: u32, end: u32, insns_size: u32 },
    #[error("try span endpoint {addr} does not land on an instruction start")]
    TryEndpointMidInstruction { addr: u32 },
    #[error("exception handler at {addr} does not land on an instruction start")]
    HandlerMidInstruction { addr: u32 },
    #[error("branch at {from} targets {to}, which is not an instruction start")]
    BadBranchTarget { from: u32, to: u32 },
    #[error("goto at {addr} has a zero offset (infinite no-op loop)")]
    ZeroOffsetGoto { addr: u32 },
    #[error("branch offset at {addr} overflows the 32-bit address space")]
    BranchOffsetOverflow { addr: u32 },
    #[error("switch table at {addr} is misaligned or has a bad signature")]
    BadSwitchTable { addr: u32 },
    #[error("sparse-switch keys at {addr} are not strictly ascending")]
    SparseSwitchKeysUnordered { addr: u32 },
    #[error("array-data table at {addr} is misaligned or has an inconsistent size")]
    BadArrayData { addr: u32 },
    #[error("new-instance at {addr} has a type descriptor that is not a class type")]
    NewInstanceNotClassType { addr: u32 },
    #[error("new-array at {addr} has an invalid dimension count {dims}")]
    BadArrayDimensions { addr: u32, dims: u8 },
    #[error("optimized opcode at {addr} is not allowed unless compatibility mode is set")]
    OptimizedOpcodeRejected { addr: u32 },
    #[error("instruction at {addr} was never visited by the data-flow pass")]
    DeadCode { addr: u32 },
}

/// A data-flow violation. Always fatal.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum TypeReject {
    #[error("at {addr}: cannot merge incompatible types {a} and {b}")]
    IncompatibleMerge { addr: u32, a: String, b: String },
    #[error("at {addr}: argument {index} has the wrong kind for this instruction")]
    BadArgumentKind { addr: u32, index: u32 },
    #[error("method may return with an uninitialized `this` still live")]
    UninitThisEscapesReturn,
    #[error("at {addr}: write to final field outside its declaring class")]
    FinalFieldWriteFromWrongSite { addr: u32 },
    #[error("at {addr}: {reason}")]
    Other { addr: u32, reason: String },
}

/// A resolution failure: class/field/method not found, not
/// accessible, or the wrong kind. Fatal in hard mode; rewritten to
/// `throw-verification-error` in soft mode.
#[derive(Debug, Clone, Error)]
#[error("resolution failure at {addr}: {kind:?}")]
pub struct ResolutionFailure {
    pub addr: u32,
    pub kind: ResolutionKind,
}

/// An impossible internal state. Always aborts the whole run.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum InternalAssert {
    #[error("merge table asymmetry: merge(a,b) != merge(b,a)")]
    MergeAsymmetry,
    #[error("visited instruction at {addr} has width 0")]
    VisitedZeroWidth { addr: u32 },
    #[error("work-list picked an address with no stored register line")]
    MissingRegisterLine { addr: u32 },
    #[error("{0}")]
    Other(String),
}

/// The top-level verification outcome for a single method.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum VerifyError {
    #[error(transparent)]
    Structural(#[from] StructuralReject),
    #[error(transparent)]
    Type(#[from] TypeReject),
    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),
    #[error(transparent)]
    Internal(#[from] InternalAssert),
}

impl VerifyError {
    /// `true` for errors that are recoverable via a soft-mode rewrite.
    #[must_use]
    pub fn is_soft_recoverable(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}
