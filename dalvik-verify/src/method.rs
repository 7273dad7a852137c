//! The method contract a caller presents to the verifier.

use alloc::vec::Vec;

/// Method access flags relevant to verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessFlags {
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_native: bool,
    pub is_constructor: bool,
}

/// One try-catch span: instructions in `[start, end)` that are covered by
/// `handler` when `exception_type` (or any of its subclasses, or any
/// exception if `None`) is thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryItem<C> {
    pub start: u32,
    pub end: u32,
    pub handler: u32,
    pub exception_type: Option<C>,
}

/// A method's prototype: shorty-encoded parameter and return types. Shorty
/// characters follow the usual Dalvik convention: `V` void, `Z` boolean,
/// `B` byte, `S` short, `C` char, `I` int, `J` long, `F` float, `D` double,
/// `L` reference (object or array).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype {
    pub params_shorty: Vec<char>,
    pub return_shorty: char,
}

/// Everything the verifier needs about one method. `C` is the caller's class-handle type.
#[derive(Debug, Clone)]
pub struct MethodContract<C> {
    /// Total register count, including parameter and local registers.
    pub registers_size: u16,
    /// Incoming argument count, including the implicit `this` for instance
    /// methods.
    pub ins_size: u16,
    /// Maximum number of arguments passed by any `invoke-*` in this method's
    /// body (sizes the reserved "outs" window at the top of the frame).
    pub outs_size: u16,
    /// Raw 16-bit code-unit stream.
    pub insns: Vec<u16>,
    pub tries: Vec<TryItem<C>>,
    pub prototype: Prototype,
    pub access_flags: AccessFlags,
    /// The class this method is declared on (for `this`-typing and field/
    /// method visibility checks).
    pub declaring_class: C,
}

impl<C> MethodContract<C> {
    /// Total code-unit length of the instruction stream.
    #[must_use]
    pub fn insns_size(&self) -> usize {
        self.insns.len()
    }

    /// First register available to locals (registers below this are the
    /// incoming arguments).
    #[must_use]
    pub fn first_local_register(&self) -> u16 {
        self.registers_size.saturating_sub(self.ins_size)
    }
}
