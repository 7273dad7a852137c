//! Resolver trait contracts — the only way this crate talks to
//! class loading, linking, and method resolution. No implementation lives
//! here; callers plug in their own class-loading driver.

use alloc::string::String;

use crate::error::ResolutionKind;

/// What kind of dispatch an `invoke-*` instruction uses; passed to
/// `resolve_method` so the resolver can apply the right lookup rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokeKind {
    Direct,
    Static,
    Virtual,
}

/// A resolution error, reported with the sub-kind used to build a
/// [`crate::error::ResolutionFailure`] or pick a `throw-verification-error`
/// variant when the caller is in soft mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveError(pub ResolutionKind);

/// External collaborators the verifier consumes. `C`, `F`, `M`
/// are the caller's class/field/method handle types.
///
/// Implementations must be safe to call concurrently across different
/// methods.
pub trait Resolver {
    type Class: Copy + Eq;
    type Field: Copy;
    type Method: Copy;

    /// Resolve a type reference from `referrer`'s constant pool at `idx`.
    fn resolve_class(&self, referrer: Self::Class, idx: u32) -> Result<Self::Class, ResolveError>;

    /// Resolve an instance field reference.
    fn resolve_instance_field(
        &self,
        referrer: Self::Class,
        idx: u32,
    ) -> Result<Self::Field, ResolveError>;

    /// Resolve a static field reference.
    fn resolve_static_field(
        &self,
        referrer: Self::Class,
        idx: u32,
    ) -> Result<Self::Field, ResolveError>;

    /// Resolve a method reference by invoke kind.
    fn resolve_method(
        &self,
        referrer: Self::Class,
        idx: u32,
        kind: InvokeKind,
    ) -> Result<Self::Method, ResolveError>;

    /// Resolve an interface method reference; `None` rather than an error
    /// when the interface method genuinely cannot be bound statically.
    fn resolve_interface_method(&self, referrer: Self::Class, idx: u32) -> Option<Self::Method>;

    /// Find the nearest common superclass of `a` and `b`, used for
    /// reference-type merges at control-flow joins.
    fn find_common_superclass(&self, a: Self::Class, b: Self::Class) -> Self::Class;

    /// Look up a class by its descriptor (`Lcom/example/Foo;`), without
    /// going through a constant-pool index.
    fn class_of(&self, descriptor: &str) -> Option<Self::Class>;

    /// The raw type descriptor string referenced by a `TypeRef`-kind index
    /// (e.g. `new-instance`, `new-array`, `check-cast`). This is a purely
    /// syntactic lookup into the read-only class/type pool image consumed
    /// from the DEX parser (out of scope here) — it does not trigger class
    /// loading the way [`Self::resolve_class`] does.
    fn type_descriptor(&self, referrer: Self::Class, idx: u32) -> Option<String>;

    /// The resolved field's byte offset within its declaring object's
    /// layout, used to rewrite `iget*`/`iput*` into their `*-quick` forms.
    fn field_offset(&self, field: Self::Field) -> u16;

    /// The resolved method's vtable slot, used to rewrite `invoke-virtual`/
    /// `invoke-super` into their `*-quick` forms.
    fn vtable_index(&self, method: Self::Method) -> u16;

    /// `Some(index)` if `method` matches an entry in the inline-method
    /// table, used to rewrite matching invokes into `execute-inline`.
    fn inline_method_index(&self, method: Self::Method) -> Option<u16>;

    /// `true` if `method` is exactly `java.lang.Object.<init>()V`, the only
    /// target `invoke-direct` may rewrite to `invoke-direct-empty`.
    fn is_object_init(&self, method: Self::Method) -> bool;

    /// `true` if `method` is a `<init>` constructor (of any class), used by
    /// data-flow to recognize the `invoke-direct <init>` alias rewrite
    /// — every alias of the receiver register becomes an
    /// initialized reference, not just `Object.<init>` calls.
    fn is_instance_init(&self, method: Self::Method) -> bool;
}
