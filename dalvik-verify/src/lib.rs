//! Static bytecode verifier, quickening optimizer, and register-map
//! generator for a Dalvik-style register machine.
//!
//! Three phases over one method: [`static_check`] walks the instruction
//! stream once to compute widths and validate branch/switch/try structure,
//! [`dataflow`] runs a work-list fixed point over the abstract register-type
//! lattice ([`reg_type`]), and — once that succeeds — [`quicken`] rewrites
//! resolved field/invoke instructions in place and [`regmap`] distills the
//! final per-instruction types into a GC root map. None of this crate
//! resolves classes itself; it only calls out through [`resolver::Resolver`].

#![warn(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

pub extern crate alloc;

pub mod dataflow;
pub mod error;
pub mod insn_flags;
pub mod method;
pub mod quicken;
pub mod reg_type;
pub mod regmap;
pub mod resolver;
pub mod static_check;
pub mod uninit;

use insn_flags::InsnFlagArray;
use method::MethodContract;
use resolver::Resolver;

pub use dataflow::VerifierData;
pub use error::VerifyError;
pub use quicken::QuickenOutcome;
pub use regmap::RegisterMap;

/// Whether a resolution failure that survives an otherwise-valid method is
/// fatal or recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyMode {
    /// Any resolution failure is a [`VerifyError::Resolution`] reject.
    #[default]
    Hard,
    /// Resolution failures are tolerated during data-flow (the register
    /// holding the failed reference degrades to `Conflict`) and later
    /// rewritten to `throw-verification-error` by [`quicken::quicken_method`].
    Soft,
}

/// Options threaded through [`verify_method`]; everything here is an
/// explicit per-call parameter, not global state.
#[derive(Debug, Clone, Copy)]
pub struct VerifyOptions {
    pub mode: VerifyMode,
    /// Accept bytecode that already contains optimized/quickened opcodes.
    pub allow_optimized: bool,
    /// Track every instruction's register line, not just branch targets and
    /// GC points — used by debugging/introspection callers.
    pub track_all: bool,
    /// Whether the caller intends to request a register map afterward; this
    /// widens which addresses keep a persisted register line.
    pub want_register_map: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            mode: VerifyMode::Hard,
            allow_optimized: false,
            track_all: false,
            want_register_map: true,
        }
    }
}

/// Run phases 1-3 over `method`: width computation, structural
/// static checks, then the data-flow fixed point. On success, the returned
/// [`VerifierData`] carries the flag array and per-instruction register
/// lines needed by [`optimize_method`] and [`generate_register_map`].
pub fn verify_method<R: Resolver>(
    method: &MethodContract<R::Class>,
    resolver: &R,
    options: VerifyOptions,
) -> Result<VerifierData<R::Class>, VerifyError> {
    let span = tracing::info_span!("verify_method", insns_size = method.insns_size());
    let _enter = span.enter();

    let static_result = static_check::run(
        method,
        resolver,
        options.want_register_map,
        options.track_all,
        options.allow_optimized,
    )?;

    let data = dataflow::run(
        method,
        resolver,
        static_result.flags,
        &static_result.new_instance_sites,
        options.mode,
    )?;

    tracing::debug!("method verified");
    Ok(data)
}

/// Run the quickening pass over a method that has already
/// verified successfully. Rewrites `method.insns` in place; never changes
/// instruction widths.
pub fn optimize_method<R: Resolver>(
    method: &mut MethodContract<R::Class>,
    data: &VerifierData<R::Class>,
    resolver: &R,
    mode: VerifyMode,
) -> Result<QuickenOutcome, VerifyError> {
    let span = tracing::info_span!("optimize_method");
    let _enter = span.enter();
    let outcome = quicken::quicken_method(method, data, resolver, mode)?;
    tracing::debug!(
        quickened = outcome.quickened,
        soft_rewrites = outcome.soft_rewrites,
        "method optimized"
    );
    Ok(outcome)
}

/// Emit the on-disk register map for a verified method,
/// re-decoding the result to confirm the round trip before returning it.
pub fn generate_register_map<R: Resolver>(
    method: &MethodContract<R::Class>,
    data: &VerifierData<R::Class>,
) -> Result<RegisterMap, VerifyError> {
    let span = tracing::info_span!("generate_register_map");
    let _enter = span.enter();
    let map = regmap::generate(method, data)?;
    regmap::self_check(&map)?;
    tracing::debug!(entries = map.entries.len(), "register map generated");
    Ok(map)
}

/// Re-export of the flag array type used in [`static_check::StaticCheckResult`],
/// kept visible at the crate root for callers that only need phase 1 output.
pub type Flags = InsnFlagArray;
