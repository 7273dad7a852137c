//! The quickening optimizer. Runs after a method has
//! verified successfully; rewrites field/invoke instructions in place to
//! resolved-offset/vtable-index/inline forms, or to `throw-verification-error`
//! when a soft-mode resolution failure survived verification.

use dalvik_asm::opcode::Opcode;

use crate::dataflow::VerifierData;
use crate::error::{ResolutionKind, VerifyError};
use crate::method::MethodContract;
use crate::resolver::{InvokeKind, Resolver};
use crate::VerifyMode;

/// Tally of what the optimizer did to one method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuickenOutcome {
    pub quickened: u32,
    pub soft_rewrites: u32,
}

/// What kind of constant-pool reference a soft failure was resolving, used
/// to pick the `throw-verification-error` sub-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefKind {
    Class,
    Field,
    Method,
}

fn set_opcode(insns: &mut [u16], addr: usize, op: Opcode) {
    insns[addr] = (insns[addr] & 0xff00) | u16::from(u8::from(op));
}

fn set_index_unit(insns: &mut [u16], addr: usize, value: u16) {
    insns[addr + 1] = value;
}

/// Rewrite the instruction at `addr` (of the given `width`) to
/// `throw-verification-error`, blanking any trailing code units with `nop`
/// so the overall width is unchanged.
fn rewrite_soft_failure(insns: &mut [u16], addr: usize, width: u16, ref_kind: RefKind, kind: ResolutionKind) {
    let ref_bits: u8 = match ref_kind {
        RefKind::Class => 0,
        RefKind::Field => 1,
        RefKind::Method => 2,
    };
    let kind_bits: u8 = match kind {
        ResolutionKind::NoClass => 0,
        ResolutionKind::ClassChange => 1,
        ResolutionKind::AccessClass => 2,
        ResolutionKind::NoField => 3,
        ResolutionKind::AccessField => 4,
        ResolutionKind::NoMethod => 5,
        ResolutionKind::AccessMethod => 6,
        ResolutionKind::InstantiationError => 7,
        ResolutionKind::Generic => 8,
    };
    let high_byte = (ref_bits << 5) | kind_bits;
    insns[addr] = (u16::from(high_byte) << 8) | u16::from(u8::from(Opcode::ThrowVerificationError));
    for i in 1..width as usize {
        insns[addr + i] = 0; // nop
    }
}

/// Run the quickening pass over one already-verified method.
pub fn quicken_method<R: Resolver>(
    method: &mut MethodContract<R::Class>,
    data: &VerifierData<R::Class>,
    resolver: &R,
    mode: VerifyMode,
) -> Result<QuickenOutcome, VerifyError> {
    let mut outcome = QuickenOutcome::default();
    let insns_size = method.insns.len();
    let mut addr = 0usize;

    while addr < insns_size {
        let Some(flags) = data.flags.get(addr) else {
            break;
        };
        let width = flags.width();
        if width == 0 {
            addr += 1;
            continue;
        }

        let op = Opcode::from_u8((method.insns[addr] & 0xff) as u8);
        let unit1 = method.insns.get(addr + 1).copied().unwrap_or(0);

        quicken_one(method, resolver, mode, addr, width, op, unit1, &mut outcome)?;
        addr += usize::from(width);
    }

    Ok(outcome)
}

fn quicken_one<R: Resolver>(
    method: &mut MethodContract<R::Class>,
    resolver: &R,
    mode: VerifyMode,
    addr: usize,
    width: u16,
    op: Opcode,
    index: u16,
    outcome: &mut QuickenOutcome,
) -> Result<(), VerifyError> {
    let declaring = method.declaring_class;
    let mnemonic = op.mnemonic();

    let is_iget = matches!(
        op,
        Opcode::Iget
            | Opcode::IgetWide
            | Opcode::IgetObject
            | Opcode::IgetBoolean
            | Opcode::IgetByte
            | Opcode::IgetChar
            | Opcode::IgetShort
    );
    let is_iput = matches!(
        op,
        Opcode::Iput
            | Opcode::IputWide
            | Opcode::IputObject
            | Opcode::IputBoolean
            | Opcode::IputByte
            | Opcode::IputChar
            | Opcode::IputShort
    );

    if is_iget || is_iput {
        match resolver.resolve_instance_field(declaring, u32::from(index)) {
            Ok(field) => {
                let offset = resolver.field_offset(field);
                let quick_op = iget_iput_quick_variant(op);
                set_opcode(&mut method.insns, addr, quick_op);
                set_index_unit(&mut method.insns, addr, offset);
                outcome.quickened += 1;
                return Ok(());
            }
            Err(e) if mode == VerifyMode::Soft => {
                rewrite_soft_failure(&mut method.insns, addr, width, RefKind::Field, e.0);
                outcome.soft_rewrites += 1;
                return Ok(());
            }
            Err(e) => {
                return Err(crate::error::ResolutionFailure {
                    addr: addr as u32,
                    kind: e.0,
                }
                .into())
            }
        }
    }

    if mnemonic.starts_with("invoke-virtual") || mnemonic.starts_with("invoke-super") {
        match resolver.resolve_method(declaring, u32::from(index), InvokeKind::Virtual) {
            Ok(resolved) => {
                if let Some(inline_idx) = resolver.inline_method_index(resolved) {
                    let quick_op = if mnemonic.ends_with("/range") {
                        Opcode::ExecuteInlineRange
                    } else {
                        Opcode::ExecuteInline
                    };
                    set_opcode(&mut method.insns, addr, quick_op);
                    set_index_unit(&mut method.insns, addr, inline_idx);
                } else {
                    let vtable_idx = resolver.vtable_index(resolved);
                    let quick_op = match op {
                        Opcode::InvokeVirtual => Opcode::InvokeVirtualQuick,
                        Opcode::InvokeVirtualRange => Opcode::InvokeVirtualQuickRange,
                        Opcode::InvokeSuper => Opcode::InvokeSuperQuick,
                        Opcode::InvokeSuperRange => Opcode::InvokeSuperQuickRange,
                        other => other,
                    };
                    set_opcode(&mut method.insns, addr, quick_op);
                    set_index_unit(&mut method.insns, addr, vtable_idx);
                }
                outcome.quickened += 1;
                return Ok(());
            }
            Err(e) if mode == VerifyMode::Soft => {
                rewrite_soft_failure(&mut method.insns, addr, width, RefKind::Method, e.0);
                outcome.soft_rewrites += 1;
                return Ok(());
            }
            Err(e) => {
                return Err(crate::error::ResolutionFailure {
                    addr: addr as u32,
                    kind: e.0,
                }
                .into())
            }
        }
    }

    if mnemonic.starts_with("invoke-direct") || mnemonic.starts_with("invoke-static") {
        let kind = if mnemonic.starts_with("invoke-static") {
            InvokeKind::Static
        } else {
            InvokeKind::Direct
        };
        match resolver.resolve_method(declaring, u32::from(index), kind) {
            Ok(resolved) => {
                if let Some(inline_idx) = resolver.inline_method_index(resolved) {
                    let quick_op = if mnemonic.ends_with("/range") {
                        Opcode::ExecuteInlineRange
                    } else {
                        Opcode::ExecuteInline
                    };
                    set_opcode(&mut method.insns, addr, quick_op);
                    set_index_unit(&mut method.insns, addr, inline_idx);
                    outcome.quickened += 1;
                } else if kind == InvokeKind::Direct && resolver.is_object_init(resolved) {
                    set_opcode(&mut method.insns, addr, Opcode::InvokeDirectEmpty);
                    outcome.quickened += 1;
                }
                return Ok(());
            }
            Err(e) if mode == VerifyMode::Soft => {
                rewrite_soft_failure(&mut method.insns, addr, width, RefKind::Method, e.0);
                outcome.soft_rewrites += 1;
                return Ok(());
            }
            Err(e) => {
                return Err(crate::error::ResolutionFailure {
                    addr: addr as u32,
                    kind: e.0,
                }
                .into())
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::{AccessFlags, Prototype, TryItem};
    use crate::resolver::ResolveError;
    use crate::{verify_method, VerifyOptions};
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    struct StubResolver;

    impl Resolver for StubResolver {
        type Class = u32;
        type Field = u32;
        type Method = u32;

        fn resolve_class(&self, _referrer: u32, _idx: u32) -> Result<u32, ResolveError> {
            Ok(1)
        }
        fn resolve_instance_field(&self, _referrer: u32, idx: u32) -> Result<u32, ResolveError> {
            Ok(idx)
        }
        fn resolve_static_field(&self, _referrer: u32, idx: u32) -> Result<u32, ResolveError> {
            Ok(idx)
        }
        fn resolve_method(&self, _referrer: u32, idx: u32, _kind: InvokeKind) -> Result<u32, ResolveError> {
            Ok(idx)
        }
        fn resolve_interface_method(&self, _referrer: u32, _idx: u32) -> Option<u32> {
            None
        }
        fn find_common_superclass(&self, _a: u32, _b: u32) -> u32 {
            1
        }
        fn class_of(&self, _descriptor: &str) -> Option<u32> {
            Some(1)
        }
        fn type_descriptor(&self, _referrer: u32, _idx: u32) -> Option<String> {
            Some("Lcom/example/Foo;".to_string())
        }
        fn field_offset(&self, _field: u32) -> u16 {
            7
        }
        fn vtable_index(&self, _method: u32) -> u16 {
            0
        }
        fn inline_method_index(&self, _method: u32) -> Option<u16> {
            None
        }
        fn is_object_init(&self, _method: u32) -> bool {
            false
        }
        fn is_instance_init(&self, _method: u32) -> bool {
            false
        }
    }

    #[test]
    fn iget_on_a_resolvable_field_is_quickened_to_a_fixed_offset() {
        // static fn(L) { v0 = v1.field@0 /* iget */; return-void }
        let mut method = MethodContract {
            registers_size: 2,
            ins_size: 1,
            outs_size: 0,
            insns: vec![0x1052, 0x0000, 0x000e],
            tries: Vec::<TryItem<u32>>::new(),
            prototype: Prototype {
                params_shorty: vec!['L'],
                return_shorty: 'V',
            },
            access_flags: AccessFlags {
                is_static: true,
                ..Default::default()
            },
            declaring_class: 1,
        };
        let data = verify_method(&method, &StubResolver, VerifyOptions::default()).unwrap();
        let outcome = quicken_method(&mut method, &data, &StubResolver, VerifyMode::Hard).unwrap();
        assert_eq!(outcome.quickened, 1);
        assert_eq!(outcome.soft_rewrites, 0);
        assert_eq!(Opcode::from_u8((method.insns[0] & 0xff) as u8), Opcode::IgetQuick);
        assert_eq!(method.insns[1], 7);
        // Width is preserved: the return-void at addr 2 is untouched.
        assert_eq!(method.insns[2], 0x000e);
    }

    #[test]
    fn unrecognized_field_in_soft_mode_becomes_throw_verification_error() {
        struct FailingResolver;
        impl Resolver for FailingResolver {
            type Class = u32;
            type Field = u32;
            type Method = u32;
            fn resolve_class(&self, _r: u32, _i: u32) -> Result<u32, ResolveError> {
                Ok(1)
            }
            fn resolve_instance_field(&self, _r: u32, _i: u32) -> Result<u32, ResolveError> {
                Err(ResolveError(ResolutionKind::NoField))
            }
            fn resolve_static_field(&self, _r: u32, i: u32) -> Result<u32, ResolveError> {
                Ok(i)
            }
            fn resolve_method(&self, _r: u32, i: u32, _k: InvokeKind) -> Result<u32, ResolveError> {
                Ok(i)
            }
            fn resolve_interface_method(&self, _r: u32, _i: u32) -> Option<u32> {
                None
            }
            fn find_common_superclass(&self, _a: u32, _b: u32) -> u32 {
                1
            }
            fn class_of(&self, _d: &str) -> Option<u32> {
                Some(1)
            }
            fn type_descriptor(&self, _r: u32, _i: u32) -> Option<String> {
                Some("Lcom/example/Foo;".to_string())
            }
            fn field_offset(&self, _f: u32) -> u16 {
                0
            }
            fn vtable_index(&self, _m: u32) -> u16 {
                0
            }
            fn inline_method_index(&self, _m: u32) -> Option<u16> {
                None
            }
            fn is_object_init(&self, _m: u32) -> bool {
                false
            }
            fn is_instance_init(&self, _m: u32) -> bool {
                false
            }
        }

        let mut method = MethodContract {
            registers_size: 2,
            ins_size: 1,
            outs_size: 0,
            insns: vec![0x1052, 0x0000, 0x000e],
            tries: Vec::<TryItem<u32>>::new(),
            prototype: Prototype {
                params_shorty: vec!['L'],
                return_shorty: 'V',
            },
            access_flags: AccessFlags {
                is_static: true,
                ..Default::default()
            },
            declaring_class: 1,
        };
        let data = verify_method(
            &method,
            &FailingResolver,
            VerifyOptions {
                mode: VerifyMode::Soft,
                ..Default::default()
            },
        )
        .unwrap();
        let outcome = quicken_method(&mut method, &data, &FailingResolver, VerifyMode::Soft).unwrap();
        assert_eq!(outcome.soft_rewrites, 1);
        assert_eq!(
            Opcode::from_u8((method.insns[0] & 0xff) as u8),
            Opcode::ThrowVerificationError
        );
        assert_eq!(method.insns[1], 0, "trailing code unit is blanked to nop");
    }
}

fn iget_iput_quick_variant(op: Opcode) -> Opcode {
    match op {
        Opcode::Iget => Opcode::IgetQuick,
        Opcode::IgetWide => Opcode::IgetWideQuick,
        Opcode::IgetObject => Opcode::IgetObjectQuick,
        Opcode::Iput => Opcode::IputQuick,
        Opcode::IputWide => Opcode::IputWideQuick,
        Opcode::IputObject => Opcode::IputObjectQuick,
        // boolean/byte/char/short iget/iput share the plain iget/iput-quick
        // encodings at runtime (the quickened form no longer needs the
        // type-width distinction once the byte offset is resolved).
        Opcode::IgetBoolean | Opcode::IgetByte | Opcode::IgetChar | Opcode::IgetShort => {
            Opcode::IgetQuick
        }
        Opcode::IputBoolean | Opcode::IputByte | Opcode::IputChar | Opcode::IputShort => {
            Opcode::IputQuick
        }
        other => other,
    }
}
