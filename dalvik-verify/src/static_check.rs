//! Static checker, Passes A/B/C.
//!
//! Runs before data-flow. Purely structural: no class resolution beyond the
//! syntactic type-descriptor lookup needed for `new-instance`/`new-array`.

use alloc::vec::Vec;

use dalvik_asm::decode::{classify_nop, decode, DataTable};
use itertools::Itertools;
use dalvik_asm::opcode::Opcode;

use crate::error::{StructuralReject, VerifyError};
use crate::insn_flags::InsnFlagArray;
use crate::method::MethodContract;
use crate::resolver::Resolver;

/// Result of the static checker: the filled flag array, plus the address of
/// every `new-instance` site in program order (handed to the uninitialized
/// map before data-flow starts).
pub struct StaticCheckResult {
    pub flags: InsnFlagArray,
    pub new_instance_sites: Vec<u32>,
}

/// Run Pass A (widths), Pass B (try/handler), Pass C (operand sanity).
pub fn run<R: Resolver>(
    method: &MethodContract<R::Class>,
    resolver: &R,
    want_register_map: bool,
    track_all: bool,
    allow_optimized: bool,
) -> Result<StaticCheckResult, VerifyError> {
    let insns = &method.insns;
    let insns_size = insns.len();
    if insns_size == 0 {
        if !method.access_flags.is_native && !method.access_flags.is_abstract {
            return Err(StructuralReject::EmptyConcreteMethod.into());
        }
        return Ok(StaticCheckResult {
            flags: InsnFlagArray::new(0, want_register_map, track_all),
            new_instance_sites: Vec::new(),
        });
    }

    let mut flags = InsnFlagArray::new(insns_size, want_register_map, track_all);
    let mut new_instance_sites = Vec::new();

    // Pass A: widths.
    let mut addr = 0usize;
    while addr < insns_size {
        let op = Opcode::from_u8((insns[addr] & 0xff) as u8);
        let width = if op == Opcode::Nop {
            match classify_nop(insns, addr).map_err(|_| StructuralReject::UndefinedOpcode {
                addr: addr as u32,
            })? {
                Some(table) => table.width(),
                None => 1,
            }
        } else {
            op.width()
        };

        if width == 0 {
            return Err(StructuralReject::UndefinedOpcode { addr: addr as u32 }.into());
        }
        if width > 5 {
            return Err(StructuralReject::WidthTooLarge {
                addr: addr as u32,
                width,
            }
            .into());
        }
        if addr + usize::from(width) > insns_size {
            return Err(StructuralReject::StreamLengthMismatch {
                actual: insns_size as u32,
                expected: (addr + usize::from(width)) as u32,
            }
            .into());
        }

        if let Some(f) = flags.get_mut(addr) {
            f.set_width(width);
            if op.flags().is_gc_point() {
                f.set_gc_point();
            }
        }
        if op == Opcode::NewInstance {
            new_instance_sites.push(addr as u32);
        }

        addr += usize::from(width);
    }
    if addr != insns_size {
        return Err(StructuralReject::StreamLengthMismatch {
            actual: addr as u32,
            expected: insns_size as u32,
        }
        .into());
    }

    // Pass B: try regions and handler targets.
    for t in &method.tries {
        if t.start >= t.end || u64::from(t.end) > insns_size as u64 {
            return Err(StructuralReject::BadTrySpan {
                start: t.start,
                end: t.end,
                insns_size: insns_size as u32,
            }
            .into());
        }
        if !is_opcode_start(&flags, t.start) {
            return Err(StructuralReject::TryEndpointMidInstruction { addr: t.start }.into());
        }
        if t.end as usize != insns_size && !is_opcode_start(&flags, t.end) {
            return Err(StructuralReject::TryEndpointMidInstruction { addr: t.end }.into());
        }
        if !is_opcode_start(&flags, t.handler) {
            return Err(StructuralReject::HandlerMidInstruction { addr: t.handler }.into());
        }
        let mut a = t.start as usize;
        while a < t.end as usize {
            let w = flags.get(a).map(|f| f.width()).unwrap_or(0);
            if w == 0 {
                break;
            }
            if let Some(f) = flags.get_mut(a) {
                f.set_in_try();
            }
            a += usize::from(w);
        }
        if let Some(f) = flags.get_mut(t.handler as usize) {
            f.set_branch_target();
        }
    }

    // Pass C: operand sanity.
    let mut addr = 0usize;
    while addr < insns_size {
        let width = flags
            .get(addr)
            .map(|f| f.width())
            .filter(|w| *w != 0);
        let Some(width) = width else {
            addr += 1;
            continue;
        };
        check_instruction(method, resolver, &mut flags, addr, allow_optimized)?;
        addr += usize::from(width);
    }

    Ok(StaticCheckResult {
        flags,
        new_instance_sites,
    })
}

fn is_opcode_start(flags: &InsnFlagArray, addr: u32) -> bool {
    flags
        .get(addr as usize)
        .map(|f| f.is_opcode_start())
        .unwrap_or(false)
}

fn check_instruction<R: Resolver>(
    method: &MethodContract<R::Class>,
    resolver: &R,
    flags: &mut InsnFlagArray,
    addr: usize,
    allow_optimized: bool,
) -> Result<(), VerifyError> {
    use dalvik_asm::format::Format;

    let insns = &method.insns;
    let op = Opcode::from_u8((insns[addr] & 0xff) as u8);

    if op.is_optimized() && !allow_optimized {
        return Err(StructuralReject::OptimizedOpcodeRejected { addr: addr as u32 }.into());
    }

    let decoded = decode(insns, addr).map_err(|_| StructuralReject::UndefinedOpcode {
        addr: addr as u32,
    })?;

    let fmt = op.format();
    let insns_size = insns.len() as i64;

    // Branch-shaped instructions: vB (or `wide`) is a signed offset.
    if op.flags().contains(dalvik_asm::flags::OpFlags::CAN_BRANCH) && !matches!(fmt, Format::_00x)
    {
        let offset = decoded.wide as i64;
        if offset == 0 && op == Opcode::Goto {
            return Err(StructuralReject::ZeroOffsetGoto { addr: addr as u32 }.into());
        }
        let target = addr as i64 + offset;
        if target < 0 || target > i64::from(i32::MAX) || target > insns_size {
            return Err(StructuralReject::BranchOffsetOverflow { addr: addr as u32 }.into());
        }
        if !is_opcode_start(flags, target as u32) {
            return Err(StructuralReject::BadBranchTarget {
                from: addr as u32,
                to: target as u32,
            }
            .into());
        }
        if let Some(f) = flags.get_mut(target as usize) {
            f.set_branch_target();
        }
    }

    // Switch instructions: vB is the offset to the payload table.
    if op.flags().contains(dalvik_asm::flags::OpFlags::CAN_SWITCH) {
        let payload_addr = addr as i64 + decoded.wide as i64;
        if payload_addr < 0 || payload_addr >= insns_size {
            return Err(StructuralReject::BadSwitchTable { addr: addr as u32 }.into());
        }
        let table = classify_nop(insns, payload_addr as usize)
            .ok()
            .flatten()
            .ok_or(StructuralReject::BadSwitchTable { addr: addr as u32 })?;
        match table {
            DataTable::PackedSwitch { size } => {
                check_packed_switch(insns, addr, payload_addr as usize, size, flags)?;
            }
            DataTable::SparseSwitch { size } => {
                check_sparse_switch(insns, addr, payload_addr as usize, size, flags)?;
            }
            DataTable::ArrayData { .. } => {
                return Err(StructuralReject::BadSwitchTable { addr: addr as u32 }.into())
            }
        }
    }

    // fill-array-data: vB is the offset to an array-data payload.
    if op == Opcode::FillArrayData {
        let payload_addr = addr as i64 + decoded.wide as i64;
        if payload_addr < 0 || payload_addr >= insns_size {
            return Err(StructuralReject::BadArrayData { addr: addr as u32 }.into());
        }
        match classify_nop(insns, payload_addr as usize).ok().flatten() {
            Some(DataTable::ArrayData { .. }) => {}
            _ => return Err(StructuralReject::BadArrayData { addr: addr as u32 }.into()),
        }
    }

    if op == Opcode::NewInstance {
        let descriptor = resolver
            .type_descriptor(method.declaring_class, decoded.v_b)
            .unwrap_or_default();
        if !descriptor.starts_with('L') {
            return Err(StructuralReject::NewInstanceNotClassType { addr: addr as u32 }.into());
        }
    }

    if op == Opcode::NewArray {
        let descriptor = resolver
            .type_descriptor(method.declaring_class, decoded.v_c)
            .unwrap_or_default();
        let dims = descriptor.chars().take_while(|c| *c == '[').count();
        if dims == 0 || dims > 255 {
            return Err(StructuralReject::BadArrayDimensions {
                addr: addr as u32,
                dims: dims as u8,
            }
            .into());
        }
    }

    Ok(())
}

fn check_packed_switch(
    insns: &[u16],
    from: usize,
    payload_addr: usize,
    size: u16,
    flags: &mut InsnFlagArray,
) -> Result<(), VerifyError> {
    let first_key = i32::from(insns[payload_addr + 2]) | (i32::from(insns[payload_addr + 3]) << 16);
    let targets_start = payload_addr + 4;
    let targets = &insns[targets_start..targets_start + 2 * size as usize];
    for (lo, hi) in targets.iter().copied().tuples() {
        let rel = (u32::from(lo) | (u32::from(hi) << 16)) as i32;
        let target = from as i64 + rel as i64;
        if target < 0 || target as usize >= insns.len() || !is_opcode_start(flags, target as u32) {
            return Err(StructuralReject::BadBranchTarget {
                from: from as u32,
                to: target.max(0) as u32,
            }
            .into());
        }
        if let Some(f) = flags.get_mut(target as usize) {
            f.set_branch_target();
        }
    }
    let _ = first_key;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::{AccessFlags, Prototype, TryItem};
    use crate::resolver::{InvokeKind, ResolveError, Resolver};
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;

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
            0
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

    fn method_with(insns: Vec<u16>) -> MethodContract<u32> {
        MethodContract {
            registers_size: 2,
            ins_size: 0,
            outs_size: 0,
            insns,
            tries: Vec::<TryItem<u32>>::new(),
            prototype: Prototype {
                params_shorty: vec![],
                return_shorty: 'V',
            },
            access_flags: AccessFlags::default(),
            declaring_class: 1,
        }
    }

    #[test]
    fn empty_concrete_method_is_rejected() {
        let method = method_with(Vec::new());
        let err = run(&method, &StubResolver, false, false, false).unwrap_err();
        assert!(matches!(err, VerifyError::Structural(StructuralReject::EmptyConcreteMethod)));
    }

    #[test]
    fn empty_abstract_method_is_accepted() {
        let mut method = method_with(Vec::new());
        method.access_flags.is_abstract = true;
        let result = run(&method, &StubResolver, false, false, false).unwrap();
        assert_eq!(result.flags.len(), 0);
    }

    #[test]
    fn undefined_opcode_is_rejected() {
        // 0x73 is one of the reserved/unassigned byte values.
        let method = method_with(vec![0x0073]);
        let err = run(&method, &StubResolver, false, false, false).unwrap_err();
        assert!(matches!(err, VerifyError::Structural(StructuralReject::UndefinedOpcode { .. })));
    }

    #[test]
    fn goto_with_zero_offset_is_rejected() {
        // goto +0: opcode 0x28 in the low byte, offset 0 in the high byte.
        let method = method_with(vec![0x0028]);
        let err = run(&method, &StubResolver, false, false, false).unwrap_err();
        assert!(matches!(err, VerifyError::Structural(StructuralReject::ZeroOffsetGoto { .. })));
    }

    #[test]
    fn branch_target_mid_instruction_is_rejected() {
        // goto +2 lands on the second code unit of the following two-unit
        // move/from16, not on an instruction boundary.
        let method = method_with(vec![0x0228, 0x0002, 0x0000]);
        let err = run(&method, &StubResolver, false, false, false).unwrap_err();
        assert!(matches!(err, VerifyError::Structural(StructuralReject::BadBranchTarget { .. })));
    }

    #[test]
    fn well_formed_return_void_verifies_structurally() {
        let method = method_with(vec![0x000e]);
        let result = run(&method, &StubResolver, false, false, false).unwrap();
        assert_eq!(result.flags.len(), 1);
        assert!(result.new_instance_sites.is_empty());
    }

    #[test]
    fn new_instance_site_is_recorded() {
        let method = method_with(vec![0x0022, 1, 0x000e]);
        let result = run(&method, &StubResolver, false, false, false).unwrap();
        assert_eq!(result.new_instance_sites, vec![0]);
    }

    #[test]
    fn optimized_opcode_rejected_unless_allowed() {
        // +iget-volatile (0xe3) is the first quickened opcode byte; format
        // _22c is two code units wide.
        let method = method_with(vec![0x00e3, 0x0000]);
        let err = run(&method, &StubResolver, false, false, false).unwrap_err();
        assert!(matches!(err, VerifyError::Structural(StructuralReject::OptimizedOpcodeRejected { .. })));
    }
}

fn check_sparse_switch(
    insns: &[u16],
    from: usize,
    payload_addr: usize,
    size: u16,
    flags: &mut InsnFlagArray,
) -> Result<(), VerifyError> {
    let keys_start = payload_addr + 2;
    let targets_start = keys_start + 2 * size as usize;
    let keys = insns[keys_start..keys_start + 2 * size as usize]
        .iter()
        .copied()
        .tuples()
        .map(|(lo, hi)| (u32::from(lo) | (u32::from(hi) << 16)) as i32);
    let targets = insns[targets_start..targets_start + 2 * size as usize]
        .iter()
        .copied()
        .tuples()
        .map(|(lo, hi)| (u32::from(lo) | (u32::from(hi) << 16)) as i32);

    let mut prev_key: Option<i32> = None;
    for (key, rel) in keys.zip(targets) {
        if let Some(p) = prev_key {
            if key <= p {
                return Err(StructuralReject::SparseSwitchKeysUnordered { addr: from as u32 }.into());
            }
        }
        prev_key = Some(key);

        let target = from as i64 + rel as i64;
        if target < 0 || target as usize >= insns.len() || !is_opcode_start(flags, target as u32) {
            return Err(StructuralReject::BadBranchTarget {
                from: from as u32,
                to: target.max(0) as u32,
            }
            .into());
        }
        if let Some(f) = flags.get_mut(target as usize) {
            f.set_branch_target();
        }
    }
    Ok(())
}
