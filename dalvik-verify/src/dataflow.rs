//! The data-flow verifier: the abstract interpreter proper.
//!
//! A work-list fixed point over a per-instruction register line, merging at
//! control-flow joins. This is the largest single component; the transfer function dispatches on opcode mnemonic rather than
//! an exhaustive per-variant match, mirroring the table-driven dispatch the
//! original verifier itself uses for its ~230-opcode instruction set.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use dalvik_asm::decode::decode;
use dalvik_asm::flags::OpFlags;
use dalvik_asm::opcode::Opcode;

use crate::error::{StructuralReject, TypeReject, VerifyError};
use crate::insn_flags::InsnFlagArray;
use crate::method::MethodContract;
use crate::reg_type::{PrimKind, RegType, SiteIdx};
use crate::resolver::{InvokeKind, Resolver};
use crate::uninit::UninitMap;
use crate::VerifyMode;

/// A single instruction address's abstract register state: `registers_size
/// + 2` slots, the last two holding the method-result pseudo-register and
/// a monitor-depth counter.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterLine<C> {
    regs: Vec<RegType<C>>,
}

impl<C: Copy + Eq> RegisterLine<C> {
    fn new(total_regs: usize) -> Self {
        Self {
            regs: vec![RegType::unknown(); total_regs],
        }
    }

    #[must_use]
    pub fn get(&self, reg: u16) -> RegType<C> {
        self.regs[reg as usize]
    }

    pub fn set(&mut self, reg: u16, ty: RegType<C>) {
        self.regs[reg as usize] = ty;
    }

    fn result_index(registers_size: u16) -> u16 {
        registers_size
    }

    fn set_result(&mut self, registers_size: u16, ty: RegType<C>) {
        self.set(Self::result_index(registers_size), ty);
    }

    fn take_result(&mut self, registers_size: u16) -> RegType<C> {
        let idx = Self::result_index(registers_size);
        let v = self.get(idx);
        self.set(idx, RegType::unknown());
        v
    }

    /// `true` if any register still holds an uninitialized reference at
    /// `site`.
    fn replace_site(&mut self, site: SiteIdx, with: RegType<C>) {
        for r in &mut self.regs {
            if *r == RegType::UninitRef(site) {
                *r = with;
            }
        }
    }

    fn has_any_uninit_ref(&self) -> bool {
        self.regs.iter().any(RegType::is_uninit_ref)
    }

    /// Element-wise merge against `other`, returning whether anything
    /// changed.
    fn merge_from(
        &mut self,
        other: &Self,
        mut find_common_superclass: impl FnMut(C, C) -> C,
    ) -> bool {
        let mut changed = false;
        for (slot, incoming) in self.regs.iter_mut().zip(other.regs.iter()) {
            let merged = slot.merge(*incoming, &mut find_common_superclass);
            if merged != *slot {
                changed = true;
            }
            *slot = merged;
        }
        changed
    }
}

/// Everything the data-flow pass carries for one method under verification.
pub struct VerifierData<C> {
    pub flags: InsnFlagArray,
    pub uninit: UninitMap<C>,
    lines: Vec<Option<RegisterLine<C>>>,
    registers_size: u16,
}

impl<C: Copy + Eq> VerifierData<C> {
    /// The final register line at `addr`, if one was ever stored there.
    #[must_use]
    pub fn line_at(&self, addr: usize) -> Option<&RegisterLine<C>> {
        self.lines.get(addr).and_then(|l| l.as_ref())
    }

    /// `registers_size` (`v0`..`v(registers_size-1)`), excluding the two
    /// synthetic slots (`result`, `monitor-depth`) appended internally.
    #[must_use]
    pub fn registers_size(&self) -> u16 {
        self.registers_size
    }
}

fn initial_register_count(method_registers_size: u16) -> usize {
    method_registers_size as usize + 2
}

/// Phase 4.3.1: build the entry register line from the method's prototype.
fn build_entry_line<R: Resolver>(
    method: &MethodContract<R::Class>,
    resolver: &R,
) -> Result<RegisterLine<R::Class>, VerifyError> {
    let total = initial_register_count(method.registers_size);
    let mut line = RegisterLine::new(total);
    let mut reg = method.first_local_register();

    if !method.access_flags.is_static {
        let this_ty = if method.access_flags.is_constructor {
            let is_object_init = resolver
                .class_of("Ljava/lang/Object;")
                .map(|obj| obj == method.declaring_class)
                .unwrap_or(false);
            if is_object_init {
                RegType::InitRef(method.declaring_class)
            } else {
                RegType::UninitRef(UninitMap::<R::Class>::this_site())
            }
        } else {
            RegType::InitRef(method.declaring_class)
        };
        line.set(reg, this_ty);
        reg += 1;
    }

    for shorty in &method.prototype.params_shorty {
        let ty = match shorty {
            'Z' => RegType::Primitive(PrimKind::Boolean),
            'B' => RegType::Primitive(PrimKind::Byte),
            'S' => RegType::Primitive(PrimKind::Short),
            'C' => RegType::Primitive(PrimKind::Char),
            'I' => RegType::Primitive(PrimKind::Integer),
            'F' => RegType::Primitive(PrimKind::Float),
            'J' => {
                line.set(reg, RegType::Primitive(PrimKind::LongLo));
                reg += 1;
                line.set(reg, RegType::Primitive(PrimKind::LongHi));
                reg += 1;
                continue;
            }
            'D' => {
                line.set(reg, RegType::Primitive(PrimKind::DoubleLo));
                reg += 1;
                line.set(reg, RegType::Primitive(PrimKind::DoubleHi));
                reg += 1;
                continue;
            }
            'L' | '[' => RegType::zero(), // resolved lazily; Zero is a safe reference bottom
            other => {
                return Err(TypeReject::Other {
                    addr: 0,
                    reason: format!("unrecognized shorty char '{other}'"),
                }
                .into())
            }
        };
        line.set(reg, ty);
        reg += 1;
    }

    Ok(line)
}

/// Run the data-flow fixed point. Consumes the static-checker output and
/// the `new-instance` site addresses it discovered.
pub fn run<R: Resolver>(
    method: &MethodContract<R::Class>,
    resolver: &R,
    mut flags: InsnFlagArray,
    new_instance_sites: &[u32],
    mode: VerifyMode,
) -> Result<VerifierData<R::Class>, VerifyError> {
    let mut uninit = UninitMap::new();
    for &addr in new_instance_sites {
        uninit.site_for_addr(addr as i32);
    }

    let total = initial_register_count(method.registers_size);
    let mut lines: Vec<Option<RegisterLine<R::Class>>> = vec![None; method.insns_size()];
    lines[0] = Some(build_entry_line(method, resolver)?);
    if let Some(f) = flags.get_mut(0) {
        f.set_changed();
    }

    loop {
        let Some(addr) = next_changed(&flags) else {
            break;
        };
        flags.get_mut(addr).unwrap().clear_changed();

        let working = lines[addr]
            .clone()
            .ok_or_else(|| crate::error::InternalAssert::MissingRegisterLine { addr: addr as u32 })?;

        let outcome = step(method, resolver, &mut uninit, addr, working, mode)?;

        flags.get_mut(addr).unwrap().set_visited();

        for (target, line) in outcome.successors {
            let slot = &mut lines[target];
            match slot {
                None => {
                    *slot = Some(line);
                    if let Some(f) = flags.get_mut(target) {
                        f.set_changed();
                    }
                }
                Some(existing) => {
                    let changed = existing.merge_from(&line, |a, b| {
                        if a == b {
                            a
                        } else {
                            resolver.find_common_superclass(a, b)
                        }
                    });
                    if changed {
                        if let Some(f) = flags.get_mut(target) {
                            f.set_changed();
                        }
                    }
                }
            }
        }
    }

    dead_code_scan(&flags)?;

    let _ = total;
    Ok(VerifierData {
        flags,
        uninit,
        lines,
        registers_size: method.registers_size,
    })
}

fn next_changed(flags: &InsnFlagArray) -> Option<usize> {
    (0..flags.len()).find(|&a| flags.get(a).map(|f| f.changed()).unwrap_or(false))
}

fn dead_code_scan(flags: &InsnFlagArray) -> Result<(), VerifyError> {
    for (addr, f) in flags.instruction_starts() {
        if !f.visited() {
            return Err(StructuralReject::DeadCode { addr: addr as u32 }.into());
        }
    }
    Ok(())
}

struct StepOutcome<C> {
    successors: Vec<(usize, RegisterLine<C>)>,
}

/// Phase 4.3.3 + 4.3.4: verify one instruction against the working line, and
/// compute its successor register lines.
fn step<R: Resolver>(
    method: &MethodContract<R::Class>,
    resolver: &R,
    uninit: &mut UninitMap<R::Class>,
    addr: usize,
    mut w: RegisterLine<R::Class>,
    mode: VerifyMode,
) -> Result<StepOutcome<R::Class>, VerifyError> {
    let entry_snapshot = w.clone();
    let insns = &method.insns;
    let op = Opcode::from_u8((insns[addr] & 0xff) as u8);
    let decoded = decode(insns, addr).map_err(|_| StructuralReject::UndefinedOpcode {
        addr: addr as u32,
    })?;
    let width = op.width();
    let mnemonic = op.mnemonic();
    let registers_size = method.registers_size;

    let transfer_result = apply_transfer(
        method,
        resolver,
        uninit,
        addr,
        &mut w,
        op,
        mnemonic,
        &decoded,
        registers_size,
    );

    match transfer_result {
        Ok(()) => {}
        Err(VerifyError::Resolution(rf)) if mode == VerifyMode::Soft => {
            tracing::warn!(addr, ?rf, "soft resolution failure, continuing as throw-only");
        }
        Err(e) => return Err(e),
    }

    let mut successors = Vec::new();
    let op_flags = op.flags();

    if op_flags.contains(OpFlags::CAN_CONTINUE) {
        successors.push((addr + usize::from(width), w.clone()));
    }
    if op_flags.contains(OpFlags::CAN_BRANCH) {
        let target = (addr as i64 + decoded.wide as i64) as usize;
        successors.push((target, w.clone()));
    }
    if op_flags.contains(OpFlags::CAN_SWITCH) {
        // Switch targets were already validated and flagged by the static
        // checker; re-walk the payload here to propagate the register line.
        for target in switch_targets(insns, addr, &decoded) {
            successors.push((target, w.clone()));
        }
    }
    if op_flags.contains(OpFlags::CAN_THROW) {
        let in_try = method
            .tries
            .iter()
            .filter(|t| (t.start as usize..t.end as usize).contains(&addr))
            .map(|t| t.handler as usize);
        for handler in in_try {
            successors.push((handler, entry_snapshot.clone()));
        }
    }

    Ok(StepOutcome { successors })
}

fn switch_targets(insns: &[u16], from: usize, decoded: &dalvik_asm::decode::DecodedInstruction) -> Vec<usize> {
    use dalvik_asm::decode::{classify_nop, DataTable};
    let payload_addr = (from as i64 + decoded.wide as i64) as usize;
    let mut out = Vec::new();
    match classify_nop(insns, payload_addr) {
        Ok(Some(DataTable::PackedSwitch { size })) => {
            for i in 0..size as usize {
                let lo = insns[payload_addr + 4 + 2 * i];
                let hi = insns[payload_addr + 4 + 2 * i + 1];
                let rel = (u32::from(lo) | (u32::from(hi) << 16)) as i32;
                out.push((from as i64 + rel as i64) as usize);
            }
        }
        Ok(Some(DataTable::SparseSwitch { size })) => {
            let targets_start = payload_addr + 2 + 2 * size as usize;
            for i in 0..size as usize {
                let lo = insns[targets_start + 2 * i];
                let hi = insns[targets_start + 2 * i + 1];
                let rel = (u32::from(lo) | (u32::from(hi) << 16)) as i32;
                out.push((from as i64 + rel as i64) as usize);
            }
        }
        _ => {}
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn apply_transfer<R: Resolver>(
    method: &MethodContract<R::Class>,
    resolver: &R,
    uninit: &mut UninitMap<R::Class>,
    addr: usize,
    w: &mut RegisterLine<R::Class>,
    op: Opcode,
    mnemonic: &str,
    decoded: &dalvik_asm::decode::DecodedInstruction,
    registers_size: u16,
) -> Result<(), VerifyError> {
    let a = addr as u32;

    if mnemonic.starts_with("move-result") {
        let v = w.take_result(registers_size);
        w.set(decoded.v_a as u16, v);
        return Ok(());
    }
    if mnemonic.starts_with("move-wide") {
        let lo = w.get(decoded.v_b as u16);
        let hi = w.get(decoded.v_b as u16 + 1);
        w.set(decoded.v_a as u16, lo);
        w.set(decoded.v_a as u16 + 1, hi);
        return Ok(());
    }
    if mnemonic.starts_with("move") {
        let src = w.get(decoded.v_b as u16);
        if mnemonic.starts_with("move-object") && !src.is_reference_like() {
            return Err(TypeReject::BadArgumentKind { addr: a, index: 0 }.into());
        }
        w.set(decoded.v_a as u16, src);
        return Ok(());
    }
    if mnemonic.starts_with("return") {
        if w.has_any_uninit_ref() {
            return Err(TypeReject::UninitThisEscapesReturn.into());
        }
        return Ok(());
    }
    if op == Opcode::Const4 || op == Opcode::Const16 || op == Opcode::Const {
        let v = decoded.v_b as i32;
        w.set(decoded.v_a as u16, RegType::Primitive(classify_int_literal(v)));
        return Ok(());
    }
    if op == Opcode::ConstHigh16 {
        w.set(decoded.v_a as u16, RegType::Primitive(PrimKind::Integer));
        return Ok(());
    }
    if mnemonic.starts_with("const-wide") {
        w.set(decoded.v_a as u16, RegType::Primitive(PrimKind::LongLo));
        w.set(decoded.v_a as u16 + 1, RegType::Primitive(PrimKind::LongHi));
        return Ok(());
    }
    if op == Opcode::ConstString || op == Opcode::ConstStringJumbo {
        let class = resolver
            .class_of("Ljava/lang/String;")
            .unwrap_or(method.declaring_class);
        w.set(decoded.v_a as u16, RegType::InitRef(class));
        return Ok(());
    }
    if op == Opcode::ConstClass {
        let class = resolver
            .class_of("Ljava/lang/Class;")
            .unwrap_or(method.declaring_class);
        w.set(decoded.v_a as u16, RegType::InitRef(class));
        return Ok(());
    }
    if mnemonic.starts_with("monitor") {
        if !w.get(decoded.v_a as u16).is_reference_like() {
            return Err(TypeReject::BadArgumentKind { addr: a, index: 0 }.into());
        }
        return Ok(());
    }
    if op == Opcode::CheckCast {
        match resolver.resolve_class(method.declaring_class, decoded.v_b) {
            Ok(class) => w.set(decoded.v_a as u16, RegType::InitRef(class)),
            Err(e) => {
                return Err(crate::error::ResolutionFailure {
                    addr: a,
                    kind: e.0,
                }
                .into())
            }
        }
        return Ok(());
    }
    if op == Opcode::InstanceOf {
        w.set(decoded.v_a as u16, RegType::Primitive(PrimKind::Boolean));
        return Ok(());
    }
    if op == Opcode::NewInstance {
        let site = uninit.site_for_addr(addr as i32);
        match resolver.resolve_class(method.declaring_class, decoded.v_b) {
            Ok(class) => uninit.set_class(site, class),
            Err(e) => {
                return Err(crate::error::ResolutionFailure {
                    addr: a,
                    kind: e.0,
                }
                .into())
            }
        }
        // Loop aliasing rule: any register already holding this site's
        // uninitialized reference (from a previous loop iteration) becomes
        // Conflict, since it can no longer be the fresh value just produced.
        w.replace_site(site as SiteIdx, RegType::conflict());
        w.set(decoded.v_a as u16, RegType::UninitRef(site));
        return Ok(());
    }
    if op == Opcode::NewArray || mnemonic.starts_with("filled-new-array") {
        let class = resolver
            .resolve_class(method.declaring_class, decoded.v_c)
            .map_err(|e| crate::error::ResolutionFailure { addr: a, kind: e.0 })?;
        if mnemonic.starts_with("filled-new-array") {
            w.set_result(registers_size, RegType::InitRef(class));
        } else {
            w.set(decoded.v_a as u16, RegType::InitRef(class));
        }
        return Ok(());
    }
    if mnemonic.starts_with("aget") || mnemonic.starts_with("aput") {
        if !w.get(decoded.v_b as u16).is_reference_like() {
            return Err(TypeReject::BadArgumentKind { addr: a, index: 1 }.into());
        }
        if mnemonic.starts_with("aget") {
            let ty = if mnemonic.contains("object") {
                RegType::zero()
            } else if mnemonic.contains("wide") {
                w.set(decoded.v_a as u16 + 1, RegType::Primitive(PrimKind::LongHi));
                RegType::Primitive(PrimKind::LongLo)
            } else if mnemonic.contains("boolean") {
                RegType::Primitive(PrimKind::Boolean)
            } else {
                RegType::Primitive(PrimKind::Integer)
            };
            w.set(decoded.v_a as u16, ty);
        }
        return Ok(());
    }
    if mnemonic.starts_with("iget") || mnemonic.starts_with("iput") {
        if !w.get(decoded.v_b as u16).is_reference_like() && !w.get(decoded.v_b as u16).is_uninit_ref() {
            return Err(TypeReject::BadArgumentKind { addr: a, index: 1 }.into());
        }
        let field = resolver
            .resolve_instance_field(method.declaring_class, decoded.v_c)
            .map_err(|e| crate::error::ResolutionFailure { addr: a, kind: e.0 })?;
        let _ = field;
        if mnemonic.starts_with("iget") {
            set_get_result(w, decoded.v_a as u16, mnemonic);
        }
        return Ok(());
    }
    if mnemonic.starts_with("sget") || mnemonic.starts_with("sput") {
        let field = resolver
            .resolve_static_field(method.declaring_class, decoded.v_b)
            .map_err(|e| crate::error::ResolutionFailure { addr: a, kind: e.0 })?;
        let _ = field;
        if mnemonic.starts_with("sget") {
            set_get_result(w, decoded.v_a as u16, mnemonic);
        }
        return Ok(());
    }
    if mnemonic.starts_with("invoke") {
        let kind = if mnemonic.contains("static") {
            InvokeKind::Static
        } else if mnemonic.contains("direct") {
            InvokeKind::Direct
        } else {
            InvokeKind::Virtual
        };
        let idx = decoded.v_b;
        let resolved = resolver
            .resolve_method(method.declaring_class, idx, kind)
            .map_err(|e| crate::error::ResolutionFailure { addr: a, kind: e.0 })?;

        if mnemonic.starts_with("invoke-direct") && resolver.is_instance_init(resolved) {
            // Every alias of the receiver's uninitialized-reference site
            // becomes initialized, not just the register passed here.
            if decoded.arg_count > 0 {
                let receiver_reg = decoded.args[0];
                if let RegType::UninitRef(site) = w.get(receiver_reg) {
                    w.replace_site(site, RegType::InitRef(method.declaring_class));
                }
            }
        }
        return Ok(());
    }
    if mnemonic.starts_with("if-") {
        let a_ty = w.get(decoded.v_a as u16);
        if op.format() == dalvik_asm::format::Format::_22t {
            let b_ty = w.get(decoded.v_b as u16);
            let both_ref = a_ty.is_reference_like() && b_ty.is_reference_like();
            let both_numeric = !a_ty.is_reference_like() && !b_ty.is_reference_like();
            if !both_ref && !both_numeric {
                return Err(TypeReject::BadArgumentKind { addr: a, index: 0 }.into());
            }
        } else {
            // _21t "testz" forms compare a single operand against an
            // implicit zero, not against a synthesized reference-like
            // comparand: if-eqz/if-nez accept a reference or a category-1
            // numeric, the ordered forms accept category-1 numeric only.
            let allow_reference = mnemonic == "if-eqz" || mnemonic == "if-nez";
            let ok = a_ty.is_int_category1() || (allow_reference && a_ty.is_reference_like());
            if !ok {
                return Err(TypeReject::BadArgumentKind { addr: a, index: 0 }.into());
            }
        }
        return Ok(());
    }
    if mnemonic.starts_with("ushr-int/lit") {
        let shift = decoded.v_c as u32 & 0x1f;
        let ty = if shift >= 24 {
            PrimKind::PosByte
        } else {
            PrimKind::Integer
        };
        w.set(decoded.v_a as u16, RegType::Primitive(ty));
        return Ok(());
    }
    if op.index_kind() == dalvik_asm::flags::IndexKind::None_
        && op.format().width_in_code_units() > 0
        && matches!(
            op.format(),
            dalvik_asm::format::Format::_23x
                | dalvik_asm::format::Format::_12x
                | dalvik_asm::format::Format::_22s
                | dalvik_asm::format::Format::_22b
        )
        && !mnemonic.starts_with("move")
    {
        // Generic unary/binary arithmetic: result category follows the
        // mnemonic's declared suffix; bitwise ops over Boolean|Zero widen
        // to Boolean, everything else lands on the natural category type.
        let dest_ty = arithmetic_result_kind(mnemonic);
        w.set(decoded.v_a as u16, RegType::Primitive(dest_ty));
        if matches!(dest_ty, PrimKind::LongLo | PrimKind::DoubleLo) {
            w.set(decoded.v_a as u16 + 1, RegType::Primitive(if dest_ty == PrimKind::LongLo {
                PrimKind::LongHi
            } else {
                PrimKind::DoubleHi
            }));
        }
        return Ok(());
    }
    if mnemonic.starts_with("throw") {
        if !w.get(decoded.v_a as u16).is_reference_like() {
            return Err(TypeReject::BadArgumentKind { addr: a, index: 0 }.into());
        }
        return Ok(());
    }

    Ok(())
}

/// Set the destination register for an `iget*`/`sget*` from the opcode's
/// suffix, mirroring `aget*`'s per-suffix result type.
fn set_get_result<C: Copy + Eq>(w: &mut RegisterLine<C>, dest: u16, mnemonic: &str) {
    let ty = if mnemonic.contains("object") {
        RegType::zero()
    } else if mnemonic.contains("wide") {
        w.set(dest + 1, RegType::Primitive(PrimKind::LongHi));
        RegType::Primitive(PrimKind::LongLo)
    } else if mnemonic.contains("boolean") {
        RegType::Primitive(PrimKind::Boolean)
    } else if mnemonic.contains("byte") {
        RegType::Primitive(PrimKind::Byte)
    } else if mnemonic.contains("char") {
        RegType::Primitive(PrimKind::Char)
    } else if mnemonic.contains("short") {
        RegType::Primitive(PrimKind::Short)
    } else {
        RegType::Primitive(PrimKind::Integer)
    };
    w.set(dest, ty);
}

fn classify_int_literal(v: i32) -> PrimKind {
    if v == 0 {
        return PrimKind::Zero;
    }
    if v == 1 {
        return PrimKind::One;
    }
    if (0..=i32::from(i8::MAX)).contains(&v) {
        return PrimKind::PosByte;
    }
    if (i32::from(i8::MIN)..=i32::from(i8::MAX)).contains(&v) {
        return PrimKind::Byte;
    }
    if (0..=i32::from(i16::MAX)).contains(&v) {
        return PrimKind::PosShort;
    }
    if (i32::from(i16::MIN)..=i32::from(i16::MAX)).contains(&v) {
        return PrimKind::Short;
    }
    if (0..=i32::from(u16::MAX)).contains(&v) {
        return PrimKind::Char;
    }
    PrimKind::Integer
}

fn arithmetic_result_kind(mnemonic: &str) -> PrimKind {
    if mnemonic.contains("long") {
        PrimKind::LongLo
    } else if mnemonic.contains("double") {
        PrimKind::DoubleLo
    } else if mnemonic.contains("float") {
        PrimKind::Float
    } else {
        PrimKind::Integer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_site_only_touches_matching_uninit_refs() {
        let mut line = RegisterLine::<u32>::new(3);
        line.set(0, RegType::UninitRef(5));
        line.set(1, RegType::UninitRef(6));
        line.set(2, RegType::InitRef(1));
        line.replace_site(5, RegType::conflict());
        assert_eq!(line.get(0), RegType::conflict());
        assert_eq!(line.get(1), RegType::UninitRef(6));
        assert_eq!(line.get(2), RegType::InitRef(1));
    }

    #[test]
    fn merge_from_reports_no_change_when_identical() {
        let mut a = RegisterLine::<u32>::new(2);
        a.set(0, RegType::Primitive(PrimKind::Integer));
        let b = a.clone();
        let changed = a.merge_from(&b, |x, _| x);
        assert!(!changed);
    }

    #[test]
    fn merge_from_widens_unknown_to_the_incoming_value() {
        let mut a = RegisterLine::<u32>::new(1);
        let mut b = RegisterLine::<u32>::new(1);
        b.set(0, RegType::Primitive(PrimKind::Integer));
        let changed = a.merge_from(&b, |x, _| x);
        assert!(changed);
        assert_eq!(a.get(0), RegType::Primitive(PrimKind::Integer));
    }

    #[test]
    fn has_any_uninit_ref_detects_a_live_uninitialized_reference() {
        let mut line = RegisterLine::<u32>::new(2);
        assert!(!line.has_any_uninit_ref());
        line.set(1, RegType::UninitRef(0));
        assert!(line.has_any_uninit_ref());
    }

    #[test]
    fn classify_int_literal_picks_the_tightest_category() {
        assert_eq!(classify_int_literal(0), PrimKind::Zero);
        assert_eq!(classify_int_literal(1), PrimKind::One);
        assert_eq!(classify_int_literal(100), PrimKind::PosByte);
        assert_eq!(classify_int_literal(-100), PrimKind::Byte);
        assert_eq!(classify_int_literal(20_000), PrimKind::PosShort);
        assert_eq!(classify_int_literal(70_000), PrimKind::Integer);
    }
}
