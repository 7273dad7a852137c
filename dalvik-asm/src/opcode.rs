//! The opcode table: one entry per byte value 0x00-0xFF, giving each
//! opcode's [`Format`], [`OpFlags`], and [`IndexKind`].
//!
//! Every byte has a name (including `Unused*` slots for values Dalvik never
//! assigned), and the three per-opcode tables (width via format, flow flags,
//! constant-pool index kind) are generated together from a single
//! declarative list, macro-driven rather than three separately maintained
//! tables that could drift out of sync.

use crate::flags::{IndexKind, OpFlags};
use crate::format::Format;

macro_rules! define_opcodes {
    ($($byte:literal => $variant:ident, $name:literal, $fmt:ident, $flags:expr, $idx:ident;)*) => {
        /// A single Dalvik opcode byte (0x00-0xFF).
        ///
        /// Every byte value has a variant: values Dalvik never assigned are
        /// named `Unused*` rather than left as a hole, so decoding a raw byte
        /// into an `Opcode` is a total, infallible operation.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumCount)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        #[non_exhaustive]
        pub enum Opcode {
            $(
                #[doc = $name]
                $variant = $byte,
            )*
        }

        impl Opcode {
            /// Decode a raw opcode byte. Total: every byte maps to some
            /// opcode, including the `Unused*` and `Reserved` slots.
            #[must_use]
            pub const fn from_u8(byte: u8) -> Self {
                match byte {
                    $($byte => Self::$variant,)*
                }
            }

            /// The operand layout this opcode is decoded with.
            #[must_use]
            pub const fn format(self) -> Format {
                match self {
                    $(Self::$variant => Format::$fmt,)*
                }
            }

            /// Control-flow / GC-point flags for this opcode.
            #[must_use]
            pub const fn flags(self) -> OpFlags {
                OpFlags::from_bits_truncate(match self {
                    $(Self::$variant => $flags,)*
                })
            }

            /// What kind of constant-pool index (if any) this opcode's
            /// reference operand names.
            #[must_use]
            pub const fn index_kind(self) -> IndexKind {
                match self {
                    $(Self::$variant => IndexKind::$idx,)*
                }
            }

            /// The canonical Dalvik mnemonic, e.g. `"const-string/jumbo"`.
            #[must_use]
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Width of this instruction in 16-bit code units.
            ///
            /// For opcodes whose format encodes a data table (`packed-switch`,
            /// `sparse-switch`, `fill-array-data` via the `nop`-disguised
            /// payload), this is the *opcode's own* width; the payload that
            /// follows is measured separately by
            /// [`crate::decode::classify_nop`].
            #[must_use]
            pub const fn width(self) -> u16 {
                self.format().width_in_code_units()
            }

            /// `true` if this opcode was introduced by the quickening
            /// optimizer and must be rejected unless the caller allows
            /// already-optimized input.
            #[must_use]
            pub const fn is_optimized(self) -> bool {
                (self as u8) >= 0xe3
            }
        }

        impl From<u8> for Opcode {
            fn from(byte: u8) -> Self {
                Self::from_u8(byte)
            }
        }

        impl From<Opcode> for u8 {
            fn from(op: Opcode) -> Self {
                op as u8
            }
        }
    };
}

define_opcodes! {
    0x00 => Nop, "nop", _10x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x01 => Move, "move", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x02 => MoveFrom16, "move/from16", _22x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x03 => Move16, "move/16", _32x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x04 => MoveWide, "move-wide", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x05 => MoveWideFrom16, "move-wide/from16", _22x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x06 => MoveWide16, "move-wide/16", _32x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x07 => MoveObject, "move-object", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x08 => MoveObjectFrom16, "move-object/from16", _22x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x09 => MoveObject16, "move-object/16", _32x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x0a => MoveResult, "move-result", _11x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x0b => MoveResultWide, "move-result-wide", _11x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x0c => MoveResultObject, "move-result-object", _11x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x0d => MoveException, "move-exception", _11x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x0e => ReturnVoid, "return-void", _10x, OpFlags::CAN_RETURN.bits(), None_;
    0x0f => Return, "return", _11x, OpFlags::CAN_RETURN.bits(), None_;
    0x10 => ReturnWide, "return-wide", _11x, OpFlags::CAN_RETURN.bits(), None_;
    0x11 => ReturnObject, "return-object", _11x, OpFlags::CAN_RETURN.bits(), None_;
    0x12 => Const4, "const/4", _11n, OpFlags::CAN_CONTINUE.bits(), None_;
    0x13 => Const16, "const/16", _21s, OpFlags::CAN_CONTINUE.bits(), None_;
    0x14 => Const, "const", _31i, OpFlags::CAN_CONTINUE.bits(), None_;
    0x15 => ConstHigh16, "const/high16", _21h, OpFlags::CAN_CONTINUE.bits(), None_;
    0x16 => ConstWide16, "const-wide/16", _21s, OpFlags::CAN_CONTINUE.bits(), None_;
    0x17 => ConstWide32, "const-wide/32", _31i, OpFlags::CAN_CONTINUE.bits(), None_;
    0x18 => ConstWide, "const-wide", _51l, OpFlags::CAN_CONTINUE.bits(), None_;
    0x19 => ConstWideHigh16, "const-wide/high16", _21h, OpFlags::CAN_CONTINUE.bits(), None_;
    0x1a => ConstString, "const-string", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), StringRef;
    0x1b => ConstStringJumbo, "const-string/jumbo", _31c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), StringRef;
    0x1c => ConstClass, "const-class", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), TypeRef;
    0x1d => MonitorEnter, "monitor-enter", _11x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x1e => MonitorExit, "monitor-exit", _11x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x1f => CheckCast, "check-cast", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), TypeRef;
    0x20 => InstanceOf, "instance-of", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), TypeRef;
    0x21 => ArrayLength, "array-length", _12x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x22 => NewInstance, "new-instance", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), TypeRef;
    0x23 => NewArray, "new-array", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), TypeRef;
    0x24 => FilledNewArray, "filled-new-array", _35c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), TypeRef;
    0x25 => FilledNewArrayRange, "filled-new-array/range", _3rc, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), TypeRef;
    0x26 => FillArrayData, "fill-array-data", _31t, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x27 => Throw, "throw", _11x, OpFlags::CAN_THROW.bits(), None_;
    0x28 => Goto, "goto", _10t, OpFlags::CAN_BRANCH.bits(), None_;
    0x29 => Goto16, "goto/16", _20t, OpFlags::CAN_BRANCH.bits(), None_;
    0x2a => Goto32, "goto/32", _30t, OpFlags::CAN_BRANCH.bits(), None_;
    0x2b => PackedSwitch, "packed-switch", _31t, OpFlags::CAN_SWITCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x2c => SparseSwitch, "sparse-switch", _31t, OpFlags::CAN_SWITCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x2d => CmplFloat, "cmpl-float", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x2e => CmpgFloat, "cmpg-float", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x2f => CmplDouble, "cmpl-double", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x30 => CmpgDouble, "cmpg-double", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x31 => CmpLong, "cmp-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x32 => IfEq, "if-eq", _22t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x33 => IfNe, "if-ne", _22t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x34 => IfLt, "if-lt", _22t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x35 => IfGe, "if-ge", _22t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x36 => IfGt, "if-gt", _22t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x37 => IfLe, "if-le", _22t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x38 => IfEqz, "if-eqz", _21t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x39 => IfNez, "if-nez", _21t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x3a => IfLtz, "if-ltz", _21t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x3b => IfGez, "if-gez", _21t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x3c => IfGtz, "if-gtz", _21t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x3d => IfLez, "if-lez", _21t, OpFlags::CAN_BRANCH.bits() | OpFlags::CAN_CONTINUE.bits(), None_;
    0x3e => Unused3E, "UNUSED", _00x, 0, None_;
    0x3f => Unused3F, "UNUSED", _00x, 0, None_;
    0x40 => Unused40, "UNUSED", _00x, 0, None_;
    0x41 => Unused41, "UNUSED", _00x, 0, None_;
    0x42 => Unused42, "UNUSED", _00x, 0, None_;
    0x43 => Unused43, "UNUSED", _00x, 0, None_;
    0x44 => Aget, "aget", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x45 => AgetWide, "aget-wide", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x46 => AgetObject, "aget-object", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x47 => AgetBoolean, "aget-boolean", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x48 => AgetByte, "aget-byte", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x49 => AgetChar, "aget-char", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x4a => AgetShort, "aget-short", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x4b => Aput, "aput", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x4c => AputWide, "aput-wide", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x4d => AputObject, "aput-object", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x4e => AputBoolean, "aput-boolean", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x4f => AputByte, "aput-byte", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x50 => AputChar, "aput-char", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x51 => AputShort, "aput-short", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x52 => Iget, "iget", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x53 => IgetWide, "iget-wide", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x54 => IgetObject, "iget-object", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x55 => IgetBoolean, "iget-boolean", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x56 => IgetByte, "iget-byte", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x57 => IgetChar, "iget-char", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x58 => IgetShort, "iget-short", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x59 => Iput, "iput", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x5a => IputWide, "iput-wide", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x5b => IputObject, "iput-object", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x5c => IputBoolean, "iput-boolean", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x5d => IputByte, "iput-byte", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x5e => IputChar, "iput-char", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x5f => IputShort, "iput-short", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x60 => Sget, "sget", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x61 => SgetWide, "sget-wide", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x62 => SgetObject, "sget-object", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x63 => SgetBoolean, "sget-boolean", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x64 => SgetByte, "sget-byte", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x65 => SgetChar, "sget-char", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x66 => SgetShort, "sget-short", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x67 => Sput, "sput", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x68 => SputWide, "sput-wide", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x69 => SputObject, "sput-object", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x6a => SputBoolean, "sput-boolean", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x6b => SputByte, "sput-byte", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x6c => SputChar, "sput-char", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x6d => SputShort, "sput-short", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldRef;
    0x6e => InvokeVirtual, "invoke-virtual", _35c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x6f => InvokeSuper, "invoke-super", _35c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x70 => InvokeDirect, "invoke-direct", _35c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x71 => InvokeStatic, "invoke-static", _35c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x72 => InvokeInterface, "invoke-interface", _35c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x73 => Unused73, "UNUSED", _00x, 0, None_;
    0x74 => InvokeVirtualRange, "invoke-virtual/range", _3rc, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x75 => InvokeSuperRange, "invoke-super/range", _3rc, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x76 => InvokeDirectRange, "invoke-direct/range", _3rc, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x77 => InvokeStaticRange, "invoke-static/range", _3rc, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x78 => InvokeInterfaceRange, "invoke-interface/range", _3rc, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0x79 => Unused79, "UNUSED", _00x, 0, None_;
    0x7a => Unused7A, "UNUSED", _00x, 0, None_;
    0x7b => NegInt, "neg-int", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x7c => NotInt, "not-int", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x7d => NegLong, "neg-long", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x7e => NotLong, "not-long", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x7f => NegFloat, "neg-float", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x80 => NegDouble, "neg-double", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x81 => IntToLong, "int-to-long", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x82 => IntToFloat, "int-to-float", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x83 => IntToDouble, "int-to-double", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x84 => LongToInt, "long-to-int", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x85 => LongToFloat, "long-to-float", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x86 => LongToDouble, "long-to-double", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x87 => FloatToInt, "float-to-int", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x88 => FloatToLong, "float-to-long", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x89 => FloatToDouble, "float-to-double", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x8a => DoubleToInt, "double-to-int", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x8b => DoubleToLong, "double-to-long", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x8c => DoubleToFloat, "double-to-float", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x8d => IntToByte, "int-to-byte", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x8e => IntToChar, "int-to-char", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x8f => IntToShort, "int-to-short", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x90 => AddInt, "add-int", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x91 => SubInt, "sub-int", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x92 => MulInt, "mul-int", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x93 => DivInt, "div-int", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x94 => RemInt, "rem-int", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x95 => AndInt, "and-int", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x96 => OrInt, "or-int", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x97 => XorInt, "xor-int", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x98 => ShlInt, "shl-int", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x99 => ShrInt, "shr-int", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x9a => UshrInt, "ushr-int", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x9b => AddLong, "add-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x9c => SubLong, "sub-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x9d => MulLong, "mul-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0x9e => DivLong, "div-long", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0x9f => RemLong, "rem-long", _23x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0xa0 => AndLong, "and-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xa1 => OrLong, "or-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xa2 => XorLong, "xor-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xa3 => ShlLong, "shl-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xa4 => ShrLong, "shr-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xa5 => UshrLong, "ushr-long", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xa6 => AddFloat, "add-float", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xa7 => SubFloat, "sub-float", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xa8 => MulFloat, "mul-float", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xa9 => DivFloat, "div-float", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xaa => RemFloat, "rem-float", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xab => AddDouble, "add-double", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xac => SubDouble, "sub-double", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xad => MulDouble, "mul-double", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xae => DivDouble, "div-double", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xaf => RemDouble, "rem-double", _23x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xb0 => AddInt2addr, "add-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xb1 => SubInt2addr, "sub-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xb2 => MulInt2addr, "mul-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xb3 => DivInt2addr, "div-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0xb4 => RemInt2addr, "rem-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0xb5 => AndInt2addr, "and-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xb6 => OrInt2addr, "or-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xb7 => XorInt2addr, "xor-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xb8 => ShlInt2addr, "shl-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xb9 => ShrInt2addr, "shr-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xba => UshrInt2addr, "ushr-int/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xbb => AddLong2addr, "add-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xbc => SubLong2addr, "sub-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xbd => MulLong2addr, "mul-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xbe => DivLong2addr, "div-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0xbf => RemLong2addr, "rem-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0xc0 => AndLong2addr, "and-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xc1 => OrLong2addr, "or-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xc2 => XorLong2addr, "xor-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xc3 => ShlLong2addr, "shl-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xc4 => ShrLong2addr, "shr-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xc5 => UshrLong2addr, "ushr-long/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xc6 => AddFloat2addr, "add-float/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xc7 => SubFloat2addr, "sub-float/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xc8 => MulFloat2addr, "mul-float/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xc9 => DivFloat2addr, "div-float/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xca => RemFloat2addr, "rem-float/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xcb => AddDouble2addr, "add-double/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xcc => SubDouble2addr, "sub-double/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xcd => MulDouble2addr, "mul-double/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xce => DivDouble2addr, "div-double/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xcf => RemDouble2addr, "rem-double/2addr", _12x, OpFlags::CAN_CONTINUE.bits(), None_;
    0xd0 => AddIntLit16, "add-int/lit16", _22s, OpFlags::CAN_CONTINUE.bits(), None_;
    0xd1 => RsubInt, "rsub-int", _22s, OpFlags::CAN_CONTINUE.bits(), None_;
    0xd2 => MulIntLit16, "mul-int/lit16", _22s, OpFlags::CAN_CONTINUE.bits(), None_;
    0xd3 => DivIntLit16, "div-int/lit16", _22s, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0xd4 => RemIntLit16, "rem-int/lit16", _22s, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0xd5 => AndIntLit16, "and-int/lit16", _22s, OpFlags::CAN_CONTINUE.bits(), None_;
    0xd6 => OrIntLit16, "or-int/lit16", _22s, OpFlags::CAN_CONTINUE.bits(), None_;
    0xd7 => XorIntLit16, "xor-int/lit16", _22s, OpFlags::CAN_CONTINUE.bits(), None_;
    0xd8 => AddIntLit8, "add-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits(), None_;
    0xd9 => RsubIntLit8, "rsub-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits(), None_;
    0xda => MulIntLit8, "mul-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits(), None_;
    0xdb => DivIntLit8, "div-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0xdc => RemIntLit8, "rem-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), None_;
    0xdd => AndIntLit8, "and-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits(), None_;
    0xde => OrIntLit8, "or-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits(), None_;
    0xdf => XorIntLit8, "xor-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits(), None_;
    0xe0 => ShlIntLit8, "shl-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits(), None_;
    0xe1 => ShrIntLit8, "shr-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits(), None_;
    0xe2 => UshrIntLit8, "ushr-int/lit8", _22b, OpFlags::CAN_CONTINUE.bits(), None_;
    0xe3 => IgetVolatile, "+iget-volatile", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xe4 => IputVolatile, "+iput-volatile", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xe5 => SgetVolatile, "+sget-volatile", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xe6 => SputVolatile, "+sput-volatile", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xe7 => IgetObjectVolatile, "+iget-object-volatile", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xe8 => IgetWideVolatile, "+iget-wide-volatile", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xe9 => IputWideVolatile, "+iput-wide-volatile", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xea => SgetWideVolatile, "+sget-wide-volatile", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xeb => SputWideVolatile, "+sput-wide-volatile", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xec => Breakpoint, "^breakpoint", _00x, 0, None_;
    0xed => ThrowVerificationError, "^throw-verification-error", _20bc, OpFlags::CAN_THROW.bits(), Varies;
    0xee => ExecuteInline, "+execute-inline", _35mi, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), InlineMethod;
    0xef => ExecuteInlineRange, "+execute-inline/range", _3rmi, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), InlineMethod;
    0xf0 => InvokeDirectEmpty, "+invoke-direct-empty", _35c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0xf1 => UnusedF1, "UNUSED", _00x, 0, None_;
    0xf2 => IgetQuick, "+iget-quick", _22cs, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xf3 => IgetWideQuick, "+iget-wide-quick", _22cs, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xf4 => IgetObjectQuick, "+iget-object-quick", _22cs, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xf5 => IputQuick, "+iput-quick", _22cs, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xf6 => IputWideQuick, "+iput-wide-quick", _22cs, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xf7 => IputObjectQuick, "+iput-object-quick", _22cs, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xf8 => InvokeVirtualQuick, "+invoke-virtual-quick", _35c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0xf9 => InvokeVirtualQuickRange, "+invoke-virtual-quick/range", _3rc, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0xfa => InvokeSuperQuick, "+invoke-super-quick", _35c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0xfb => InvokeSuperQuickRange, "+invoke-super-quick/range", _3rc, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits() | OpFlags::IS_INVOKE.bits(), MethodRef;
    0xfc => IputObjectVolatile, "+iput-object-volatile", _22c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xfd => SgetObjectVolatile, "+sget-object-volatile", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xfe => SputObjectVolatile, "+sput-object-volatile", _21c, OpFlags::CAN_CONTINUE.bits() | OpFlags::CAN_THROW.bits(), FieldOffset;
    0xff => UnusedFF, "UNUSED", _00x, 0, None_;

}
