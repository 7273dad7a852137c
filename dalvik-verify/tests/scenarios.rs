//! End-to-end scenarios driving `verify_method`/`generate_register_map`
//! through a minimal `Resolver` over hand-assembled instruction streams.

use dalvik_verify::method::{AccessFlags, MethodContract, Prototype, TryItem};
use dalvik_verify::reg_type::RegType;
use dalvik_verify::resolver::{InvokeKind, ResolveError, Resolver};
use dalvik_verify::{generate_register_map, verify_method, VerifyError, VerifyOptions};

const OBJECT_CLASS: u32 = 1;
const FOO_CLASS: u32 = 2;
const INSTANCE_INIT_METHOD: u32 = 42;

#[derive(Clone, Copy)]
struct TestResolver;

impl Resolver for TestResolver {
    type Class = u32;
    type Field = u32;
    type Method = u32;

    fn resolve_class(&self, _referrer: u32, _idx: u32) -> Result<u32, ResolveError> {
        Ok(FOO_CLASS)
    }

    fn resolve_instance_field(&self, _referrer: u32, idx: u32) -> Result<u32, ResolveError> {
        Ok(idx)
    }

    fn resolve_static_field(&self, _referrer: u32, idx: u32) -> Result<u32, ResolveError> {
        Ok(idx)
    }

    fn resolve_method(
        &self,
        _referrer: u32,
        idx: u32,
        _kind: InvokeKind,
    ) -> Result<u32, ResolveError> {
        Ok(idx)
    }

    fn resolve_interface_method(&self, _referrer: u32, _idx: u32) -> Option<u32> {
        None
    }

    fn find_common_superclass(&self, a: u32, b: u32) -> u32 {
        if a == b {
            a
        } else {
            OBJECT_CLASS
        }
    }

    fn class_of(&self, descriptor: &str) -> Option<u32> {
        if descriptor == "Ljava/lang/Object;" {
            Some(OBJECT_CLASS)
        } else {
            None
        }
    }

    fn type_descriptor(&self, _referrer: u32, _idx: u32) -> Option<String> {
        Some("Lcom/example/Foo;".into())
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

    fn is_object_init(&self, method: u32) -> bool {
        method == INSTANCE_INIT_METHOD
    }

    fn is_instance_init(&self, method: u32) -> bool {
        method == INSTANCE_INIT_METHOD
    }
}

fn static_method(insns: Vec<u16>, registers_size: u16, ins_size: u16, return_shorty: char, params: Vec<char>) -> MethodContract<u32> {
    MethodContract {
        registers_size,
        ins_size,
        outs_size: 0,
        insns,
        tries: Vec::<TryItem<u32>>::new(),
        prototype: Prototype {
            params_shorty: params,
            return_shorty,
        },
        access_flags: AccessFlags {
            is_static: true,
            ..Default::default()
        },
        declaring_class: FOO_CLASS,
    }
}

/// S1: `int id(int x) { return x; }`
#[test]
fn s1_identity_function_verifies() {
    let method = static_method(vec![0x000f], 1, 1, 'I', vec!['I']);
    let data = verify_method(&method, &TestResolver, VerifyOptions::default()).unwrap();
    let map = generate_register_map(&method, &data).unwrap();
    assert_eq!(map.entries.len(), 1);
    assert_eq!(map.entries[0].address, 0);
    assert_eq!(map.entries[0].bitmap, vec![0]);
}

/// S2: `Object nullret() { return null; }`
#[test]
fn s2_null_return_marks_zero_as_reference() {
    let method = static_method(vec![0x0012, 0x0011], 1, 0, 'L', vec![]);
    let data = verify_method(&method, &TestResolver, VerifyOptions::default()).unwrap();
    let map = generate_register_map(&method, &data).unwrap();
    assert_eq!(map.entries.len(), 1);
    assert_eq!(map.entries[0].address, 1);
    assert_eq!(map.entries[0].bitmap, vec![0b1]);
}

/// S3: `Foo() { super(); }`, `Foo` directly extends `Object`.
#[test]
fn s3_constructor_calling_super_initializes_this() {
    let method = MethodContract {
        registers_size: 1,
        ins_size: 1,
        outs_size: 1,
        insns: vec![0x1070, INSTANCE_INIT_METHOD as u16, 0x0000, 0x000e],
        tries: Vec::<TryItem<u32>>::new(),
        prototype: Prototype {
            params_shorty: vec![],
            return_shorty: 'V',
        },
        access_flags: AccessFlags {
            is_static: false,
            is_constructor: true,
            ..Default::default()
        },
        declaring_class: FOO_CLASS,
    };
    let data = verify_method(&method, &TestResolver, VerifyOptions::default()).unwrap();
    let line = data.line_at(3).expect("return-void line should be recorded");
    assert_eq!(line.get(0), RegType::InitRef(FOO_CLASS));
}

/// S4: a constructor that never calls `super()` or any sibling constructor.
#[test]
fn s4_constructor_missing_super_is_rejected() {
    let method = MethodContract {
        registers_size: 1,
        ins_size: 1,
        outs_size: 0,
        insns: vec![0x000e],
        tries: Vec::<TryItem<u32>>::new(),
        prototype: Prototype {
            params_shorty: vec![],
            return_shorty: 'V',
        },
        access_flags: AccessFlags {
            is_static: false,
            is_constructor: true,
            ..Default::default()
        },
        declaring_class: FOO_CLASS,
    };
    let err = verify_method(&method, &TestResolver, VerifyOptions::default()).unwrap_err();
    assert!(matches!(err, VerifyError::Type(_)));
}

/// S5: `new-instance v0, Foo; move-object v1, v0; goto` back to the
/// `new-instance`. The second pass through `new-instance` must coerce the
/// stale alias (`v1`) to `Conflict` while `v0` gets a fresh uninitialized
/// reference.
#[test]
fn s5_new_instance_loop_coerces_stale_alias_to_conflict() {
    let method = static_method(vec![0x0022, 5, 0x0108, 0xFD28], 2, 0, 'V', vec![]);
    let data = verify_method(&method, &TestResolver, VerifyOptions::default()).unwrap();
    let line = data
        .line_at(2)
        .expect("move-object join point should be recorded");
    assert!(matches!(line.get(0), RegType::UninitRef(_)));
    assert_eq!(line.get(1), RegType::conflict());
}

/// S6: a `packed-switch` whose sole target lands one code unit past the end
/// of the method.
#[test]
fn s6_packed_switch_overrun_is_rejected() {
    let method = static_method(vec![0x002b, 3, 0, 0x0100, 1, 0, 0, 9, 0], 1, 1, 'V', vec!['I']);
    let err = verify_method(&method, &TestResolver, VerifyOptions::default()).unwrap_err();
    assert!(matches!(err, VerifyError::Structural(_)));
}
