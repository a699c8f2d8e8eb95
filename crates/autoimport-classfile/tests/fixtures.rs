use autoimport_classfile::{Annotation, ClassFile, ClassMember, ConstValue, ElementValue, InnerClassInfo};

fn base_class() -> ClassFile {
    ClassFile {
        minor_version: 0,
        major_version: 52,
        access_flags: 0x0021,
        this_class: "com/example/Simple".into(),
        super_class: Some("java/lang/Object".into()),
        interfaces: Vec::new(),
        fields: Vec::new(),
        methods: Vec::new(),
        signature: None,
        runtime_visible_annotations: Vec::new(),
        runtime_invisible_annotations: Vec::new(),
        inner_classes: Vec::new(),
    }
}

#[test]
fn stub_carries_field_and_method_descriptors() {
    let mut class = base_class();
    class.fields.push(ClassMember {
        access_flags: 0x0001,
        name: "f".into(),
        descriptor: "I".into(),
        signature: None,
        runtime_visible_annotations: Vec::new(),
        runtime_invisible_annotations: Vec::new(),
    });
    class.methods.push(ClassMember {
        access_flags: 0x0001,
        name: "m".into(),
        descriptor: "()V".into(),
        signature: None,
        runtime_visible_annotations: Vec::new(),
        runtime_invisible_annotations: Vec::new(),
    });

    let stub = class.stub().unwrap();
    assert_eq!(stub.internal_name, "com/example/Simple");
    assert_eq!(stub.super_class.as_deref(), Some("java/lang/Object"));
    assert_eq!(stub.fields[0].parsed_descriptor, autoimport_classfile::FieldType::Base(autoimport_classfile::BaseType::Int));

    let m = stub.methods.iter().find(|m| m.name == "m").unwrap();
    assert_eq!(m.parsed_descriptor.params.len(), 0);
    assert_eq!(m.parsed_descriptor.return_type, autoimport_classfile::ReturnType::Void);
}

#[test]
fn stub_parses_generic_class_signature() {
    let mut class = base_class();
    class.this_class = "com/example/Generic".into();
    class.signature = Some("<T:Ljava/lang/Number;>Ljava/lang/Object;".into());
    class.fields.push(ClassMember {
        access_flags: 0x0001,
        name: "value".into(),
        descriptor: "Ljava/lang/Object;".into(),
        signature: Some("TT;".into()),
        runtime_visible_annotations: Vec::new(),
        runtime_invisible_annotations: Vec::new(),
    });

    let stub = class.stub().unwrap();
    let sig = stub.signature.unwrap();
    assert_eq!(sig.type_parameters.len(), 1);
    assert_eq!(sig.type_parameters[0].name, "T");

    let field = &stub.fields[0];
    assert_eq!(
        field.signature,
        Some(autoimport_classfile::FieldTypeSignature::TypeVariable("T".into()))
    );
}

#[test]
fn stub_is_best_effort_for_unparseable_signature_attribute() {
    let mut class = base_class();
    class.this_class = "com/example/BadSignature".into();
    class.signature = Some("not a signature".into());
    class.fields.push(ClassMember {
        access_flags: 0x0001,
        name: "f".into(),
        descriptor: "I".into(),
        signature: Some("not a signature".into()),
        runtime_visible_annotations: Vec::new(),
        runtime_invisible_annotations: Vec::new(),
    });

    // `ClassStub::from_classfile` propagates signature parse failures rather
    // than silently dropping them; malformed `Signature` attributes are a
    // `javac`-cannot-happen case, not a best-effort one.
    assert!(class.stub().is_err());
}

#[test]
fn runtime_annotations_surface_on_the_stub() {
    let mut class = base_class();
    class.this_class = "com/example/Annotated".into();
    class.runtime_visible_annotations.push(Annotation {
        type_descriptor: "Lcom/example/Ann;".into(),
        type_internal_name: Some("com/example/Ann".into()),
        elements: vec![(
            "value".to_string(),
            ElementValue::Const(ConstValue::String("hello".into())),
        )],
    });

    let stub = class.stub().unwrap();
    assert_eq!(stub.annotations.len(), 1);
    assert_eq!(stub.annotations[0].type_descriptor, "Lcom/example/Ann;");
}

#[test]
fn inner_classes_attribute_round_trips_onto_the_classfile() {
    let mut class = base_class();
    class.this_class = "com/example/Outer".into();
    class.inner_classes.push(InnerClassInfo {
        inner_class: "com/example/Outer$Inner".into(),
        outer_class: Some("com/example/Outer".into()),
        inner_name: Some("Inner".into()),
        access_flags: 0x0001,
    });

    assert_eq!(class.inner_classes.len(), 1);
    let inner = &class.inner_classes[0];
    assert_eq!(inner.inner_class, "com/example/Outer$Inner");
    assert_eq!(inner.outer_class.as_deref(), Some("com/example/Outer"));
}
