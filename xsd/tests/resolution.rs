mod common;

use common::{fixture, schema, uri};
use dt_xsd_graph::{DeclarationBag, NameMode, QName, SchemaCache};

#[test]
fn different_prefixes_for_one_namespace_resolve_equal() {
    let f = fixture(&[
        ("a.xsd", schema("urn:x", "a", r#"<xs:include schemaLocation="b.xsd"/>"#)),
        ("b.xsd", schema("urn:x", "b", "")),
    ]);
    let mut cache = SchemaCache::new();
    let a = f.loader.load_schema(&mut cache, &uri("a.xsd"), false).unwrap();
    let b = cache.get(a).includes[0];

    let in_a = cache.get(a).resolve_qname("a:Foo", NameMode::Reference).unwrap();
    let in_b = cache.get(b).resolve_qname("b:Foo", NameMode::Reference).unwrap();

    assert_eq!(in_a.qname.key(), in_b.qname.key());
    assert_eq!(in_a.qname, QName::with_namespace("urn:x", "Foo"));
}

#[test]
fn own_declarations_shadow_included_ones() {
    let f = fixture(&[
        (
            "root.xsd",
            schema(
                "urn:a",
                "tns",
                r#"<xs:include schemaLocation="lib1.xsd"/>
                   <xs:include schemaLocation="lib2.xsd"/>
                   <xs:complexType name="Shared"><xs:sequence/></xs:complexType>"#,
            ),
        ),
        (
            "lib1.xsd",
            schema(
                "urn:a",
                "p1",
                r#"<xs:complexType name="Shared"/>
                   <xs:complexType name="Dup"/>"#,
            ),
        ),
        (
            "lib2.xsd",
            schema(
                "urn:a",
                "p2",
                r#"<xs:complexType name="Dup"/>
                   <xs:complexType name="Only2"/>"#,
            ),
        ),
    ]);
    let mut cache = SchemaCache::new();
    let root = f.loader.load_schema(&mut cache, &uri("root.xsd"), false).unwrap();
    let lib1 = cache.get(root).includes[0];
    let lib2 = cache.get(root).includes[1];
    let bag = DeclarationBag::new(&cache, root);

    let shared = bag.global_complex_type(root, "tns:Shared").unwrap();
    assert_eq!(shared.schema, root);
    assert!(shared.declaration.content.is_some());

    assert_eq!(bag.global_complex_type(root, "tns:Dup").unwrap().schema, lib1);
    assert_eq!(bag.global_complex_type(root, "tns:Only2").unwrap().schema, lib2);

    // Searching from an include only sees that include's subgraph.
    assert!(bag.global_complex_type(lib1, "tns:Only2").is_none());
}

#[test]
fn unknown_names_are_absent_without_side_effects() {
    let f = fixture(&[(
        "root.xsd",
        schema("urn:a", "tns", r#"<xs:element name="Present"/>"#),
    )]);
    let mut cache = SchemaCache::new();
    let root = f.loader.load_schema(&mut cache, &uri("root.xsd"), false).unwrap();
    let fetches = f.fetch_count();

    let bag = DeclarationBag::new(&cache, root);
    assert!(bag.global_complex_type(root, "tns:Missing").is_none());
    assert!(bag.global_element(root, "tns:Missing").is_none());
    assert!(bag.global_element(root, "unbound:Present").is_none());
    // A bare name without default namespace has no namespace, so it is not `{urn:a}Present`.
    assert!(bag.global_element(root, "Present").is_none());
    assert!(bag.global_element(root, "tns:Present").is_some());

    assert_eq!(cache.len(), 1);
    assert_eq!(f.fetch_count(), fetches);
}

#[test]
fn default_namespace_applies_to_bare_references() {
    let f = fixture(&[(
        "root.xsd",
        r#"<schema xmlns="http://www.w3.org/2001/XMLSchema" xmlns:t="urn:a" targetNamespace="urn:a">
               <complexType name="Order"/>
           </schema>"#
            .to_string(),
    )]);
    let mut cache = SchemaCache::new();
    let root = f.loader.load_schema(&mut cache, &uri("root.xsd"), false).unwrap();
    let schema = cache.get(root);
    assert_eq!(schema.namespaces.xsd_prefix.as_deref(), Some(""));
    assert_eq!(schema.namespaces.own_prefix.as_deref(), Some("t"));

    let bag = DeclarationBag::new(&cache, root);
    assert!(bag.global_complex_type(root, "t:Order").is_some());
    let resolved = bag.resolve_qname("string", NameMode::Reference).unwrap();
    assert_eq!(
        resolved.qname,
        QName::with_namespace("http://www.w3.org/2001/XMLSchema", "string")
    );
    assert_eq!(resolved.import_prefix, None);
}

#[test]
fn imported_declarations_resolve_through_the_importing_prefix() {
    let f = fixture(&[
        (
            "root.xsd",
            schema(
                "urn:a",
                "tns",
                r#"<xs:import namespace="urn:b" schemaLocation="../other/b.xsd"/>"#,
            )
            .replace("xmlns:tns", "xmlns:ext=\"urn:b\" xmlns:tns"),
        ),
        ("../other/b.xsd", schema("urn:b", "b", r#"<xs:element name="Item"/>"#)),
    ]);
    let mut cache = SchemaCache::new();
    let root = f.loader.load_schema(&mut cache, &uri("root.xsd"), false).unwrap();
    let imported = cache.get(root).includes[0];

    let bag = DeclarationBag::new(&cache, root);
    let item = bag.global_element(root, "ext:Item").unwrap();
    assert_eq!(item.schema, imported);
    assert_eq!(
        bag.resolve_qname("ext:Item", NameMode::Reference)
            .unwrap()
            .import_prefix
            .as_deref(),
        Some("ext")
    );
    assert!(bag.global_element(root, "tns:Item").is_none());
}

#[test]
fn substitution_members_are_found_across_includes() {
    let f = fixture(&[
        (
            "root.xsd",
            schema(
                "urn:a",
                "tns",
                r#"<xs:include schemaLocation="lib.xsd"/>
                   <xs:element name="Derived" substitutionGroup="x:Base"/>"#,
            ),
        ),
        ("lib.xsd", schema("urn:a", "x", r#"<xs:element name="Base"/>"#)),
    ]);
    let mut cache = SchemaCache::new();
    let root = f.loader.load_schema(&mut cache, &uri("root.xsd"), false).unwrap();
    let bag = DeclarationBag::new(&cache, root);

    let base = bag.global_element(root, "tns:Base").unwrap();
    let members = cache.substitution_members_of(root, base.schema, base.declaration);
    let names: Vec<_> = members
        .iter()
        .map(|m| m.declaration.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, ["Derived"]);
    assert_eq!(members[0].schema, root);

    assert_eq!(bag.substitution_members(root, "tns:Base").len(), 1);
}

#[test]
fn substitution_excludes_head_and_is_not_transitive() {
    let f = fixture(&[(
        "root.xsd",
        schema(
            "urn:a",
            "tns",
            r#"<xs:element name="Base" substitutionGroup="tns:Base"/>
               <xs:element name="Derived" substitutionGroup="tns:Base"/>
               <xs:element name="MoreDerived" substitutionGroup="tns:Derived"/>
               <xs:element name="Elsewhere" substitutionGroup="tns:Other"/>"#,
        ),
    )]);
    let mut cache = SchemaCache::new();
    let root = f.loader.load_schema(&mut cache, &uri("root.xsd"), false).unwrap();

    let members = cache.substitution_members(root, &QName::with_namespace("urn:a", "Base"));
    let names: Vec<_> = members
        .iter()
        .map(|m| m.declaration.name.as_deref().unwrap())
        .collect();
    assert_eq!(names, ["Derived"]);
}

#[test]
fn substitution_group_in_another_namespace_does_not_match() {
    let f = fixture(&[(
        "root.xsd",
        schema(
            "urn:a",
            "tns",
            r#"<xs:element name="Base"/>
               <xs:element name="Foreign" substitutionGroup="o:Base"/>"#,
        )
        .replace("xmlns:tns", "xmlns:o=\"urn:other\" xmlns:tns"),
    )]);
    let mut cache = SchemaCache::new();
    let root = f.loader.load_schema(&mut cache, &uri("root.xsd"), false).unwrap();

    let members = cache.substitution_members(root, &QName::with_namespace("urn:a", "Base"));
    assert!(members.is_empty());
}

#[test]
fn collector_flattens_self_before_includes_without_dedup() {
    let f = fixture(&[
        (
            "root.xsd",
            schema(
                "urn:a",
                "tns",
                r#"<xs:include schemaLocation="a.xsd"/>
                   <xs:include schemaLocation="b.xsd"/>
                   <xs:element name="Root"/>
                   <xs:attribute name="version"/>
                   <xs:notation name="gif" public="image/gif"/>"#,
            ),
        ),
        (
            "a.xsd",
            schema(
                "urn:a",
                "tns",
                r#"<xs:include schemaLocation="common.xsd"/>
                   <xs:element name="A"/>
                   <xs:group name="G"><xs:sequence/></xs:group>"#,
            ),
        ),
        (
            "b.xsd",
            schema(
                "urn:a",
                "tns",
                r#"<xs:include schemaLocation="common.xsd"/>
                   <xs:element name="B"/>"#,
            ),
        ),
        (
            "common.xsd",
            schema(
                "urn:a",
                "tns",
                r#"<xs:element name="Common"/>
                   <xs:attributeGroup name="Ids"><xs:attribute name="id"/></xs:attributeGroup>"#,
            ),
        ),
    ]);
    let mut cache = SchemaCache::new();
    let root = f.loader.load_schema(&mut cache, &uri("root.xsd"), false).unwrap();

    let bag = DeclarationBag::collected(&cache, root);
    let elements: Vec<_> = bag
        .elements
        .iter()
        .map(|e| e.declaration.name.as_deref().unwrap())
        .collect();
    assert_eq!(elements, ["Root", "A", "Common", "B", "Common"]);
    assert_eq!(bag.attributes.len(), 1);
    assert_eq!(bag.attribute_groups.len(), 2);
    assert_eq!(bag.groups.len(), 1);
    assert_eq!(bag.notations[0].declaration.name, "gif");
    assert_eq!(f.fetch_count(), 4, "common.xsd is loaded once");
}

#[test]
fn simple_types_attribute_groups_and_groups_follow_include_order() {
    let f = fixture(&[
        (
            "root.xsd",
            schema(
                "urn:a",
                "tns",
                r#"<xs:include schemaLocation="lib1.xsd"/>
                   <xs:include schemaLocation="lib2.xsd"/>
                   <xs:simpleType name="Code">
                       <xs:restriction base="xs:string"/>
                   </xs:simpleType>"#,
            ),
        ),
        (
            "lib1.xsd",
            schema(
                "urn:a",
                "l1",
                r#"<xs:simpleType name="Code"><xs:restriction base="xs:token"/></xs:simpleType>
                   <xs:attributeGroup name="Audit"><xs:attribute name="by"/></xs:attributeGroup>
                   <xs:group name="Body"><xs:sequence><xs:element name="first"/></xs:sequence></xs:group>"#,
            ),
        ),
        (
            "lib2.xsd",
            schema(
                "urn:a",
                "l2",
                r#"<xs:attributeGroup name="Audit"><xs:attribute name="at"/></xs:attributeGroup>
                   <xs:group name="Body"><xs:sequence><xs:element name="second"/></xs:sequence></xs:group>
                   <xs:group name="Tail"><xs:sequence/></xs:group>"#,
            ),
        ),
    ]);
    let mut cache = SchemaCache::new();
    let root = f.loader.load_schema(&mut cache, &uri("root.xsd"), false).unwrap();
    let lib1 = cache.get(root).includes[0];
    let lib2 = cache.get(root).includes[1];
    let bag = DeclarationBag::new(&cache, root);

    // own declaration before the included one
    let code = bag.global_simple_type(root, "tns:Code").unwrap();
    assert_eq!(code.schema, root);
    // first include wins over the second
    let audit = bag.global_attribute_group(root, "tns:Audit").unwrap();
    assert_eq!(audit.schema, lib1);
    assert_eq!(audit.declaration.attributes[0].name.as_deref(), Some("by"));
    let body = bag.global_group(root, "tns:Body").unwrap();
    assert_eq!(body.schema, lib1);
    let tail = bag.global_group(root, "tns:Tail").unwrap();
    assert_eq!(tail.schema, lib2);
    // searching from an include only sees that include
    assert_eq!(bag.global_attribute_group(lib2, "tns:Audit").unwrap().schema, lib2);

    assert!(bag.global_simple_type(root, "tns:Missing").is_none());
    assert!(bag.global_attribute_group(root, "tns:Missing").is_none());
    assert!(bag.global_group(root, "tns:Missing").is_none());
    assert!(bag.global_group(root, "other:Body").is_none());
    assert_eq!(f.fetch_count(), 3);
}
