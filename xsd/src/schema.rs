use std::path::PathBuf;

use log::warn;
use roxmltree::Node;

use super::{
    annotation::Annotation,
    attribute_decl::AttributeDeclaration,
    attribute_group_def::AttributeGroupDefinition,
    cache::SchemaRef,
    complex_type_def::ComplexTypeDefinition,
    element_decl::ElementDeclaration,
    error::XsdError,
    import::Directive,
    model_group_def::ModelGroupDefinition,
    namespaces::{NameMode, Namespaces, RawAttribute, ResolvedName},
    notation_decl::NotationDeclaration,
    shared::Form,
    simple_type_def::SimpleTypeDefinition,
    uri::SchemaUri,
    values::string_value,
    xstypes::{AnyURI, QName, Sequence, XML_NAMESPACE, XSD_NAMESPACE},
};

/// One parsed XSD document and its place in the schema graph.
///
/// The declaration lists are independent of each other; a schema simply has zero or more of each
/// kind, in document order.
#[derive(Clone, Debug)]
pub struct Schema {
    pub load_uri: SchemaUri,
    pub local_path: Option<PathBuf>,
    pub namespaces: Namespaces,

    pub target_namespace: Option<AnyURI>,
    pub element_form_default: Form,
    pub attribute_form_default: Form,
    pub block_default: Option<String>,
    pub final_default: Option<String>,
    pub version: Option<String>,
    pub id: Option<String>,
    pub lang: Option<String>,

    pub annotations: Sequence<Annotation>,
    pub directives: Sequence<Directive>,
    pub attributes: Sequence<AttributeDeclaration>,
    pub attribute_groups: Sequence<AttributeGroupDefinition>,
    pub complex_types: Sequence<ComplexTypeDefinition>,
    pub simple_types: Sequence<SimpleTypeDefinition>,
    pub elements: Sequence<ElementDeclaration>,
    pub groups: Sequence<ModelGroupDefinition>,
    pub notations: Sequence<NotationDeclaration>,

    /// Schemas pulled in by `directives`, in document order.
    pub includes: Sequence<SchemaRef>,
    /// The schema that most recently pulled this one in. Only used to ascend to the root.
    pub parent: Option<SchemaRef>,
}

impl Schema {
    pub const TAG_NAME: &'static str = "schema";

    /// Maps the `<schema>` root element. The namespace bindings are left empty; they are
    /// populated from the raw root attributes by [`Schema::resolve_namespaces()`].
    pub(crate) fn map_from_xml(
        schema: Node,
        load_uri: SchemaUri,
        local_path: Option<PathBuf>,
    ) -> Result<Self, XsdError> {
        if schema.tag_name().name() != Self::TAG_NAME
            || schema.tag_name().namespace() != Some(XSD_NAMESPACE)
        {
            return Err(XsdError::NotASchema {
                uri: load_uri.to_string(),
                found: schema.tag_name().name().to_string(),
            });
        }

        let mut this = Self {
            load_uri,
            local_path,
            namespaces: Namespaces::default(),
            target_namespace: string_value(schema, "targetNamespace"),
            element_form_default: Form::from_xml(schema, "elementFormDefault")?
                .unwrap_or_default(),
            attribute_form_default: Form::from_xml(schema, "attributeFormDefault")?
                .unwrap_or_default(),
            block_default: string_value(schema, "blockDefault"),
            final_default: string_value(schema, "finalDefault"),
            version: string_value(schema, "version"),
            id: string_value(schema, "id"),
            lang: schema
                .attribute((XML_NAMESPACE, "lang"))
                .map(str::to_string),
            annotations: Sequence::new(),
            directives: Sequence::new(),
            attributes: Sequence::new(),
            attribute_groups: Sequence::new(),
            complex_types: Sequence::new(),
            simple_types: Sequence::new(),
            elements: Sequence::new(),
            groups: Sequence::new(),
            notations: Sequence::new(),
            includes: Sequence::new(),
            parent: None,
        };

        for top_level_element in schema.children().filter(|e| e.is_element()) {
            match top_level_element.tag_name().name() {
                Annotation::TAG_NAME => this
                    .annotations
                    .push(Annotation::map_from_xml(top_level_element)),
                Directive::INCLUDE_TAG_NAME
                | Directive::IMPORT_TAG_NAME
                | Directive::REDEFINE_TAG_NAME => {
                    if let Some(directive) = Directive::map_from_xml(top_level_element)? {
                        this.directives.push(directive);
                    }
                }
                AttributeDeclaration::TAG_NAME => this
                    .attributes
                    .push(AttributeDeclaration::map_from_xml(top_level_element)?),
                AttributeGroupDefinition::TAG_NAME => this
                    .attribute_groups
                    .push(AttributeGroupDefinition::map_from_xml(top_level_element)?),
                ComplexTypeDefinition::TAG_NAME => this
                    .complex_types
                    .push(ComplexTypeDefinition::map_from_xml(top_level_element)?),
                SimpleTypeDefinition::TAG_NAME => this
                    .simple_types
                    .push(SimpleTypeDefinition::map_from_xml(top_level_element)?),
                ElementDeclaration::TAG_NAME => this
                    .elements
                    .push(ElementDeclaration::map_from_xml(top_level_element)?),
                ModelGroupDefinition::TAG_NAME => this
                    .groups
                    .push(ModelGroupDefinition::map_from_xml(top_level_element)?),
                NotationDeclaration::TAG_NAME => this
                    .notations
                    .push(NotationDeclaration::map_from_xml(top_level_element)?),
                other => warn!(
                    "{}: ignoring unsupported top level element <{other}>",
                    this.load_uri
                ),
            }
        }

        Ok(this)
    }

    /// Populates the prefix bindings from the root element's raw attributes. Must run before
    /// anything is resolved against this schema.
    pub(crate) fn resolve_namespaces(&mut self, root_attributes: &[RawAttribute]) {
        self.namespaces =
            Namespaces::from_root_attributes(root_attributes, self.target_namespace.as_deref());
    }

    /// Resolves a lexical QName written in this schema.
    pub fn resolve_qname(&self, name: &str, mode: NameMode) -> Result<ResolvedName, XsdError> {
        self.namespaces
            .resolve_qname(name, mode, self.target_namespace.as_deref())
    }

    /// The identity of a top-level declaration named `local_name` in this schema.
    pub fn qname(&self, local_name: &str) -> QName {
        QName::with_optional_namespace(self.target_namespace.as_deref(), local_name)
    }
}

/// Captures the attributes of the document's root element as written, namespace declarations
/// included, which the structural mapping does not keep in a reusable form.
pub(crate) fn root_attributes(document: &roxmltree::Document) -> Sequence<RawAttribute> {
    let root = document.root_element();
    let mut attributes: Sequence<RawAttribute> = root
        .namespaces()
        .filter(|ns| ns.uri() != XML_NAMESPACE || ns.name() != Some("xml"))
        .map(|ns| match ns.name() {
            Some(prefix) => RawAttribute::new(Some("xmlns"), prefix, ns.uri()),
            None => RawAttribute::new(None, "xmlns", ns.uri()),
        })
        .collect();
    attributes.extend(root.attributes().map(|attribute| {
        let prefix = attribute
            .namespace()
            .and_then(|uri| root.lookup_prefix(uri));
        RawAttribute::new(prefix, attribute.name(), attribute.value())
    }));
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::Directive;

    const SCHEMA: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:tns="urn:a"
           xmlns:b="urn:b"
           targetNamespace="urn:a"
           elementFormDefault="qualified"
           version="1.2"
           xml:lang="en">
    <xs:annotation><xs:documentation>Root schema</xs:documentation></xs:annotation>
    <xs:include schemaLocation="lib.xsd"/>
    <xs:import namespace="urn:b" schemaLocation="b.xsd"/>
    <xs:import namespace="urn:c"/>
    <xs:element name="Root" type="tns:RootType"/>
    <xs:complexType name="RootType">
        <xs:sequence><xs:element ref="b:Item"/></xs:sequence>
    </xs:complexType>
    <xs:simpleType name="Color">
        <xs:restriction base="xs:string">
            <xs:enumeration value="red"/>
            <xs:enumeration value="green"/>
        </xs:restriction>
    </xs:simpleType>
    <xs:attribute name="lang" type="xs:language"/>
    <xs:attributeGroup name="Common"><xs:attribute name="id" type="xs:ID"/></xs:attributeGroup>
    <xs:group name="Items"><xs:choice><xs:element name="a"/></xs:choice></xs:group>
    <xs:notation name="png" public="image/png"/>
</xs:schema>"#;

    fn parse() -> Schema {
        let document = roxmltree::Document::parse(SCHEMA).unwrap();
        let mut schema = Schema::map_from_xml(
            document.root_element(),
            SchemaUri::parse("http://example.com/root.xsd").unwrap(),
            None,
        )
        .unwrap();
        schema.resolve_namespaces(&root_attributes(&document));
        schema
    }

    #[test]
    fn maps_schema_attributes() {
        let schema = parse();
        assert_eq!(schema.target_namespace.as_deref(), Some("urn:a"));
        assert_eq!(schema.element_form_default, Form::Qualified);
        assert_eq!(schema.attribute_form_default, Form::Unqualified);
        assert_eq!(schema.version.as_deref(), Some("1.2"));
        assert_eq!(schema.lang.as_deref(), Some("en"));
        assert_eq!(schema.annotations[0].documentation, ["Root schema"]);
    }

    #[test]
    fn maps_top_level_declarations_in_order() {
        let schema = parse();
        assert_eq!(schema.elements.len(), 1);
        assert_eq!(schema.complex_types[0].name.as_deref(), Some("RootType"));
        assert_eq!(schema.simple_types.len(), 1);
        assert_eq!(schema.attributes.len(), 1);
        assert_eq!(schema.attribute_groups[0].attributes.len(), 1);
        assert_eq!(schema.groups[0].name.as_deref(), Some("Items"));
        assert_eq!(schema.notations[0].public_identifier.as_deref(), Some("image/png"));

        let locations: Vec<_> = schema
            .directives
            .iter()
            .map(Directive::schema_location)
            .collect();
        assert_eq!(locations, [Some("lib.xsd"), Some("b.xsd"), None]);
    }

    #[test]
    fn namespaces_come_from_root_attributes() {
        let schema = parse();
        assert_eq!(schema.namespaces.xsd_prefix.as_deref(), Some("xs"));
        assert_eq!(schema.namespaces.own_prefix.as_deref(), Some("tns"));
        assert_eq!(schema.namespaces.lookup("b"), Some("urn:b"));
        assert_eq!(schema.namespaces.lookup("xml"), Some(XML_NAMESPACE));
        assert_eq!(
            schema
                .resolve_qname("tns:RootType", NameMode::Reference)
                .unwrap()
                .qname,
            schema.qname("RootType")
        );
    }

    #[test]
    fn rejects_non_schema_root() {
        let document = roxmltree::Document::parse("<schema/>").unwrap();
        let err = Schema::map_from_xml(
            document.root_element(),
            SchemaUri::parse("http://example.com/x.xsd").unwrap(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, XsdError::NotASchema { found, .. } if found == "schema"));
    }
}
