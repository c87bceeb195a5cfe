use super::{
    annotation::Annotation,
    complex_type_def::ComplexTypeDefinition,
    error::XsdError,
    particle::Occurs,
    shared::{child_named, Form, ValueConstraint},
    simple_type_def::SimpleTypeDefinition,
    values::{flag, string_value},
    xstypes::NCName,
};
use roxmltree::Node;

/// An `<element>`, either a top-level declaration or a local one inside a content model.
///
/// Exactly one of `name` and `ref_` is set for well-formed schemas; both are kept as written so
/// that references are resolved later in the lexical context of the declaring schema.
#[derive(Clone, Debug)]
pub struct ElementDeclaration {
    pub annotation: Option<Annotation>,
    pub name: Option<NCName>,
    pub ref_: Option<String>,
    pub type_name: Option<String>,
    pub substitution_group: Option<String>,
    pub abstract_: bool,
    pub nillable: bool,
    pub value_constraint: Option<ValueConstraint>,
    pub occurs: Occurs,
    pub form: Option<Form>,
    pub complex_type: Option<Box<ComplexTypeDefinition>>,
    pub simple_type: Option<Box<SimpleTypeDefinition>>,
}

impl ElementDeclaration {
    pub const TAG_NAME: &'static str = "element";

    pub(super) fn map_from_xml(element: Node) -> Result<Self, XsdError> {
        let complex_type = child_named(element, ComplexTypeDefinition::TAG_NAME)
            .map(ComplexTypeDefinition::map_from_xml)
            .transpose()?
            .map(Box::new);
        let simple_type = child_named(element, SimpleTypeDefinition::TAG_NAME)
            .map(SimpleTypeDefinition::map_from_xml)
            .transpose()?
            .map(Box::new);

        Ok(Self {
            annotation: Annotation::of(element),
            name: string_value(element, "name"),
            ref_: string_value(element, "ref"),
            type_name: string_value(element, "type"),
            substitution_group: string_value(element, "substitutionGroup"),
            abstract_: flag(element, "abstract", false)?,
            nillable: flag(element, "nillable", false)?,
            value_constraint: ValueConstraint::from_xml(element)?,
            occurs: Occurs::from_xml(element)?,
            form: Form::from_xml(element, "form")?,
            complex_type,
            simple_type,
        })
    }
}
