use super::{
    annotation::Annotation,
    error::XsdError,
    shared::{child_named, Form, ValueConstraint},
    simple_type_def::SimpleTypeDefinition,
    values::{invalid, string_value},
    xstypes::NCName,
};
use roxmltree::Node;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AttributeUse {
    #[default]
    Optional,
    Required,
    Prohibited,
}

/// An `<attribute>`, top-level or local.
#[derive(Clone, Debug)]
pub struct AttributeDeclaration {
    pub annotation: Option<Annotation>,
    pub name: Option<NCName>,
    pub ref_: Option<String>,
    pub type_name: Option<String>,
    pub use_: AttributeUse,
    pub value_constraint: Option<ValueConstraint>,
    pub form: Option<Form>,
    pub simple_type: Option<SimpleTypeDefinition>,
}

impl AttributeDeclaration {
    pub const TAG_NAME: &'static str = "attribute";

    pub(super) fn map_from_xml(attribute: Node) -> Result<Self, XsdError> {
        let use_ = match attribute.attribute("use").map(str::trim) {
            None | Some("optional") => AttributeUse::Optional,
            Some("required") => AttributeUse::Required,
            Some("prohibited") => AttributeUse::Prohibited,
            Some(other) => return Err(invalid("use", other)),
        };

        Ok(Self {
            annotation: Annotation::of(attribute),
            name: string_value(attribute, "name"),
            ref_: string_value(attribute, "ref"),
            type_name: string_value(attribute, "type"),
            use_,
            value_constraint: ValueConstraint::from_xml(attribute)?,
            form: Form::from_xml(attribute, "form")?,
            simple_type: child_named(attribute, SimpleTypeDefinition::TAG_NAME)
                .map(SimpleTypeDefinition::map_from_xml)
                .transpose()?,
        })
    }
}
