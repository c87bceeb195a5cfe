use super::{
    annotation::Annotation,
    attribute_decl::AttributeDeclaration,
    error::XsdError,
    shared::{child_named, children_named},
    values::string_value,
    xstypes::{NCName, Sequence},
};
use roxmltree::Node;

/// An `<attributeGroup>` definition, or a reference to one from a type or another group.
#[derive(Clone, Debug)]
pub struct AttributeGroupDefinition {
    pub annotation: Option<Annotation>,
    pub name: Option<NCName>,
    pub ref_: Option<String>,
    pub attributes: Sequence<AttributeDeclaration>,
    pub attribute_groups: Sequence<AttributeGroupDefinition>,
    pub any_attribute: bool,
}

impl AttributeGroupDefinition {
    pub const TAG_NAME: &'static str = "attributeGroup";

    pub(super) fn map_from_xml(attribute_group: Node) -> Result<Self, XsdError> {
        Ok(Self {
            annotation: Annotation::of(attribute_group),
            name: string_value(attribute_group, "name"),
            ref_: string_value(attribute_group, "ref"),
            attributes: children_named(attribute_group, AttributeDeclaration::TAG_NAME)
                .map(AttributeDeclaration::map_from_xml)
                .collect::<Result<_, _>>()?,
            attribute_groups: children_named(attribute_group, Self::TAG_NAME)
                .map(Self::map_from_xml)
                .collect::<Result<_, _>>()?,
            any_attribute: child_named(attribute_group, "anyAttribute").is_some(),
        })
    }
}
