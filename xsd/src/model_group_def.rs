use super::{
    annotation::Annotation, error::XsdError, model_group::ModelGroup, particle::Occurs,
    values::string_value, xstypes::NCName,
};
use roxmltree::Node;

/// A named `<group>` definition, or a `<group ref="…">` inside a content model.
#[derive(Clone, Debug)]
pub struct ModelGroupDefinition {
    pub annotation: Option<Annotation>,
    pub name: Option<NCName>,
    pub ref_: Option<String>,
    pub occurs: Occurs,
    pub content: Option<ModelGroup>,
}

impl ModelGroupDefinition {
    pub const TAG_NAME: &'static str = "group";

    pub(super) fn map_from_xml(group: Node) -> Result<Self, XsdError> {
        Ok(Self {
            annotation: Annotation::of(group),
            name: string_value(group, "name"),
            ref_: string_value(group, "ref"),
            occurs: Occurs::from_xml(group)?,
            content: ModelGroup::first_in(group)?,
        })
    }
}
