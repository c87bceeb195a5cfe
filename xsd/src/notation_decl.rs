use super::{
    annotation::Annotation,
    error::XsdError,
    values::{invalid, string_value},
    xstypes::NCName,
};
use roxmltree::Node;

/// A top-level `<notation>`.
#[derive(Clone, Debug)]
pub struct NotationDeclaration {
    pub annotation: Option<Annotation>,
    pub name: NCName,
    pub public_identifier: Option<String>,
    pub system_identifier: Option<String>,
}

impl NotationDeclaration {
    pub const TAG_NAME: &'static str = "notation";

    pub(super) fn map_from_xml(notation: Node) -> Result<Self, XsdError> {
        // {name} The ·actual value· of the name [attribute]
        let name = string_value(notation, "name").ok_or_else(|| invalid("name", ""))?;

        Ok(Self {
            annotation: Annotation::of(notation),
            name,
            // {public identifier}
            //   The ·actual value· of the public [attribute], if present, otherwise ·absent·.
            public_identifier: string_value(notation, "public"),
            // {system identifier}
            //   The ·actual value· of the system [attribute], if present, otherwise ·absent·.
            system_identifier: string_value(notation, "system"),
        })
    }
}
