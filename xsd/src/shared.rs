use roxmltree::Node;

use super::{error::XsdError, values::invalid};

/// The `form` of a local element or attribute declaration, and the schema-wide
/// `elementFormDefault`/`attributeFormDefault` it falls back to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Form {
    Qualified,
    #[default]
    Unqualified,
}

impl Form {
    pub(super) fn from_xml(node: Node, attribute: &'static str) -> Result<Option<Self>, XsdError> {
        match node.attribute(attribute).map(str::trim) {
            None => Ok(None),
            Some("qualified") => Ok(Some(Self::Qualified)),
            Some("unqualified") => Ok(Some(Self::Unqualified)),
            Some(other) => Err(invalid(attribute, other)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueConstraintVariety {
    Default,
    Fixed,
}

/// Property Record: Value Constraint -- shared by element and attribute declarations
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueConstraint {
    pub variety: ValueConstraintVariety,
    pub lexical_form: String,
}

impl ValueConstraint {
    /// Maps the `default`/`fixed` attributes of `node`; both present is an error.
    pub(super) fn from_xml(node: Node) -> Result<Option<Self>, XsdError> {
        match (node.attribute("default"), node.attribute("fixed")) {
            (Some(_), Some(fixed)) => Err(invalid("fixed", fixed)),
            (Some(default), None) => Ok(Some(Self {
                variety: ValueConstraintVariety::Default,
                lexical_form: default.to_string(),
            })),
            (None, Some(fixed)) => Ok(Some(Self {
                variety: ValueConstraintVariety::Fixed,
                lexical_form: fixed.to_string(),
            })),
            (None, None) => Ok(None),
        }
    }
}

/// Element children of `node` with the given XSD tag name.
pub(super) fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag_name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |c| c.is_element() && c.tag_name().name() == tag_name)
}

/// The first element child of `node` with the given XSD tag name.
pub(super) fn child_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag_name: &'static str,
) -> Option<Node<'a, 'input>> {
    children_named(node, tag_name).next()
}
