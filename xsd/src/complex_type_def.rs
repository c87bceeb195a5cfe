use super::{
    annotation::Annotation,
    attribute_decl::AttributeDeclaration,
    attribute_group_def::AttributeGroupDefinition,
    element_decl::ElementDeclaration,
    error::XsdError,
    model_group::ModelGroup,
    shared::{child_named, children_named},
    values::{flag, string_value},
    xstypes::{NCName, Sequence},
};
use roxmltree::Node;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DerivationMethod {
    Extension,
    Restriction,
}

/// The `<extension>`/`<restriction>` inside `<complexContent>` or `<simpleContent>`.
#[derive(Clone, Debug)]
pub struct Derivation {
    pub method: DerivationMethod,
    pub base: Option<String>,
    pub simple_content: bool,
}

/// A `<complexType>`, top-level or anonymous.
///
/// Derived content is folded into the same shape as plain content: the particles and attributes
/// of the `<extension>`/`<restriction>` end up in `content`, `attributes` and `attribute_groups`.
#[derive(Clone, Debug)]
pub struct ComplexTypeDefinition {
    pub annotation: Option<Annotation>,
    pub name: Option<NCName>,
    pub abstract_: bool,
    pub mixed: bool,
    pub derivation: Option<Derivation>,
    pub content: Option<ModelGroup>,
    pub attributes: Sequence<AttributeDeclaration>,
    pub attribute_groups: Sequence<AttributeGroupDefinition>,
    pub any_attribute: bool,
}

impl ComplexTypeDefinition {
    pub const TAG_NAME: &'static str = "complexType";

    pub(super) fn map_from_xml(complex_type: Node) -> Result<Self, XsdError> {
        let mut mixed = flag(complex_type, "mixed", false)?;

        let content_node = child_named(complex_type, "complexContent")
            .map(|c| (c, false))
            .or_else(|| child_named(complex_type, "simpleContent").map(|c| (c, true)));

        let (derivation, body) = match content_node {
            Some((content, simple_content)) => {
                mixed = flag(content, "mixed", mixed)?;
                let derived = child_named(content, "extension")
                    .map(|d| (d, DerivationMethod::Extension))
                    .or_else(|| {
                        child_named(content, "restriction")
                            .map(|d| (d, DerivationMethod::Restriction))
                    });
                match derived {
                    Some((node, method)) => (
                        Some(Derivation {
                            method,
                            base: string_value(node, "base"),
                            simple_content,
                        }),
                        node,
                    ),
                    None => (None, content),
                }
            }
            None => (None, complex_type),
        };

        Ok(Self {
            annotation: Annotation::of(complex_type),
            name: string_value(complex_type, "name"),
            abstract_: flag(complex_type, "abstract", false)?,
            mixed,
            derivation,
            content: ModelGroup::first_in(body)?,
            attributes: children_named(body, AttributeDeclaration::TAG_NAME)
                .map(AttributeDeclaration::map_from_xml)
                .collect::<Result<_, _>>()?,
            attribute_groups: children_named(body, AttributeGroupDefinition::TAG_NAME)
                .map(AttributeGroupDefinition::map_from_xml)
                .collect::<Result<_, _>>()?,
            any_attribute: child_named(body, "anyAttribute").is_some(),
        })
    }

    /// Local element declarations of the content model, flattened in document order.
    pub fn elements(&self) -> Vec<&ElementDeclaration> {
        self.content
            .as_ref()
            .map(ModelGroup::elements)
            .unwrap_or_default()
    }
}
