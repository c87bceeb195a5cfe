use super::{
    element_decl::ElementDeclaration, error::XsdError, model_group::ModelGroup,
    model_group_def::ModelGroupDefinition, values::actual_value,
};
use roxmltree::Node;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MaxOccurs {
    Unbounded,
    Count(u64),
}

/// `minOccurs`/`maxOccurs` of a particle; both default to 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Occurs {
    pub min: u64,
    pub max: MaxOccurs,
}

impl Default for Occurs {
    fn default() -> Self {
        Self {
            min: 1,
            max: MaxOccurs::Count(1),
        }
    }
}

impl Occurs {
    pub(super) fn from_xml(node: Node) -> Result<Self, XsdError> {
        let min = actual_value::<u64>(node, "minOccurs")?.unwrap_or(1);
        let max = match node.attribute("maxOccurs").map(str::trim) {
            None => MaxOccurs::Count(1),
            Some("unbounded") => MaxOccurs::Unbounded,
            Some(_) => MaxOccurs::Count(actual_value::<u64>(node, "maxOccurs")?.unwrap_or(1)),
        };
        Ok(Self { min, max })
    }

    pub fn is_optional(&self) -> bool {
        self.min == 0
    }

    pub fn is_repeated(&self) -> bool {
        !matches!(self.max, MaxOccurs::Count(0 | 1))
    }
}

/// One entry of a content model.
#[derive(Clone, Debug)]
pub enum Particle {
    Element(ElementDeclaration),
    Group(ModelGroupDefinition),
    ModelGroup(ModelGroup),
    Any { namespace: Option<String>, occurs: Occurs },
}

impl Particle {
    /// Maps a content model child; `None` for children that are not particles (annotations).
    pub(super) fn map_from_xml(node: Node) -> Result<Option<Self>, XsdError> {
        let particle = match node.tag_name().name() {
            ElementDeclaration::TAG_NAME => Self::Element(ElementDeclaration::map_from_xml(node)?),
            ModelGroupDefinition::TAG_NAME => {
                Self::Group(ModelGroupDefinition::map_from_xml(node)?)
            }
            "all" | "choice" | "sequence" => Self::ModelGroup(ModelGroup::map_from_xml(node)?),
            "any" => Self::Any {
                namespace: node.attribute("namespace").map(str::to_string),
                occurs: Occurs::from_xml(node)?,
            },
            _ => return Ok(None),
        };
        Ok(Some(particle))
    }
}
