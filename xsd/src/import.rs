use roxmltree::Node;

use super::{
    annotation::Annotation, attribute_group_def::AttributeGroupDefinition,
    complex_type_def::ComplexTypeDefinition, error::XsdError,
    model_group_def::ModelGroupDefinition, shared::children_named,
    simple_type_def::SimpleTypeDefinition, values::string_value, xstypes::Sequence,
};

/// This structure represents the `include` element; it is not a schema component.
#[derive(Clone, Debug)]
pub struct Include {
    pub schema_location: String,
}

/// This structure represents the `import` element; it is not a schema component.
///
/// Note that an import is allowed to have neither a `schemaLocation` nor a `namespace` attribute.
#[derive(Clone, Debug)]
pub struct Import {
    pub namespace: Option<String>,
    pub schema_location: Option<String>,
}

/// This structure represents the `redefine` element. The redefined components are kept as
/// written; they do not replace the components of the redefined schema.
#[derive(Clone, Debug)]
pub struct Redefine {
    pub schema_location: String,
    pub annotation: Option<Annotation>,
    pub simple_types: Sequence<SimpleTypeDefinition>,
    pub complex_types: Sequence<ComplexTypeDefinition>,
    pub groups: Sequence<ModelGroupDefinition>,
    pub attribute_groups: Sequence<AttributeGroupDefinition>,
}

/// A composition directive, in the order it appears in the schema document.
#[derive(Clone, Debug)]
pub enum Directive {
    Include(Include),
    Import(Import),
    Redefine(Redefine),
}

impl Directive {
    pub const INCLUDE_TAG_NAME: &'static str = "include";
    pub const IMPORT_TAG_NAME: &'static str = "import";
    pub const REDEFINE_TAG_NAME: &'static str = "redefine";

    pub(super) fn map_from_xml(directive: Node) -> Result<Option<Self>, XsdError> {
        let location = string_value(directive, "schemaLocation");
        let directive = match directive.tag_name().name() {
            Self::INCLUDE_TAG_NAME => Self::Include(Include {
                schema_location: location.unwrap_or_default(),
            }),
            Self::IMPORT_TAG_NAME => Self::Import(Import {
                namespace: string_value(directive, "namespace"),
                schema_location: location,
            }),
            Self::REDEFINE_TAG_NAME => Self::Redefine(Redefine {
                schema_location: location.unwrap_or_default(),
                annotation: Annotation::of(directive),
                simple_types: children_named(directive, SimpleTypeDefinition::TAG_NAME)
                    .map(SimpleTypeDefinition::map_from_xml)
                    .collect::<Result<_, _>>()?,
                complex_types: children_named(directive, ComplexTypeDefinition::TAG_NAME)
                    .map(ComplexTypeDefinition::map_from_xml)
                    .collect::<Result<_, _>>()?,
                groups: children_named(directive, ModelGroupDefinition::TAG_NAME)
                    .map(ModelGroupDefinition::map_from_xml)
                    .collect::<Result<_, _>>()?,
                attribute_groups: children_named(directive, AttributeGroupDefinition::TAG_NAME)
                    .map(AttributeGroupDefinition::map_from_xml)
                    .collect::<Result<_, _>>()?,
            }),
            _ => return Ok(None),
        };
        Ok(Some(directive))
    }

    /// The location to follow, if there is one to follow at all.
    pub fn schema_location(&self) -> Option<&str> {
        let location = match self {
            Self::Include(include) => Some(include.schema_location.as_str()),
            Self::Import(import) => import.schema_location.as_deref(),
            Self::Redefine(redefine) => Some(redefine.schema_location.as_str()),
        };
        location.filter(|l| !l.is_empty())
    }
}
