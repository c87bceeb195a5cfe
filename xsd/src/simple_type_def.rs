use super::{
    annotation::Annotation,
    error::XsdError,
    shared::{child_named, children_named},
    values::{actual_value, string_value},
    xstypes::{NCName, Sequence},
};
use roxmltree::Node;

#[derive(Clone, Debug)]
pub enum Variety {
    Restriction {
        base: Option<String>,
        enumeration: Sequence<String>,
    },
    List {
        item_type: Option<String>,
    },
    Union {
        member_types: Sequence<String>,
    },
}

/// A `<simpleType>`, top-level or anonymous. Facets other than enumerations are not kept.
#[derive(Clone, Debug)]
pub struct SimpleTypeDefinition {
    pub annotation: Option<Annotation>,
    pub name: Option<NCName>,
    pub variety: Variety,
}

impl SimpleTypeDefinition {
    pub const TAG_NAME: &'static str = "simpleType";

    pub(super) fn map_from_xml(simple_type: Node) -> Result<Self, XsdError> {
        let variety = if let Some(list) = child_named(simple_type, "list") {
            Variety::List {
                item_type: string_value(list, "itemType"),
            }
        } else if let Some(union) = child_named(simple_type, "union") {
            Variety::Union {
                member_types: actual_value(union, "memberTypes")?.unwrap_or_default(),
            }
        } else {
            let restriction = child_named(simple_type, "restriction");
            Variety::Restriction {
                base: restriction.and_then(|r| string_value(r, "base")),
                enumeration: restriction
                    .map(|r| {
                        children_named(r, "enumeration")
                            .filter_map(|e| e.attribute("value").map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default(),
            }
        };

        Ok(Self {
            annotation: Annotation::of(simple_type),
            name: string_value(simple_type, "name"),
            variety,
        })
    }
}
