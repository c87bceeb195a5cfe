use super::xstypes::Sequence;
use roxmltree::Node;

/// The `<annotation>` children of a declaration.
///
/// Note: Instead of storing the actual Element information items (i.e. nodes), this type stores
/// a textual rendering of the respective elements, which is what an emitter turns into doc
/// comments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Annotation {
    pub app_info: Sequence<String>,
    pub documentation: Sequence<String>,
}

impl Annotation {
    pub const TAG_NAME: &'static str = "annotation";

    /// Generate a textual representation of the content of an annotation.
    /// This is not meant to be the exact source or even efficient; it should however be able to
    /// parse back into similar XML.
    fn content_to_text(node: Node) -> String {
        let mut text = String::new();
        for child in node.children() {
            match child.node_type() {
                roxmltree::NodeType::Text => text.push_str(child.text().unwrap_or_default()),
                roxmltree::NodeType::Element => {
                    let tag_name = child.tag_name().name();
                    text.push_str(&format!(
                        "<{tag_name}>{}</{tag_name}>",
                        Self::content_to_text(child)
                    ));
                }
                _ => {}
            }
        }
        text.trim().to_string()
    }

    pub(super) fn map_from_xml(annotation: Node) -> Self {
        // {application information}
        //   A sequence of the <appinfo> element information items from among the [children], in
        //   order, if any, otherwise the empty sequence.
        let app_info = annotation
            .children()
            .filter(|child| child.tag_name().name() == "appinfo")
            .map(Self::content_to_text)
            .collect();

        // {user information}
        //   A sequence of the <documentation> element information items from among the [children],
        //   in order, if any, otherwise the empty sequence.
        let documentation = annotation
            .children()
            .filter(|child| child.tag_name().name() == "documentation")
            .map(Self::content_to_text)
            .collect();

        Self {
            app_info,
            documentation,
        }
    }

    /// The annotation of `e`, merging every `<annotation>` child. `None` if there is none.
    pub(super) fn of(e: Node) -> Option<Self> {
        let mut merged: Option<Self> = None;
        for child in e
            .children()
            .filter(|c| c.tag_name().name() == Self::TAG_NAME)
        {
            let annotation = Self::map_from_xml(child);
            match merged.as_mut() {
                Some(m) => {
                    m.app_info.extend(annotation.app_info);
                    m.documentation.extend(annotation.documentation);
                }
                None => merged = Some(annotation),
            }
        }
        merged
    }
}
