use roxmltree::Node;

use super::error::XsdError;

pub trait ActualValue: Sized {
    fn convert(attribute: &'static str, src: &str) -> Result<Self, XsdError>;
}

impl ActualValue for String {
    fn convert(_attribute: &'static str, src: &str) -> Result<Self, XsdError> {
        Ok(src.to_string())
    }
}

impl ActualValue for bool {
    fn convert(attribute: &'static str, src: &str) -> Result<Self, XsdError> {
        match src {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid(attribute, src)),
        }
    }
}

impl ActualValue for u64 {
    fn convert(attribute: &'static str, src: &str) -> Result<Self, XsdError> {
        src.parse().map_err(|_| invalid(attribute, src))
    }
}

impl<T: ActualValue> ActualValue for Vec<T> {
    fn convert(attribute: &'static str, src: &str) -> Result<Self, XsdError> {
        // NOTE: This assumes a list with whiteSpace="collapse"
        src.split_ascii_whitespace()
            .map(|item| T::convert(attribute, item))
            .collect()
    }
}

pub(crate) fn invalid(attribute: &'static str, src: &str) -> XsdError {
    XsdError::InvalidValue {
        attribute,
        value: src.to_string(),
    }
}

/// The ·actual value· of `attribute` on `node`, if present.
pub fn actual_value<T: ActualValue>(node: Node, attribute: &'static str) -> Result<Option<T>, XsdError> {
    node.attribute(attribute)
        .map(|v| T::convert(attribute, v.trim()))
        .transpose()
}

/// Shorthand for string-valued attributes, which cannot fail to convert.
pub fn string_value(node: Node, attribute: &str) -> Option<String> {
    node.attribute(attribute).map(|v| v.trim().to_string())
}

/// Shorthand for boolean attributes with a default.
pub fn flag(node: Node, attribute: &'static str, default: bool) -> Result<bool, XsdError> {
    Ok(actual_value(node, attribute)?.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_accept_lexical_forms() {
        let doc = roxmltree::Document::parse(r#"<e a="1" b="false" c="yes"/>"#).unwrap();
        let e = doc.root_element();
        assert_eq!(actual_value::<bool>(e, "a").unwrap(), Some(true));
        assert_eq!(actual_value::<bool>(e, "b").unwrap(), Some(false));
        assert!(matches!(
            actual_value::<bool>(e, "c"),
            Err(XsdError::InvalidValue { attribute: "c", .. })
        ));
        assert_eq!(actual_value::<bool>(e, "d").unwrap(), None);
    }

    #[test]
    fn lists_split_on_whitespace() {
        let doc = roxmltree::Document::parse(r#"<e l=" a  b
c "/>"#)
        .unwrap();
        let l: Vec<String> = actual_value(doc.root_element(), "l").unwrap().unwrap();
        assert_eq!(l, ["a", "b", "c"]);
    }
}
