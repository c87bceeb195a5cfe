use std::fmt;

pub type NCName = String;
pub type AnyURI = String;

pub type Sequence<T> = Vec<T>;

pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// An expanded name: a local name paired with an optional namespace URI.
///
/// Two names written with different prefixes compare equal as long as the prefixes were bound
/// to the same namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    pub namespace_name: Option<AnyURI>,
    pub local_name: NCName,
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace_name) = self.namespace_name.as_ref() {
            write!(f, "{{{}}}{}", namespace_name, self.local_name)
        } else {
            write!(f, "{}", self.local_name)
        }
    }
}

impl QName {
    pub fn with_namespace(
        namespace_name: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self::with_optional_namespace(Some(namespace_name), local_name)
    }

    pub fn with_optional_namespace(
        namespace_name: Option<impl Into<String>>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace_name: namespace_name.map(Into::into),
            local_name: local_name.into(),
        }
    }

    pub fn unqualified(local_name: impl Into<String>) -> Self {
        Self {
            namespace_name: None,
            local_name: local_name.into(),
        }
    }

    /// The canonical key of this name, in Clark notation (`{namespace}local`).
    pub fn key(&self) -> String {
        self.to_string()
    }
}

/// Splits a lexical QName into its optional prefix and local part.
pub fn split_prefix(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

/// The local part of a lexical QName.
pub fn local_part(name: &str) -> &str {
    split_prefix(name).1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_uses_clark_notation() {
        assert_eq!(QName::with_namespace("urn:a", "Foo").key(), "{urn:a}Foo");
        assert_eq!(QName::unqualified("Foo").key(), "Foo");
    }

    #[test]
    fn split_prefix_handles_bare_names() {
        assert_eq!(split_prefix("tns:Foo"), (Some("tns"), "Foo"));
        assert_eq!(split_prefix("Foo"), (None, "Foo"));
        assert_eq!(local_part("x:Base"), "Base");
    }
}
