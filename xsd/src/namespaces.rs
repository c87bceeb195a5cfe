use std::collections::HashMap;

use super::{
    error::XsdError,
    xstypes::{split_prefix, AnyURI, QName, XML_NAMESPACE, XSD_NAMESPACE},
};

/// An attribute of the root element exactly as written, namespace declarations included.
///
/// `xmlns:p="…"` is stored with `prefix = Some("xmlns")` and `local_name = "p"`; the default
/// namespace declaration `xmlns="…"` with no prefix and `local_name = "xmlns"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAttribute {
    pub prefix: Option<String>,
    pub local_name: String,
    pub value: String,
}

impl RawAttribute {
    pub fn new(prefix: Option<&str>, local_name: &str, value: &str) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            local_name: local_name.to_string(),
            value: value.to_string(),
        }
    }
}

/// How a bare (unprefixed) name is placed into a namespace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NameMode {
    /// A reference such as `type="…"` or `ref="…"`: the default namespace if one is declared,
    /// otherwise no namespace.
    Reference,
    /// The name of something declared by the schema itself: its target namespace.
    Declaration,
}

/// The result of resolving a lexical QName in the context of one schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedName {
    pub qname: QName,
    /// The prefix used, when it denotes a namespace other than the schema's target namespace.
    pub import_prefix: Option<String>,
}

/// The prefix → namespace URI bindings in scope on a schema's root element.
#[derive(Clone, Debug, Default)]
pub struct Namespaces {
    bindings: HashMap<String, AnyURI>,
    /// The prefix bound to the XSD namespace itself, if any.
    pub xsd_prefix: Option<String>,
    /// The prefix bound to the schema's own target namespace, if any.
    pub own_prefix: Option<String>,
}

impl Namespaces {
    /// Collects the namespace declarations among `attributes` and identifies the XSD and own
    /// prefixes. When several prefixes are bound to the same namespace the first one written
    /// wins.
    pub fn from_root_attributes(attributes: &[RawAttribute], target_namespace: Option<&str>) -> Self {
        let mut namespaces = Self::default();
        let mut declared = Vec::new();

        for attribute in attributes {
            let prefix = match (attribute.prefix.as_deref(), attribute.local_name.as_str()) {
                (Some("xmlns"), prefix) => prefix,
                (None, "xmlns") => "",
                _ => continue,
            };
            namespaces
                .bindings
                .insert(prefix.to_string(), attribute.value.clone());
            declared.push((prefix, attribute.value.as_str()));
        }

        for (prefix, uri) in declared {
            if uri == XSD_NAMESPACE && namespaces.xsd_prefix.is_none() {
                namespaces.xsd_prefix = Some(prefix.to_string());
            }
            if Some(uri) == target_namespace && namespaces.own_prefix.is_none() {
                namespaces.own_prefix = Some(prefix.to_string());
            }
        }

        namespaces
            .bindings
            .entry("xml".to_string())
            .or_insert_with(|| XML_NAMESPACE.to_string());

        namespaces
    }

    /// The namespace bound to `prefix`; the empty prefix denotes the default namespace.
    pub fn lookup(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .get(prefix)
            .map(String::as_str)
            .filter(|uri| !uri.is_empty())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bindings, sorted by prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut bindings: Vec<_> = self
            .bindings
            .iter()
            .map(|(p, u)| (p.as_str(), u.as_str()))
            .collect();
        bindings.sort();
        bindings.into_iter()
    }

    /// Resolves the lexical QName `name` as written in a schema with these bindings and the
    /// given target namespace.
    pub fn resolve_qname(
        &self,
        name: &str,
        mode: NameMode,
        target_namespace: Option<&str>,
    ) -> Result<ResolvedName, XsdError> {
        let (prefix, local_name) = split_prefix(name.trim());
        match prefix {
            Some(prefix) => {
                let namespace = self
                    .lookup(prefix)
                    .ok_or_else(|| XsdError::NamePrefixNotResolved(prefix.to_string()))?;
                let import_prefix =
                    (Some(namespace) != target_namespace).then(|| prefix.to_string());
                Ok(ResolvedName {
                    qname: QName::with_namespace(namespace, local_name),
                    import_prefix,
                })
            }
            None => {
                let namespace = match mode {
                    NameMode::Reference => self.lookup(""),
                    NameMode::Declaration => target_namespace,
                };
                Ok(ResolvedName {
                    qname: QName::with_optional_namespace(namespace, local_name),
                    import_prefix: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespaces(attributes: &[(Option<&str>, &str, &str)], tns: Option<&str>) -> Namespaces {
        let attributes: Vec<_> = attributes
            .iter()
            .map(|(p, l, v)| RawAttribute::new(*p, l, v))
            .collect();
        Namespaces::from_root_attributes(&attributes, tns)
    }

    #[test]
    fn identifies_xsd_and_own_prefix() {
        let ns = namespaces(
            &[
                (Some("xmlns"), "xs", XSD_NAMESPACE),
                (Some("xmlns"), "tns", "urn:a"),
                (None, "targetNamespace", "urn:a"),
            ],
            Some("urn:a"),
        );
        assert_eq!(ns.xsd_prefix.as_deref(), Some("xs"));
        assert_eq!(ns.own_prefix.as_deref(), Some("tns"));
        assert_eq!(ns.lookup("tns"), Some("urn:a"));
        assert_eq!(ns.lookup("targetNamespace"), None);
        assert_eq!(
            ns.iter().collect::<Vec<_>>(),
            [("tns", "urn:a"), ("xml", XML_NAMESPACE), ("xs", XSD_NAMESPACE)]
        );
    }

    #[test]
    fn default_namespace_is_empty_prefix() {
        let ns = namespaces(&[(None, "xmlns", "urn:a")], Some("urn:a"));
        assert_eq!(ns.lookup(""), Some("urn:a"));
        assert_eq!(ns.own_prefix.as_deref(), Some(""));
        assert_eq!(ns.xsd_prefix, None);
    }

    #[test]
    fn xml_prefix_is_implicit() {
        let ns = namespaces(&[], None);
        assert_eq!(ns.lookup("xml"), Some(XML_NAMESPACE));
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn first_declared_prefix_wins() {
        let ns = namespaces(
            &[
                (Some("xmlns"), "b", XSD_NAMESPACE),
                (Some("xmlns"), "a", XSD_NAMESPACE),
            ],
            None,
        );
        assert_eq!(ns.xsd_prefix.as_deref(), Some("b"));
    }

    #[test]
    fn bare_names_depend_on_mode() {
        let ns = namespaces(&[(Some("xmlns"), "tns", "urn:a")], Some("urn:a"));
        let reference = ns.resolve_qname("Foo", NameMode::Reference, Some("urn:a")).unwrap();
        assert_eq!(reference.qname, QName::unqualified("Foo"));
        let declaration = ns
            .resolve_qname("Foo", NameMode::Declaration, Some("urn:a"))
            .unwrap();
        assert_eq!(declaration.qname, QName::with_namespace("urn:a", "Foo"));
    }

    #[test]
    fn prefixed_names_report_import_prefix() {
        let ns = namespaces(
            &[
                (Some("xmlns"), "tns", "urn:a"),
                (Some("xmlns"), "b", "urn:b"),
            ],
            Some("urn:a"),
        );
        let own = ns.resolve_qname("tns:Foo", NameMode::Reference, Some("urn:a")).unwrap();
        assert_eq!(own.import_prefix, None);
        let imported = ns.resolve_qname("b:Bar", NameMode::Reference, Some("urn:a")).unwrap();
        assert_eq!(imported.qname.key(), "{urn:b}Bar");
        assert_eq!(imported.import_prefix.as_deref(), Some("b"));
    }

    #[test]
    fn unknown_prefix_is_an_error() {
        let ns = namespaces(&[], None);
        assert!(matches!(
            ns.resolve_qname("nope:Foo", NameMode::Reference, None),
            Err(XsdError::NamePrefixNotResolved(p)) if p == "nope"
        ));
    }
}
