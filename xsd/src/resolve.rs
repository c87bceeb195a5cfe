use log::trace;

use super::{
    cache::{SchemaCache, SchemaRef},
    complex_type_def::ComplexTypeDefinition,
    element_decl::ElementDeclaration,
    namespaces::NameMode,
    schema::Schema,
    xstypes::{local_part, QName},
};

/// A declaration together with the schema that declares it.
#[derive(Debug)]
pub struct Located<'a, T> {
    pub schema: SchemaRef,
    pub declaration: &'a T,
}

impl<T> Clone for Located<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Located<'_, T> {}

/// Something that can be looked up by name among a schema's top-level declarations.
pub trait GlobalDeclaration: Sized {
    /// The top-level declarations of this kind in `schema`.
    fn globals(schema: &Schema) -> &[Self];
    /// The declared name; `None` for references and anonymous declarations.
    fn declared_name(&self) -> Option<&str>;
}

macro_rules! impl_global_declaration {
    ($field_name:ident: $value_type:ty) => {
        impl GlobalDeclaration for $value_type {
            fn globals(schema: &Schema) -> &[Self] {
                &schema.$field_name
            }

            fn declared_name(&self) -> Option<&str> {
                self.name.as_deref()
            }
        }
    };
}

impl_global_declaration!(complex_types: ComplexTypeDefinition);
impl_global_declaration!(elements: ElementDeclaration);
impl_global_declaration!(simple_types: crate::SimpleTypeDefinition);
impl_global_declaration!(attribute_groups: crate::AttributeGroupDefinition);
impl_global_declaration!(groups: crate::ModelGroupDefinition);
impl_global_declaration!(attributes: crate::AttributeDeclaration);

impl SchemaCache {
    /// Searches `from` and then, depth-first and in document order, everything it includes for
    /// a top-level declaration whose identity is `name`. The first match wins.
    pub fn find_global<T: GlobalDeclaration>(
        &self,
        from: SchemaRef,
        name: &QName,
    ) -> Option<Located<'_, T>> {
        let schema = self.try_get(from)?;
        let found = T::globals(schema).iter().find(|declaration| {
            declaration
                .declared_name()
                .is_some_and(|local| schema.qname(local) == *name)
        });
        if let Some(declaration) = found {
            trace!("found {name} in {}", schema.load_uri);
            return Some(Located {
                schema: from,
                declaration,
            });
        }
        schema
            .includes
            .iter()
            .find_map(|&include| self.find_global(include, name))
    }

    pub fn global_complex_type(
        &self,
        from: SchemaRef,
        name: &QName,
    ) -> Option<Located<'_, ComplexTypeDefinition>> {
        self.find_global(from, name)
    }

    pub fn global_element(
        &self,
        from: SchemaRef,
        name: &QName,
    ) -> Option<Located<'_, ElementDeclaration>> {
        self.find_global(from, name)
    }

    /// The identity of `element` as declared in `schema`: its name in the schema's target
    /// namespace, or what its `ref` resolves to. `None` if neither is usable.
    pub fn element_qname(&self, schema: SchemaRef, element: &ElementDeclaration) -> Option<QName> {
        let schema = self.try_get(schema)?;
        if let Some(name) = element.name.as_deref() {
            return Some(schema.qname(name));
        }
        let reference = element.ref_.as_deref()?;
        schema
            .resolve_qname(reference, NameMode::Reference)
            .map(|resolved| resolved.qname)
            .ok()
    }

    /// Every top-level element in `from` and the schemas it includes whose `substitutionGroup`
    /// names `head`, in traversal order. The head itself is never a member, and members of
    /// members are not followed.
    pub fn substitution_members(
        &self,
        from: SchemaRef,
        head: &QName,
    ) -> Vec<Located<'_, ElementDeclaration>> {
        let mut members = Vec::new();
        self.collect_substitution_members(from, head, &mut members);
        members
    }

    /// Like [`SchemaCache::substitution_members()`], with the head given as a declaration in
    /// `head_schema`.
    pub fn substitution_members_of(
        &self,
        from: SchemaRef,
        head_schema: SchemaRef,
        head: &ElementDeclaration,
    ) -> Vec<Located<'_, ElementDeclaration>> {
        match self.element_qname(head_schema, head) {
            Some(head) => self.substitution_members(from, &head),
            None => Vec::new(),
        }
    }

    fn collect_substitution_members<'a>(
        &'a self,
        from: SchemaRef,
        head: &QName,
        members: &mut Vec<Located<'a, ElementDeclaration>>,
    ) {
        let Some(schema) = self.try_get(from) else {
            return;
        };
        for element in &schema.elements {
            let is_head = self.element_qname(from, element).as_ref() == Some(head);
            if !is_head && substitutes_for(schema, element, head) {
                members.push(Located {
                    schema: from,
                    declaration: element,
                });
            }
        }
        for &include in &schema.includes {
            self.collect_substitution_members(include, head, members);
        }
    }

    /// Follows parent links up to the schema the graph was loaded from.
    pub fn root_schema(&self, schema: SchemaRef) -> SchemaRef {
        let mut current = schema;
        while let Some(parent) = self.try_get(current).and_then(|s| s.parent) {
            if self.try_get(parent).is_none() {
                break;
            }
            current = parent;
        }
        current
    }

    /// `from` followed by everything it includes, depth-first in document order. A schema
    /// reachable along several paths is listed once per path.
    pub fn all_schemas(&self, from: SchemaRef) -> Vec<SchemaRef> {
        let mut schemas = vec![from];
        if let Some(schema) = self.try_get(from) {
            for &include in &schema.includes {
                schemas.extend(self.all_schemas(include));
            }
        }
        schemas
    }
}

/// Whether `member`, declared in `schema`, names `head` as its substitution group head.
///
/// Local names must agree. When the member's prefix can be resolved in its own schema the
/// namespace must agree as well; an unbound prefix only compares the local name.
fn substitutes_for(schema: &Schema, member: &ElementDeclaration, head: &QName) -> bool {
    let Some(group) = member.substitution_group.as_deref() else {
        return false;
    };
    if local_part(group) != head.local_name {
        return false;
    }
    match schema.resolve_qname(group, NameMode::Reference) {
        Ok(resolved) => resolved.qname.namespace_name == head.namespace_name,
        Err(_) => true,
    }
}
