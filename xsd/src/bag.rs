use log::{debug, trace};

use super::{
    attribute_decl::AttributeDeclaration,
    attribute_group_def::AttributeGroupDefinition,
    cache::{SchemaCache, SchemaRef},
    complex_type_def::ComplexTypeDefinition,
    element_decl::ElementDeclaration,
    model_group_def::ModelGroupDefinition,
    namespaces::{NameMode, ResolvedName},
    notation_decl::NotationDeclaration,
    resolve::{GlobalDeclaration, Located},
    simple_type_def::SimpleTypeDefinition,
    xstypes::Sequence,
};

/// The hand-over point to a code emitter: the schema currently being emitted, which is the
/// lexical context for names looked up through the bag, and the flattened global declarations
/// of a schema graph.
pub struct DeclarationBag<'c> {
    cache: &'c SchemaCache,
    pub schema: SchemaRef,

    pub attributes: Sequence<Located<'c, AttributeDeclaration>>,
    pub attribute_groups: Sequence<Located<'c, AttributeGroupDefinition>>,
    pub elements: Sequence<Located<'c, ElementDeclaration>>,
    pub groups: Sequence<Located<'c, ModelGroupDefinition>>,
    pub notations: Sequence<Located<'c, NotationDeclaration>>,
}

impl<'c> DeclarationBag<'c> {
    pub fn new(cache: &'c SchemaCache, schema: SchemaRef) -> Self {
        Self {
            cache,
            schema,
            attributes: Sequence::new(),
            attribute_groups: Sequence::new(),
            elements: Sequence::new(),
            groups: Sequence::new(),
            notations: Sequence::new(),
        }
    }

    /// A bag for the graph rooted at `root`, with its globals already collected.
    pub fn collected(cache: &'c SchemaCache, root: SchemaRef) -> Self {
        let mut bag = Self::new(cache, root);
        bag.collect_globals(root);
        bag
    }

    /// Appends the top-level attributes, attribute groups, elements, groups and notations of
    /// `from` and of every schema it includes, self before includes. Nothing is deduplicated.
    pub fn collect_globals(&mut self, from: SchemaRef) {
        let cache = self.cache;
        let Some(schema) = cache.try_get(from) else {
            return;
        };
        self.attributes.extend(locate(from, &schema.attributes));
        self.attribute_groups
            .extend(locate(from, &schema.attribute_groups));
        self.elements.extend(locate(from, &schema.elements));
        self.groups.extend(locate(from, &schema.groups));
        self.notations.extend(locate(from, &schema.notations));
        for &include in &schema.includes {
            self.collect_globals(include);
        }
    }

    /// Resolves `name` as written in the bag's current schema.
    pub fn resolve_qname(&self, name: &str, mode: NameMode) -> Option<ResolvedName> {
        let schema = self.cache.try_get(self.schema)?;
        match schema.resolve_qname(name, mode) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                debug!("{}: {e}", schema.load_uri);
                None
            }
        }
    }

    /// Looks up a global declaration named `name` (as written in the current schema), searching
    /// `from` first and then its includes in document order.
    pub fn global<T: GlobalDeclaration>(
        &self,
        from: SchemaRef,
        name: &str,
    ) -> Option<Located<'c, T>> {
        let query = self.resolve_qname(name, NameMode::Reference)?.qname;
        trace!("looking up {query}");
        self.cache.find_global(from, &query)
    }

    pub fn global_complex_type(
        &self,
        from: SchemaRef,
        name: &str,
    ) -> Option<Located<'c, ComplexTypeDefinition>> {
        self.global(from, name)
    }

    pub fn global_element(
        &self,
        from: SchemaRef,
        name: &str,
    ) -> Option<Located<'c, ElementDeclaration>> {
        self.global(from, name)
    }

    pub fn global_simple_type(
        &self,
        from: SchemaRef,
        name: &str,
    ) -> Option<Located<'c, SimpleTypeDefinition>> {
        self.global(from, name)
    }

    pub fn global_attribute_group(
        &self,
        from: SchemaRef,
        name: &str,
    ) -> Option<Located<'c, AttributeGroupDefinition>> {
        self.global(from, name)
    }

    pub fn global_group(
        &self,
        from: SchemaRef,
        name: &str,
    ) -> Option<Located<'c, ModelGroupDefinition>> {
        self.global(from, name)
    }

    /// Substitution group members of the global element `name` (as written in the current
    /// schema), searched from `from`.
    pub fn substitution_members(
        &self,
        from: SchemaRef,
        name: &str,
    ) -> Vec<Located<'c, ElementDeclaration>> {
        match self.resolve_qname(name, NameMode::Reference) {
            Some(head) => self.cache.substitution_members(from, &head.qname),
            None => Vec::new(),
        }
    }
}

fn locate<T>(schema: SchemaRef, declarations: &[T]) -> impl Iterator<Item = Located<'_, T>> {
    declarations.iter().map(move |declaration| Located {
        schema,
        declaration,
    })
}
