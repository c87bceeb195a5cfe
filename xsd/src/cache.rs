use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;

use log::debug;

use super::{error::XsdError, schema::Schema};

/// A reference to a [`Schema`] stored in a [`SchemaCache`].
///
/// Refs are only meaningful for the cache (and cache generation) that handed them out; after
/// [`SchemaCache::clear()`] old refs never compare equal to new ones.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct SchemaRef {
    generation: u32,
    index: NonZeroU32,
}

impl SchemaRef {
    fn slot(self) -> usize {
        self.index.get() as usize - 1
    }
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<Schema #{}.{}>", self.generation, self.index)
    }
}

/// The load cache: every schema loaded so far, keyed by load URI.
///
/// The cache owns the schemas; the graph links between them are plain [`SchemaRef`]s. A cache
/// is meant to live for one generation run; [`SchemaCache::clear()`] starts over.
#[derive(Debug, Default)]
pub struct SchemaCache {
    generation: u32,
    schemas: Vec<Option<Schema>>,
    by_uri: HashMap<String, SchemaRef>,
    /// Load URIs whose directives are still being followed, outermost first.
    loading: Vec<String>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every schema. Refs handed out before are invalid afterwards.
    pub fn clear(&mut self) {
        debug!("clearing schema cache ({} schemas)", self.by_uri.len());
        self.generation = self.generation.wrapping_add(1);
        self.schemas.clear();
        self.by_uri.clear();
        self.loading.clear();
    }

    /// Number of fully or partially loaded schemas currently registered.
    pub fn len(&self) -> usize {
        self.by_uri.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }

    /// The schema registered for `load_uri`, if any.
    pub fn lookup(&self, load_uri: &str) -> Option<SchemaRef> {
        self.by_uri.get(load_uri).copied()
    }

    pub fn try_get(&self, schema: SchemaRef) -> Option<&Schema> {
        if schema.generation != self.generation {
            return None;
        }
        self.schemas.get(schema.slot()).and_then(Option::as_ref)
    }

    /// # Panics
    ///
    /// Panics if `schema` was not handed out by this cache since its last clear.
    pub fn get(&self, schema: SchemaRef) -> &Schema {
        self.try_get(schema)
            .unwrap_or_else(|| panic!("stale or foreign schema reference {schema:?}"))
    }

    pub(crate) fn get_mut(&mut self, schema: SchemaRef) -> Option<&mut Schema> {
        if schema.generation != self.generation {
            return None;
        }
        self.schemas.get_mut(schema.slot()).and_then(Option::as_mut)
    }

    /// All registered schemas, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (SchemaRef, &Schema)> {
        let generation = self.generation;
        self.schemas.iter().enumerate().filter_map(move |(i, s)| {
            let index = NonZeroU32::new(i as u32 + 1)?;
            s.as_ref().map(|s| (SchemaRef { generation, index }, s))
        })
    }

    /// Fails with [`XsdError::IncludeCycle`] if `load_uri` is still being loaded further up.
    pub(crate) fn check_not_loading(&self, load_uri: &str) -> Result<(), XsdError> {
        match self.loading.iter().position(|u| u == load_uri) {
            Some(start) => {
                let mut chain = self.loading[start..].to_vec();
                chain.push(load_uri.to_string());
                Err(XsdError::IncludeCycle { chain })
            }
            None => Ok(()),
        }
    }

    /// Registers a parsed, namespace-resolved schema and marks it as loading.
    pub(crate) fn begin_load(&mut self, schema: Schema) -> SchemaRef {
        let load_uri = schema.load_uri.to_string();
        self.schemas.push(Some(schema));
        let index = NonZeroU32::MIN.saturating_add(self.schemas.len() as u32 - 1);
        let schema_ref = SchemaRef {
            generation: self.generation,
            index,
        };
        self.by_uri.insert(load_uri.clone(), schema_ref);
        self.loading.push(load_uri);
        schema_ref
    }

    /// Marks `schema` as completely loaded.
    pub(crate) fn finish_load(&mut self, schema: SchemaRef) {
        if let Some(load_uri) = self.try_get(schema).map(|s| s.load_uri.to_string()) {
            self.loading.retain(|u| *u != load_uri);
        }
    }

    /// Drops a schema whose directives could not be followed. Schemas it already linked stay
    /// registered but lose their parent link if it pointed here.
    pub(crate) fn abort_load(&mut self, schema: SchemaRef) {
        if schema.generation != self.generation {
            return;
        }
        let Some(removed) = self.schemas.get_mut(schema.slot()).and_then(Option::take) else {
            return;
        };
        let load_uri = removed.load_uri.to_string();
        debug!("discarding partially loaded schema {load_uri}");
        self.by_uri.remove(&load_uri);
        self.loading.retain(|u| *u != load_uri);
        for child in removed.includes {
            if let Some(child) = self.get_mut(child) {
                if child.parent == Some(schema) {
                    child.parent = None;
                }
            }
        }
    }
}
