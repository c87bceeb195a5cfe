use std::path::PathBuf;

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};

use super::{
    cache::{SchemaCache, SchemaRef},
    error::XsdError,
    fetch::{mirrored, DocumentFetcher, RemoteFetcher},
    import::{Directive, Import},
    schema::{root_attributes, Schema},
    uri::SchemaUri,
};

#[derive(Clone, Debug)]
pub struct LoaderOptions {
    /// Base directory of the local mirror used when a load asks for a local copy.
    pub mirror_dir: PathBuf,
    /// Allow a XML Document Type Definition (DTD) to occur
    pub allow_dtd: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            mirror_dir: PathBuf::from("xsd-mirror"),
            allow_dtd: false,
        }
    }
}

/// Loads schema documents and links them into a graph inside a [`SchemaCache`].
pub struct SchemaLoader {
    fetcher: Box<dyn DocumentFetcher>,
    options: LoaderOptions,
}

impl SchemaLoader {
    pub fn new(fetcher: Box<dyn DocumentFetcher>, options: LoaderOptions) -> Self {
        Self { fetcher, options }
    }

    /// A loader that reads `file` URIs from disk and fetches everything else over HTTP(S).
    pub fn remote(options: LoaderOptions) -> Self {
        Self::new(Box::new(RemoteFetcher::new()), options)
    }

    /// Loads the schema at `uri` and, recursively, every schema it includes, imports or
    /// redefines.
    ///
    /// With `local_copy`, remote documents are fetched once into the mirror directory and read
    /// from there afterwards. Documents already in `cache` are reused, never fetched again.
    pub fn load_schema(
        &self,
        cache: &mut SchemaCache,
        uri: &str,
        local_copy: bool,
    ) -> Result<SchemaRef, XsdError> {
        self.load_uri(cache, &SchemaUri::parse(uri)?, local_copy)
    }

    pub fn load_uri(
        &self,
        cache: &mut SchemaCache,
        uri: &SchemaUri,
        local_copy: bool,
    ) -> Result<SchemaRef, XsdError> {
        let load_uri = uri.to_string();
        cache.check_not_loading(&load_uri)?;
        if let Some(existing) = cache.lookup(&load_uri) {
            debug!("{load_uri} is already loaded");
            return Ok(existing);
        }

        let (data, local_path) = self.read(uri, local_copy)?;
        let schema = parse_schema(&data, uri.clone(), local_path, self.options.allow_dtd)?;
        debug!(
            "loaded {load_uri} (target namespace {:?}, {} directives)",
            schema.target_namespace,
            schema.directives.len()
        );

        let schema_ref = cache.begin_load(schema);
        match self.link_directives(cache, schema_ref, local_copy) {
            Ok(()) => {
                cache.finish_load(schema_ref);
                Ok(schema_ref)
            }
            Err(e) => {
                cache.abort_load(schema_ref);
                Err(e)
            }
        }
    }

    fn read(
        &self,
        uri: &SchemaUri,
        local_copy: bool,
    ) -> Result<(Vec<u8>, Option<PathBuf>), XsdError> {
        if uri.is_file() {
            return Ok((self.fetcher.fetch(uri)?, uri.file_path()));
        }
        if local_copy {
            let local_path = uri.local_path(&self.options.mirror_dir);
            let data = mirrored(self.fetcher.as_ref(), uri, &local_path)?;
            return Ok((data, Some(local_path)));
        }
        Ok((self.fetcher.fetch(uri)?, None))
    }

    /// Follows the directives of `schema_ref` in document order.
    fn link_directives(
        &self,
        cache: &mut SchemaCache,
        schema_ref: SchemaRef,
        local_copy: bool,
    ) -> Result<(), XsdError> {
        let schema = cache.get(schema_ref);
        let base = schema.load_uri.clone();
        let mut locations = Vec::new();
        for directive in &schema.directives {
            match directive.schema_location() {
                Some(location) => locations.push(location.to_string()),
                None => {
                    if let Directive::Import(Import { namespace, .. }) = directive {
                        warn!("{base}: import of namespace {namespace:?} has no schemaLocation, skipping");
                    } else {
                        warn!("{base}: directive without schemaLocation, skipping");
                    }
                }
            }
        }

        for location in locations {
            let child = self.load_uri(cache, &base.join(&location)?, local_copy)?;
            if let Some(child) = cache.get_mut(child) {
                child.parent = Some(schema_ref);
            }
            if let Some(schema) = cache.get_mut(schema_ref) {
                schema.includes.push(child);
            }
        }
        Ok(())
    }
}

/// Parses one schema document: the root element's raw attributes are captured first, then the
/// document is mapped into a [`Schema`] whose namespace bindings are resolved from them.
pub fn parse_schema(
    data: &[u8],
    load_uri: SchemaUri,
    local_path: Option<PathBuf>,
    allow_dtd: bool,
) -> Result<Schema, XsdError> {
    let (text, _, _) = Encoding::decode(UTF_8, data);
    let options = roxmltree::ParsingOptions {
        allow_dtd,
        ..Default::default()
    };
    let document =
        roxmltree::Document::parse_with_options(&text, options).map_err(|source| {
            XsdError::Parse {
                uri: load_uri.to_string(),
                source,
            }
        })?;

    let root_attributes = root_attributes(&document);
    let mut schema = Schema::map_from_xml(document.root_element(), load_uri, local_path)?;
    schema.resolve_namespaces(&root_attributes);
    Ok(schema)
}
