//! Loading of XSD schema documents into a graph of included/imported schemas, and resolution of
//! qualified names and global declarations across that graph.
//!
//! ```no_run
//! use dt_xsd_graph::{DeclarationBag, LoaderOptions, SchemaCache, SchemaLoader};
//!
//! let loader = SchemaLoader::remote(LoaderOptions::default());
//! let mut cache = SchemaCache::new();
//! let root = loader.load_schema(&mut cache, "https://example.com/root.xsd", true)?;
//! let bag = DeclarationBag::collected(&cache, root);
//! let order = bag.global_element(root, "tns:Order");
//! # Ok::<(), dt_xsd_graph::XsdError>(())
//! ```

pub mod annotation;
pub mod attribute_decl;
pub mod attribute_group_def;
pub mod bag;
pub mod cache;
pub mod complex_type_def;
pub mod element_decl;
pub mod error;
pub mod fetch;
pub mod import;
pub mod loader;
pub mod model_group;
pub mod model_group_def;
pub mod namespaces;
pub mod notation_decl;
pub mod particle;
pub mod resolve;
pub mod schema;
pub mod shared;
pub mod simple_type_def;
pub mod uri;
pub mod xstypes;

mod values;

pub use annotation::Annotation;
pub use attribute_decl::AttributeDeclaration;
pub use attribute_group_def::AttributeGroupDefinition;
pub use bag::DeclarationBag;
pub use cache::{SchemaCache, SchemaRef};
pub use complex_type_def::ComplexTypeDefinition;
pub use element_decl::ElementDeclaration;
pub use error::XsdError;
pub use fetch::{DocumentFetcher, RemoteFetcher};
pub use import::{Directive, Import, Include, Redefine};
pub use loader::{parse_schema, LoaderOptions, SchemaLoader};
pub use model_group::{Compositor, ModelGroup};
pub use model_group_def::ModelGroupDefinition;
pub use namespaces::{NameMode, Namespaces, RawAttribute, ResolvedName};
pub use notation_decl::NotationDeclaration;
pub use particle::{MaxOccurs, Occurs, Particle};
pub use resolve::{GlobalDeclaration, Located};
pub use schema::Schema;
pub use simple_type_def::SimpleTypeDefinition;
pub use uri::SchemaUri;
pub use xstypes::QName;
