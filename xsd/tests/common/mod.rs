#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use dt_xsd_graph::{DocumentFetcher, LoaderOptions, SchemaLoader, SchemaUri, XsdError};

pub const BASE: &str = "http://test.example/xsd";

/// Serves schema documents from memory and records every fetch.
pub struct MemoryFetcher {
    documents: HashMap<String, String>,
    fetches: Rc<RefCell<Vec<String>>>,
}

impl DocumentFetcher for MemoryFetcher {
    fn fetch(&self, uri: &SchemaUri) -> Result<Vec<u8>, XsdError> {
        let uri = uri.to_string();
        self.fetches.borrow_mut().push(uri.clone());
        self.documents
            .get(&uri)
            .map(|d| d.as_bytes().to_vec())
            .ok_or_else(|| XsdError::Io {
                path: PathBuf::from(&uri),
                source: io::Error::new(io::ErrorKind::NotFound, "no such document"),
            })
    }
}

pub struct Fixture {
    pub loader: SchemaLoader,
    pub fetches: Rc<RefCell<Vec<String>>>,
}

impl Fixture {
    pub fn fetch_count(&self) -> usize {
        self.fetches.borrow().len()
    }
}

/// `documents` are `(file name, content)` pairs served below [`BASE`].
pub fn fixture(documents: &[(&str, String)]) -> Fixture {
    fixture_with_options(documents, LoaderOptions::default())
}

pub fn fixture_with_options(documents: &[(&str, String)], options: LoaderOptions) -> Fixture {
    let fetches = Rc::new(RefCell::new(Vec::new()));
    let fetcher = MemoryFetcher {
        documents: documents
            .iter()
            .map(|(name, content)| {
                let key = SchemaUri::parse(&uri(name)).unwrap().to_string();
                (key, content.clone())
            })
            .collect(),
        fetches: fetches.clone(),
    };
    Fixture {
        loader: SchemaLoader::new(Box::new(fetcher), options),
        fetches,
    }
}

pub fn uri(name: &str) -> String {
    format!("{BASE}/{name}")
}

/// A schema document with target namespace `tns` bound to `prefix`.
pub fn schema(tns: &str, prefix: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:{prefix}="{tns}" targetNamespace="{tns}">
{body}
</xs:schema>"#
    )
}
