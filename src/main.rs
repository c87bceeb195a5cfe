mod cli;
mod logging;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use log::info;

use dt_xsd_graph::{
    DeclarationBag, LoaderOptions, SchemaCache, SchemaLoader, SchemaRef, SchemaUri,
};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    let loader = SchemaLoader::remote(LoaderOptions {
        mirror_dir: cli.mirror_dir.clone(),
        allow_dtd: cli.allow_dtd,
    });

    // Plain paths that exist locally are read from disk; everything else is a URI.
    let input = if Path::new(&cli.input).exists() {
        SchemaUri::from_file_path(Path::new(&cli.input))?
    } else {
        SchemaUri::parse(&cli.input)?
    };

    let mut cache = SchemaCache::new();
    let root = loader
        .load_uri(&mut cache, &input, cli.local_copy)
        .with_context(|| format!("failed to load schema {input}"))?;
    info!("loaded {} schema documents", cache.len());

    println!("Schema graph:");
    print_graph(&cache, root, 1);

    let bag = DeclarationBag::collected(&cache, root);
    println!();
    println!("Global declarations:");
    println!("  attributes:       {}", bag.attributes.len());
    println!("  attribute groups: {}", bag.attribute_groups.len());
    println!("  elements:         {}", bag.elements.len());
    println!("  groups:           {}", bag.groups.len());
    println!("  notations:        {}", bag.notations.len());
    for element in &bag.elements {
        if let Some(name) = cache.element_qname(element.schema, element.declaration) {
            println!("    element {name}");
        }
    }

    for name in &cli.elements {
        match bag.global_element(root, name) {
            Some(found) => println!(
                "element {name}: declared in {}",
                cache.get(found.schema).load_uri
            ),
            None => println!("element {name}: not found"),
        }
    }
    for name in &cli.complex_types {
        match bag.global_complex_type(root, name) {
            Some(found) => println!(
                "complex type {name}: declared in {}",
                cache.get(found.schema).load_uri
            ),
            None => println!("complex type {name}: not found"),
        }
    }
    for name in &cli.substitutes {
        let members = bag.substitution_members(root, name);
        println!("substitutes for {name}: {}", members.len());
        for member in members {
            if let Some(member_name) = cache.element_qname(member.schema, member.declaration) {
                println!("    {member_name}");
            }
        }
    }

    Ok(())
}

fn print_graph(cache: &SchemaCache, schema: SchemaRef, depth: usize) {
    let s = cache.get(schema);
    println!(
        "{:indent$}{} (targetNamespace {})",
        "",
        s.load_uri,
        s.target_namespace.as_deref().unwrap_or("-"),
        indent = depth * 2
    );
    for (prefix, namespace) in s.namespaces.iter() {
        let prefix = if prefix.is_empty() { "(default)" } else { prefix };
        println!("{:indent$}xmlns {prefix} = {namespace}", "", indent = depth * 2 + 4);
    }
    for &include in &s.includes {
        print_graph(cache, include, depth + 1);
    }
}
