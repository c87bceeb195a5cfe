use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[clap(version, about)]
pub struct Cli {
    #[clap(value_parser, help = "The source file or URL")]
    pub input: String,

    #[clap(
        long,
        help = "Fetch remote schemas once into the mirror directory and read them from there"
    )]
    pub local_copy: bool,

    #[clap(long, default_value = "xsd-mirror", help = "Base directory of the local mirror")]
    pub mirror_dir: PathBuf,

    #[clap(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,

    #[clap(long = "element", value_name = "QNAME", help = "Look up a global element")]
    pub elements: Vec<String>,

    #[clap(
        long = "complex-type",
        value_name = "QNAME",
        help = "Look up a global complex type"
    )]
    pub complex_types: Vec<String>,

    #[clap(
        long = "substitutes",
        value_name = "QNAME",
        help = "List the substitution group members of an element"
    )]
    pub substitutes: Vec<String>,

    #[clap(short, long, action = clap::ArgAction::Count, help = "Increase logging verbosity")]
    pub verbose: u8,
}
