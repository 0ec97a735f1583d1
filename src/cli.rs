use crate::error::ROOT_ENV_VAR;
use clap::Parser;
use clap::builder::{OsStringValueParser, TypedValueParser};
use std::path::{Path, PathBuf};

/// docyank – pick a document from docs/ and copy it to the clipboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root containing docs/ (defaults to the nearest ancestor with a .git marker)
    // Accepts empty values; an empty PROJECT_ROOT is treated as unset.
    #[arg(
        long,
        value_name = "DIR",
        env = ROOT_ENV_VAR,
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    pub root: Option<PathBuf>,

    /// Comma-separated document types to offer (extension only, no dot).
    #[arg(
        long,
        value_delimiter = ',',
        value_name = "EXTENSIONS",
        default_value = "md,txt"
    )]
    pub types: Vec<String>,

    /// List categories and documents sorted by name instead of directory order
    #[arg(long)]
    pub sort: bool,

    /// Pick a document but print a summary instead of touching the clipboard
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The explicit root, if one was given and is non-empty.
    pub fn root_override(&self) -> Option<&Path> {
        self.root
            .as_deref()
            .filter(|root| !root.as_os_str().is_empty())
    }
}
