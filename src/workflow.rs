use crate::clipboard::{self, ClipboardSink, SystemClipboard};
use crate::docs_scanner::{self, EntryOrder};
use crate::error::PickerError;
use crate::prompt::{BufferedLineReader, LineReader, TerminalLineReader};
use crate::{cli, root, selector, utils};
use anyhow::Result;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Everything a run needs, resolved from the command line up front.
#[derive(Debug, Clone)]
pub struct Settings {
    pub root_override: Option<PathBuf>,
    pub start_dir: PathBuf,
    pub extensions: Vec<String>,
    pub order: EntryOrder,
    pub dry_run: bool,
}

impl Settings {
    pub fn from_cli(cli_args: &cli::Cli, start_dir: PathBuf) -> Self {
        Self {
            root_override: cli_args.root_override().map(Path::to_path_buf),
            start_dir,
            extensions: cli_args
                .types
                .iter()
                .map(|t| t.trim().trim_start_matches('.').to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            order: if cli_args.sort {
                EntryOrder::ByName
            } else {
                EntryOrder::Filesystem
            },
            dry_run: cli_args.dry_run,
        }
    }
}

/// How a run ended when nothing went wrong at the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoCategories,
    NoDocuments { category: String },
    Copied { file_name: String },
    DryRun { file_name: String },
    /// Selection finished but reading or copying the file did not.
    CopyFailed { file_name: String },
}

/// Resolve root, pick a category, pick a document, copy it.
pub fn pick_document(
    settings: &Settings,
    input: &mut impl LineReader,
    out: &mut impl Write,
    sink: &mut impl ClipboardSink,
) -> Result<Outcome, PickerError> {
    writeln!(out, "Welcome to the documentation navigator!\n")?;

    let project_root =
        root::resolve_project_root(settings.root_override.as_deref(), &settings.start_dir)?;

    writeln!(out, "Available documentation categories:")?;
    let categories = docs_scanner::list_categories(&project_root, settings.order)?;
    if categories.is_empty() {
        writeln!(out, "No documentation subdirectories found!")?;
        return Ok(Outcome::NoCategories);
    }

    let category = selector::choose(&categories, input, out)?;
    writeln!(out, "\nYou selected: {}", category.name)?;
    tracing::debug!(path = %category.path.display(), "category chosen");

    writeln!(out, "\nAvailable documents:")?;
    let documents =
        docs_scanner::list_documents(category, &settings.extensions, settings.order)?;
    if documents.is_empty() {
        writeln!(out, "No documentation files found in this directory!")?;
        return Ok(Outcome::NoDocuments {
            category: category.name.clone(),
        });
    }

    let document = selector::choose(&documents, input, out)?;
    writeln!(out, "\nYou selected: {}", document.display_name)?;

    yank(&document.path, &document.file_name, settings.dry_run, out, sink)
}

// Failures here are reported but not propagated: the selection is done.
fn yank(
    path: &Path,
    file_name: &str,
    dry_run: bool,
    out: &mut impl Write,
    sink: &mut impl ClipboardSink,
) -> Result<Outcome, PickerError> {
    let file_name = file_name.to_string();

    if dry_run {
        return match clipboard::read_document(path) {
            Ok(contents) => {
                writeln!(
                    out,
                    "\n(Dry run: would copy {} (≈ {} tokens). Clipboard not affected.)",
                    file_name,
                    utils::approx_tokens(&contents)
                )?;
                Ok(Outcome::DryRun { file_name })
            }
            Err(e) => {
                writeln!(out, "Error copying file contents: {:#}", e)?;
                Ok(Outcome::CopyFailed { file_name })
            }
        };
    }

    match clipboard::copy_file_contents(path, sink) {
        Ok(contents) => {
            writeln!(
                out,
                "\nContents of {} have been copied to your clipboard! (≈ {} tokens)",
                file_name,
                utils::approx_tokens(&contents)
            )?;
            Ok(Outcome::Copied { file_name })
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "copy failed: {:#}", e);
            writeln!(out, "Error copying file contents: {:#}", e)?;
            Ok(Outcome::CopyFailed { file_name })
        }
    }
}

/// Print a top-level failure. Every error ends the run the same gentle way.
pub fn report_failure(err: &PickerError, out: &mut impl Write) -> io::Result<()> {
    match err {
        e if e.is_configuration() => writeln!(out, "Error: {}", e),
        PickerError::Cancelled => writeln!(out, "\nOperation cancelled by user."),
        e => writeln!(out, "An unexpected error occurred: {}", e),
    }
}

// Main orchestrator for the docyank application logic.
pub fn run_docyank(cli_args: cli::Cli) -> Result<()> {
    let settings = Settings::from_cli(&cli_args, std::env::current_dir()?);
    tracing::debug!(?settings, "starting");

    let mut out = io::stdout();
    let mut sink = SystemClipboard;

    let result = if io::stdin().is_terminal() {
        pick_document(&settings, &mut TerminalLineReader, &mut out, &mut sink)
    } else {
        let mut input = BufferedLineReader::new(io::stdin().lock());
        pick_document(&settings, &mut input, &mut out, &mut sink)
    };

    match result {
        Ok(outcome) => tracing::info!(?outcome, "finished"),
        Err(e) => report_failure(&e, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
