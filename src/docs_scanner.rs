use crate::error::PickerError;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DOCS_DIR: &str = "docs";

/// How directory listings are ordered before they reach the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrder {
    /// Whatever order the filesystem hands back.
    Filesystem,
    ByName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub path: PathBuf,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub file_name: String,
    /// Stem, or the full file name when another document shares the stem.
    pub display_name: String,
}

pub fn docs_path(root: &Path) -> PathBuf {
    root.join(DOCS_DIR)
}

/// Immediate subdirectories of `<root>/docs`.
pub fn list_categories(root: &Path, order: EntryOrder) -> Result<Vec<Category>, PickerError> {
    let docs = docs_path(root);
    if !docs.is_dir() {
        return Err(PickerError::DocsNotFound(root.to_path_buf()));
    }

    let categories: Vec<Category> = immediate_children(&docs, order)?
        .into_iter()
        .filter(|path| path.is_dir())
        .map(|path| Category {
            name: file_name_lossy(&path),
            path,
        })
        .collect();

    tracing::info!(count = categories.len(), docs = %docs.display(), "listed categories");
    Ok(categories)
}

/// Files directly inside `category` whose extension is in `extensions`.
pub fn list_documents(
    category: &Category,
    extensions: &[String],
    order: EntryOrder,
) -> Result<Vec<Document>, PickerError> {
    let files: Vec<PathBuf> = immediate_children(&category.path, order)?
        .into_iter()
        .filter(|path| path.is_file())
        .filter(|path| {
            extensions
                .iter()
                .any(|ext| path.extension() == Some(OsStr::new(ext.as_str())))
        })
        .collect();

    let documents = label_documents(files);
    tracing::info!(count = documents.len(), category = %category.name, "listed documents");
    Ok(documents)
}

// Stems are shown unless two files would render identically, e.g. intro.md
// next to intro.txt; those keep their extension.
fn label_documents(files: Vec<PathBuf>) -> Vec<Document> {
    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for path in &files {
        *stem_counts.entry(stem_lossy(path).to_lowercase()).or_default() += 1;
    }

    files
        .into_iter()
        .map(|path| {
            let stem = stem_lossy(&path);
            let file_name = file_name_lossy(&path);
            let display_name = if stem_counts[&stem.to_lowercase()] > 1 {
                file_name.clone()
            } else {
                stem
            };
            Document {
                path,
                file_name,
                display_name,
            }
        })
        .collect()
}

fn immediate_children(dir: &Path, order: EntryOrder) -> Result<Vec<PathBuf>, PickerError> {
    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    if order == EntryOrder::ByName {
        walker = walker.sort_by_file_name();
    }

    let mut children = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => children.push(entry.into_path()),
            // Failing to open `dir` itself is fatal; a bad entry is not.
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => tracing::warn!("skipping unreadable entry: {}", e),
        }
    }
    Ok(children)
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn stem_lossy(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
