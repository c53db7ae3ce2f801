//! Corpus discovery: recursive enumeration of replay files per category.
//!
//! Discovery runs once during setup and produces the read-only catalog the
//! pipeline iterates over. No file content is inspected here; a file's
//! category comes entirely from the root it was found under.

use crate::core::errors::CatalogError;
use crate::core::{Category, FileRef};
use std::collections::BTreeMap;
use std::path::PathBuf;
use walkdir::WalkDir;

/// The catalog mapping built by [`FileCatalog::discover`].
pub type Catalog = BTreeMap<Category, Vec<FileRef>>;

pub struct FileCatalog {
    roots: BTreeMap<Category, PathBuf>,
}

impl FileCatalog {
    pub fn new() -> Self {
        Self {
            roots: BTreeMap::new(),
        }
    }

    pub fn with_root(mut self, category: Category, root: impl Into<PathBuf>) -> Self {
        self.roots.insert(category, root.into());
        self
    }

    pub fn from_roots(roots: BTreeMap<Category, PathBuf>) -> Self {
        Self { roots }
    }

    /// Enumerate every regular file reachable from each configured root.
    ///
    /// Sibling entries are visited in file-name order, so the sequence for a
    /// given tree is stable across runs. Symlinked directories are not
    /// followed. A missing root or an unreadable directory is fatal; an empty
    /// directory simply yields an empty list for its category.
    pub fn discover(&self) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::new();
        for (&category, root) in &self.roots {
            catalog.insert(category, discover_root(category, root)?);
        }
        Ok(catalog)
    }
}

impl Default for FileCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn discover_root(category: Category, root: &PathBuf) -> Result<Vec<FileRef>, CatalogError> {
    if !root.exists() {
        return Err(CatalogError::MissingRoot {
            category,
            path: root.clone(),
        });
    }
    if !root.is_dir() {
        return Err(CatalogError::NotADirectory {
            category,
            path: root.clone(),
        });
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| CatalogError::Traversal {
            category,
            path: root.clone(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(FileRef::new(entry.into_path(), category));
        }
    }

    log::debug!("discovered {} files under {} ({})", files.len(), root.display(), category);
    Ok(files)
}
