//! Document sources.
//!
//! A [`DocumentSource`] lists the uploaded attendance workbooks and hands
//! out their raw bytes.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};

/// File extension of attendance workbooks.
pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Prefix of the lock files office suites leave next to open workbooks.
const LOCK_FILE_PREFIX: &str = "~$";

/// A document available from a source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DocumentRef {
    /// The document identifier (its file name).
    pub id: String,
}

impl DocumentRef {
    /// Creates a reference from an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Where attendance workbooks come from.
pub trait DocumentSource: Send + Sync {
    /// Lists the available documents, sorted by identifier.
    fn list(&self) -> EngineResult<Vec<DocumentRef>>;

    /// Returns the raw bytes of a document.
    ///
    /// Fails with [`EngineError::DocumentNotFound`] if there is no such
    /// document.
    fn fetch(&self, id: &str) -> EngineResult<Vec<u8>>;
}

/// A document source backed by a local directory of `.xlsx` files.
#[derive(Debug, Clone)]
pub struct LocalDocumentSource {
    root: PathBuf,
}

impl LocalDocumentSource {
    /// Creates a source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory this source reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_workbook(path: &Path) -> bool {
        let is_xlsx = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION));
        let is_lock_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOCK_FILE_PREFIX));
        is_xlsx && !is_lock_file && path.is_file()
    }
}

impl DocumentSource for LocalDocumentSource {
    fn list(&self) -> EngineResult<Vec<DocumentRef>> {
        let entries = fs::read_dir(&self.root).map_err(|e| EngineError::StorageError {
            message: format!("cannot list {}: {}", self.root.display(), e),
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| EngineError::StorageError {
                message: format!("cannot list {}: {}", self.root.display(), e),
            })?;
            let path = entry.path();
            if !Self::is_workbook(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                documents.push(DocumentRef::new(name));
            }
        }

        documents.sort();
        Ok(documents)
    }

    fn fetch(&self, id: &str) -> EngineResult<Vec<u8>> {
        let not_found = || EngineError::DocumentNotFound { id: id.to_string() };

        // Identifiers are bare file names; anything that could leave the
        // root directory does not exist as far as this source is concerned.
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(not_found());
        }

        fs::read(self.root.join(id)).map_err(|e| match e.kind() {
            ErrorKind::NotFound => not_found(),
            _ => EngineError::StorageError {
                message: format!("cannot read {}: {}", id, e),
            },
        })
    }
}

/// A document source holding documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentSource {
    documents: BTreeMap<String, Vec<u8>>,
}

impl MemoryDocumentSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a document.
    pub fn insert(&mut self, id: impl Into<String>, bytes: Vec<u8>) -> &mut Self {
        self.documents.insert(id.into(), bytes);
        self
    }
}

impl DocumentSource for MemoryDocumentSource {
    fn list(&self) -> EngineResult<Vec<DocumentRef>> {
        Ok(self.documents.keys().map(DocumentRef::new).collect())
    }

    fn fetch(&self, id: &str) -> EngineResult<Vec<u8>> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::DocumentNotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stipend-source-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_local_lists_only_workbooks_sorted() {
        let dir = temp_dir();
        fs::write(dir.join("b_홍길동.xlsx"), b"b").unwrap();
        fs::write(dir.join("a_김철수.XLSX"), b"a").unwrap();
        fs::write(dir.join("notes.txt"), b"x").unwrap();
        fs::write(dir.join("~$b_홍길동.xlsx"), b"lock").unwrap();
        fs::create_dir(dir.join("nested.xlsx")).unwrap();

        let source = LocalDocumentSource::new(&dir);
        let ids: Vec<String> = source.list().unwrap().into_iter().map(|d| d.id).collect();

        assert_eq!(ids, vec!["a_김철수.XLSX".to_string(), "b_홍길동.xlsx".to_string()]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_local_fetch_reads_bytes() {
        let dir = temp_dir();
        fs::write(dir.join("a.xlsx"), b"content").unwrap();

        let source = LocalDocumentSource::new(&dir);
        assert_eq!(source.fetch("a.xlsx").unwrap(), b"content".to_vec());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_local_fetch_missing_is_not_found() {
        let dir = temp_dir();
        let source = LocalDocumentSource::new(&dir);

        match source.fetch("missing.xlsx") {
            Err(EngineError::DocumentNotFound { id }) => assert_eq!(id, "missing.xlsx"),
            other => panic!("Expected DocumentNotFound, got {:?}", other),
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_local_fetch_rejects_paths() {
        let dir = temp_dir();
        let source = LocalDocumentSource::new(&dir);

        for id in ["../secret.xlsx", "a/b.xlsx", "..", ""] {
            assert!(matches!(
                source.fetch(id),
                Err(EngineError::DocumentNotFound { .. })
            ));
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_local_list_missing_directory_is_storage_error() {
        let source = LocalDocumentSource::new("/nonexistent/uploads");
        assert!(matches!(source.list(), Err(EngineError::StorageError { .. })));
    }

    #[test]
    fn test_memory_source() {
        let mut source = MemoryDocumentSource::new();
        source.insert("b.xlsx", vec![2]).insert("a.xlsx", vec![1]);

        let ids: Vec<String> = source.list().unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["a.xlsx".to_string(), "b.xlsx".to_string()]);
        assert_eq!(source.fetch("a.xlsx").unwrap(), vec![1]);
        assert!(matches!(
            source.fetch("c.xlsx"),
            Err(EngineError::DocumentNotFound { .. })
        ));
    }
}
