//! Document loading and text extraction.
//!
//! [`DirectoryLoader`] reads every matching file in the configured source
//! directories (non-recursively) and extracts plain text: PDF files are
//! parsed with `lopdf`, concatenating the text of each page in page order;
//! `.txt` files are read whole as UTF-8.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::ExtractionPolicy;
use crate::document::Document;
use crate::error::{RagError, Result};

/// Loads documents from a pair of source directories.
///
/// Directories are scanned non-recursively; files are matched by extension
/// (`.pdf` in the PDF directory, `.txt` in the text directory). How a
/// single unparseable document is handled depends on the configured
/// [`ExtractionPolicy`]: `Strict` aborts the whole load, `SkipWithWarning`
/// logs the failure and continues.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    pdf_dir: PathBuf,
    text_dir: PathBuf,
    policy: ExtractionPolicy,
}

impl DirectoryLoader {
    /// Create a loader over the given source directories.
    pub fn new(
        pdf_dir: impl Into<PathBuf>,
        text_dir: impl Into<PathBuf>,
        policy: ExtractionPolicy,
    ) -> Self {
        Self { pdf_dir: pdf_dir.into(), text_dir: text_dir.into(), policy }
    }

    /// Load and extract text from every matching document in both directories.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DirectoryNotFound`] if either directory cannot be
    /// read, and [`RagError::Extraction`] (naming the file) if a document
    /// fails to parse under the `Strict` policy.
    pub fn load(&self) -> Result<Vec<Document>> {
        let mut documents = self.load_directory(&self.pdf_dir, "pdf", extract_pdf_text)?;
        documents.extend(self.load_directory(&self.text_dir, "txt", read_text_file)?);
        info!(document_count = documents.len(), "loaded documents");
        Ok(documents)
    }

    /// Extract text from every file with the given extension in one directory.
    fn load_directory(
        &self,
        dir: &Path,
        extension: &str,
        extract: fn(&Path) -> Result<String>,
    ) -> Result<Vec<Document>> {
        let entries = std::fs::read_dir(dir).map_err(|source| RagError::DirectoryNotFound {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
            })
            .collect();
        // Deterministic load order regardless of directory iteration order.
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            match extract(&path) {
                Ok(text) => {
                    let id = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    documents.push(Document::new(id, text));
                }
                Err(e) if self.policy == ExtractionPolicy::SkipWithWarning => {
                    warn!(path = %path.display(), error = %e, "skipping unparseable document");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(documents)
    }
}

/// Extract text from a PDF file, concatenating pages in page order.
fn extract_pdf_text(path: &Path) -> Result<String> {
    let doc = lopdf::Document::load(path).map_err(|e| RagError::Extraction {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        let page_text = doc.extract_text(&[*page_number]).map_err(|e| RagError::Extraction {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        text.push_str(&page_text);
    }

    Ok(text)
}

/// Read a plain-text file whole, as UTF-8.
fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| RagError::Extraction {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}
