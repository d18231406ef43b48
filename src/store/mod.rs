//! Document store the engine reads notes from and writes notes to
//!
//! Paths are vault-relative and `/`-separated. The engine never touches the
//! filesystem directly; everything goes through [`DocumentStore`].

pub mod frontmatter;
pub mod vault;

use async_trait::async_trait;

pub use frontmatter::{Frontmatter, FrontmatterValue};
pub use vault::Vault;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("File not found: {0}")]
  NotFound(String),

  #[error("File already exists: {0}")]
  AlreadyExists(String),

  #[error("Invalid vault path: {0}")]
  InvalidPath(String),
}

/// ---------------------------------------------------------------------------
/// Stored Files
/// ---------------------------------------------------------------------------

/// A markdown file found in the store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NoteFile {
  pub path: String,
}

impl NoteFile {
  pub fn new(path: impl Into<String>) -> Self {
    Self { path: path.into() }
  }

  /// File name with extension
  pub fn name(&self) -> &str {
    self.path.rsplit('/').next().unwrap_or(&self.path)
  }

  /// File name without the `.md` extension
  pub fn basename(&self) -> &str {
    let name = self.name();
    name.strip_suffix(".md").unwrap_or(name)
  }

  /// Wikilink to this note, e.g. `[[2024-03-12 - Push Day]]`
  pub fn wikilink(&self) -> String {
    format!("[[{}]]", self.basename())
  }
}

/// ---------------------------------------------------------------------------
/// Store Interface
/// ---------------------------------------------------------------------------

#[async_trait]
pub trait DocumentStore: Send + Sync {
  /// True if a file or folder exists at `path`
  async fn exists(&self, path: &str) -> Result<bool, StoreError>;

  async fn folder_exists(&self, path: &str) -> Result<bool, StoreError>;

  /// Create a folder (and its parents) if it is missing
  async fn ensure_folder(&self, path: &str) -> Result<(), StoreError>;

  async fn read(&self, path: &str) -> Result<String, StoreError>;

  /// Create a new file. Fails with `AlreadyExists` if one is present.
  async fn create(&self, path: &str, content: &str) -> Result<(), StoreError>;

  async fn delete(&self, path: &str) -> Result<(), StoreError>;

  /// Markdown files under `folder`, sorted by path
  async fn list_markdown(&self, folder: &str, recursive: bool) -> Result<Vec<NoteFile>, StoreError>;

  /// Read-modify-write of a file's metadata block. The body is preserved.
  async fn process_frontmatter(
    &self,
    path: &str,
    update: &mut (dyn for<'f> FnMut(&'f mut Frontmatter) + Send),
  ) -> Result<(), StoreError>;

  async fn read_frontmatter(&self, path: &str) -> Result<Frontmatter, StoreError> {
    let content = self.read(path).await?;
    Ok(frontmatter::parse_note(&content).frontmatter)
  }
}
