//! Filesystem-backed document store rooted at a vault directory

use super::frontmatter::{self, Frontmatter};
use super::{DocumentStore, NoteFile, StoreError};
use crate::units::normalize_path;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct Vault {
  root: PathBuf,
}

impl Vault {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Map a vault path onto the filesystem, refusing anything that escapes the root
  fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
    let normalized = normalize_path(path);
    let relative = Path::new(&normalized);
    if relative
      .components()
      .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
      return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(self.root.join(relative))
  }

  fn vault_path(&self, full: &Path) -> Option<String> {
    let relative = full.strip_prefix(&self.root).ok()?;
    let joined = relative
      .components()
      .map(|c| c.as_os_str().to_string_lossy())
      .collect::<Vec<_>>()
      .join("/");
    Some(joined)
  }
}

fn not_found(path: &str) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
  move |e| match e.kind() {
    ErrorKind::NotFound => StoreError::NotFound(path.to_string()),
    _ => StoreError::Io(e),
  }
}

#[async_trait]
impl DocumentStore for Vault {
  async fn exists(&self, path: &str) -> Result<bool, StoreError> {
    let full = self.resolve(path)?;
    Ok(fs::try_exists(&full).await?)
  }

  async fn folder_exists(&self, path: &str) -> Result<bool, StoreError> {
    let full = self.resolve(path)?;
    match fs::metadata(&full).await {
      Ok(meta) => Ok(meta.is_dir()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
      Err(e) => Err(e.into()),
    }
  }

  async fn ensure_folder(&self, path: &str) -> Result<(), StoreError> {
    let full = self.resolve(path)?;
    fs::create_dir_all(&full).await?;
    Ok(())
  }

  async fn read(&self, path: &str) -> Result<String, StoreError> {
    let full = self.resolve(path)?;
    fs::read_to_string(&full).await.map_err(not_found(path))
  }

  async fn create(&self, path: &str, content: &str) -> Result<(), StoreError> {
    let full = self.resolve(path)?;
    if let Some(parent) = full.parent() {
      fs::create_dir_all(parent).await?;
    }
    let mut file = fs::OpenOptions::new()
      .write(true)
      .create_new(true)
      .open(&full)
      .await
      .map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.to_string()),
        _ => StoreError::Io(e),
      })?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;
    Ok(())
  }

  async fn delete(&self, path: &str) -> Result<(), StoreError> {
    let full = self.resolve(path)?;
    fs::remove_file(&full).await.map_err(not_found(path))
  }

  async fn list_markdown(&self, folder: &str, recursive: bool) -> Result<Vec<NoteFile>, StoreError> {
    let start = self.resolve(folder)?;
    let mut files = Vec::new();
    if !fs::try_exists(&start).await? {
      return Ok(files);
    }

    let mut pending = vec![start];
    while let Some(dir) = pending.pop() {
      let mut entries = fs::read_dir(&dir).await?;
      while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        // Skip hidden files/dirs (.obsidian, .trash)
        if entry.file_name().to_string_lossy().starts_with('.') {
          continue;
        }
        let file_type = entry.file_type().await?;
        if file_type.is_dir() {
          if recursive {
            pending.push(path);
          }
        } else if path.extension().map(|e| e == "md").unwrap_or(false) {
          if let Some(vault_path) = self.vault_path(&path) {
            files.push(NoteFile::new(vault_path));
          }
        }
      }
    }

    files.sort();
    Ok(files)
  }

  async fn process_frontmatter(
    &self,
    path: &str,
    update: &mut (dyn for<'f> FnMut(&'f mut Frontmatter) + Send),
  ) -> Result<(), StoreError> {
    let full = self.resolve(path)?;
    let content = fs::read_to_string(&full).await.map_err(not_found(path))?;

    let mut fm = frontmatter::parse_note(&content).frontmatter;
    update(&mut fm);
    let updated = frontmatter::replace_frontmatter(&content, &fm);

    if updated != content {
      fs::write(&full, updated).await?;
    }
    Ok(())
  }
}
