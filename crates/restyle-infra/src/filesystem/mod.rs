//! Filesystem style store.
//!
//! Implements the `StyleStore` trait from `restyle-core` over a directory
//! tree, one subdirectory per style:
//!
//! ```text
//! {root}/{name}/{name}.meta
//! {root}/{name}/{name}.txt
//! ```
//!
//! Uploads are downloaded to hidden `{root}/.upload-<uuid>.txt` files and
//! renamed into place on commit.

pub mod meta;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use restyle_core::storage::style_store::StyleStore;
use restyle_types::error::StyleError;
use restyle_types::style::{Style, StyleName, EXAMPLE_LINE_LIMIT};

use self::meta::{compose_meta, parse_prompt};

/// Local filesystem implementation of [`StyleStore`].
///
/// All operations go through `tokio::fs`. No locking: concurrent writes to
/// the same name are last-writer-wins.
#[derive(Debug, Clone)]
pub struct LocalStyleStore {
    root: PathBuf,
}

impl LocalStyleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/{name}/`
    pub fn style_dir(&self, name: &StyleName) -> PathBuf {
        self.root.join(name.as_str())
    }

    fn meta_path(&self, name: &StyleName) -> PathBuf {
        self.style_dir(name).join(name.meta_file_name())
    }

    fn example_path(&self, name: &StyleName) -> PathBuf {
        self.style_dir(name).join(name.example_file_name())
    }

    async fn commit(&self, style: &Style, upload: &Path) -> Result<(), std::io::Error> {
        let dir = self.style_dir(&style.name);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::rename(upload, dir.join(&style.example_file)).await?;
        tokio::fs::write(self.meta_path(&style.name), compose_meta(style)).await
    }
}

fn storage_error(err: std::io::Error) -> StyleError {
    StyleError::StorageError(err.to_string())
}

/// Map a read failure, treating a missing file as "style not found".
fn read_error(name: &StyleName, err: std::io::Error) -> StyleError {
    if err.kind() == ErrorKind::NotFound {
        StyleError::NotFound(name.to_string())
    } else {
        storage_error(err)
    }
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

impl StyleStore for LocalStyleStore {
    fn temp_upload_path(&self) -> PathBuf {
        self.root
            .join(format!(".upload-{}.txt", uuid::Uuid::now_v7()))
    }

    async fn create_style(
        &self,
        raw_name: &str,
        prompt: &str,
        upload: &Path,
    ) -> Result<Style, StyleError> {
        let name = StyleName::sanitize(raw_name)?;
        let style = Style::new(name, prompt);

        if let Err(err) = self.commit(&style, upload).await {
            tracing::error!(style = %style.name, error = %err, "failed to commit style");
            if exists(upload).await {
                self.discard_upload(upload).await;
            }
            return Err(storage_error(err));
        }

        tracing::debug!(style = %style.name, dir = %self.style_dir(&style.name).display(), "style written");
        Ok(style)
    }

    async fn list_styles(&self) -> Result<Vec<StyleName>, StyleError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(storage_error(err)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(storage_error)? {
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }
            let file_name = entry.file_name();
            match file_name.to_str().map(StyleName::parse) {
                Some(Ok(name)) => names.push(name),
                _ => tracing::debug!(entry = ?file_name, "skipping non-style directory"),
            }
        }

        names.sort();
        Ok(names)
    }

    async fn contains_style(&self, name: &StyleName) -> bool {
        exists(&self.meta_path(name)).await && exists(&self.example_path(name)).await
    }

    async fn get_style_prompt(&self, name: &StyleName) -> Result<String, StyleError> {
        let content = tokio::fs::read_to_string(self.meta_path(name))
            .await
            .map_err(|e| read_error(name, e))?;
        parse_prompt(&content).ok_or_else(|| StyleError::PromptNotFound(name.to_string()))
    }

    async fn get_style_example(&self, name: &StyleName) -> Result<String, StyleError> {
        let content = tokio::fs::read_to_string(self.example_path(name))
            .await
            .map_err(|e| read_error(name, e))?;
        let head: Vec<&str> = content.lines().take(EXAMPLE_LINE_LIMIT).collect();
        Ok(head.join("\n").trim().to_string())
    }

    async fn delete_style(&self, name: &StyleName) -> Result<(), StyleError> {
        let dir = self.style_dir(name);
        if !exists(&dir).await {
            return Err(StyleError::NotFound(name.to_string()));
        }
        tokio::fs::remove_dir_all(&dir).await.map_err(storage_error)
    }

    async fn discard_upload(&self, upload: &Path) {
        match tokio::fs::remove_file(upload).await {
            Ok(()) => tracing::debug!(path = %upload.display(), "removed temporary upload"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %upload.display(), error = %err, "failed to remove temporary upload")
            }
        }
    }
}
