//! StyleStore trait for abstracting style persistence.
//!
//! Defined in restyle-core so the dialogue engine can create, read, and
//! delete styles without depending on a specific storage layout. The
//! directory-per-style adapter (`LocalStyleStore`) lives in restyle-infra.

use std::path::{Path, PathBuf};

use restyle_types::error::StyleError;
use restyle_types::style::{Style, StyleName};

/// Persistence of named styles.
///
/// Every method is last-writer-wins; callers do not coordinate concurrent
/// writes to the same name.
pub trait StyleStore: Send + Sync {
    /// A fresh path, under the store root, to download an upload into before
    /// it is committed with [`StyleStore::create_style`].
    fn temp_upload_path(&self) -> PathBuf;

    /// Sanitize `raw_name` and commit `upload` plus `prompt` as a style.
    ///
    /// Reuses an existing directory of the same name. Fails with
    /// [`StyleError::InvalidName`] when the name sanitizes to nothing, and
    /// with [`StyleError::StorageError`] on I/O failure, in which case the
    /// upload is removed if it is still at its original path.
    fn create_style(
        &self,
        raw_name: &str,
        prompt: &str,
        upload: &Path,
    ) -> impl std::future::Future<Output = Result<Style, StyleError>> + Send;

    /// Names of all stored styles, sorted. A missing root is an empty list.
    fn list_styles(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<StyleName>, StyleError>> + Send;

    /// Whether both artifacts of `name` exist, i.e. it can be used for a rewrite.
    fn contains_style(
        &self,
        name: &StyleName,
    ) -> impl std::future::Future<Output = bool> + Send;

    /// The prompt stored in the metadata record.
    ///
    /// [`StyleError::NotFound`] when the record is absent,
    /// [`StyleError::PromptNotFound`] when it has no `Prompt:` line.
    fn get_style_prompt(
        &self,
        name: &StyleName,
    ) -> impl std::future::Future<Output = Result<String, StyleError>> + Send;

    /// The first 100 lines of the example text, trimmed.
    fn get_style_example(
        &self,
        name: &StyleName,
    ) -> impl std::future::Future<Output = Result<String, StyleError>> + Send;

    /// Remove the whole storage unit of `name`.
    fn delete_style(
        &self,
        name: &StyleName,
    ) -> impl std::future::Future<Output = Result<(), StyleError>> + Send;

    /// Best-effort removal of an uncommitted upload. Never fails.
    fn discard_upload(&self, upload: &Path) -> impl std::future::Future<Output = ()> + Send;
}
