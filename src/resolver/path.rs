//! Mapping of request targets onto the served root.

use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::resolver::decode::decode_escapes;
use crate::resolver::error::ResolveError;

/// Resolves request targets to files confined to a served root directory.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    default_document: String,
}

impl PathResolver {
    /// Create a resolver for `served_root`.
    ///
    /// The root is canonicalized once here, so it must exist.
    ///
    /// # Arguments
    ///
    /// * `served_root` - The directory tree that may be exposed
    /// * `default_document` - The file served when a target names a directory
    pub fn new(served_root: impl AsRef<Path>, default_document: impl Into<String>) -> Result<Self, ResolveError> {
        let served_root = served_root.as_ref();
        let root = std::fs::canonicalize(served_root).map_err(|source| ResolveError::RootUnavailable {
            path: served_root.to_path_buf(),
            source,
        })?;

        Ok(Self {
            root,
            default_document: default_document.into(),
        })
    }

    /// The canonical served root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a request target to an absolute path inside the served root.
    ///
    /// The query component is discarded, the path is percent-decoded, joined onto
    /// the root and normalized lexically. The target does not need to exist.
    pub fn confine(&self, target: &str) -> Result<PathBuf, ResolveError> {
        if !target.starts_with('/') {
            return Err(ResolveError::MalformedTarget(target.to_string()));
        }

        let path = target.split_once('?').map_or(target, |(path, _)| path);
        let decoded = decode_escapes(path)?;

        // A leading separator would make `join` discard the root.
        let joined = self.root.join(decoded.trim_start_matches('/'));
        let normalized = normalize(&joined);

        // Component-wise, so `/srv/root2` is not inside `/srv/root`.
        if !normalized.starts_with(&self.root) {
            return Err(ResolveError::PathTraversal(target.to_string()));
        }

        Ok(normalized)
    }

    /// Resolve a request target to the file that should be served for it.
    ///
    /// On top of [`PathResolver::confine`], existing paths are canonicalized and
    /// checked again so symlinks cannot lead outside the root, and directories are
    /// mapped to their default document, which is checked the same way. A path
    /// that cannot be looked up is returned as is; the failure surfaces when the
    /// file is read.
    pub async fn resolve(&self, target: &str) -> Result<PathBuf, ResolveError> {
        let mut path = self.canonical_within_root(self.confine(target)?, target).await?;

        if let Ok(metadata) = tokio::fs::metadata(&path).await {
            if metadata.is_dir() {
                path.push(&self.default_document);
                path = self.canonical_within_root(path, target).await?;
            }
        }

        debug!("Resolved {target} to {}", path.display());
        Ok(path)
    }

    /// Canonicalize `path` if it exists and make sure it is still under the root.
    async fn canonical_within_root(&self, path: PathBuf, target: &str) -> Result<PathBuf, ResolveError> {
        match tokio::fs::canonicalize(&path).await {
            Ok(canonical) if !canonical.starts_with(&self.root) => {
                Err(ResolveError::PathTraversal(target.to_string()))
            }
            Ok(canonical) => Ok(canonical),
            Err(_) => Ok(path),
        }
    }
}
