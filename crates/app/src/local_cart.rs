//! Local cart file
//!
//! While signed out the cart lives in a JSON file instead of on the server.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use canteen::cart::Cart;
use thiserror::Error;
use tracing::debug;

/// Errors raised reading or writing the local cart file.
#[derive(Debug, Error)]
pub enum LocalCartError {
    /// The file could not be read or written.
    #[error("failed to access cart file {path}")]
    Io {
        /// Cart file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The file holds something other than a valid cart.
    #[error("cart file {path} is corrupt")]
    Corrupt {
        /// Cart file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// JSON file holding a signed-out user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCartFile {
    path: PathBuf,
}

impl LocalCartFile {
    /// Use the cart file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cart. A missing file is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`LocalCartError`] if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Cart, LocalCartError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Cart::new()),
            Err(source) => {
                return Err(LocalCartError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| LocalCartError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the cart, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns a [`LocalCartError`] if the file cannot be written.
    pub fn save(&self, cart: &Cart) -> Result<(), LocalCartError> {
        let contents = serde_json::to_string_pretty(cart).map_err(|source| {
            LocalCartError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, contents).map_err(|source| LocalCartError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), lines = cart.len(), "saved local cart");

        Ok(())
    }
}
