//! Error taxonomy for the viewport engine.
//!
//! Every fallible operation returns [`ViewportError`]. The raw input entry
//! points on the controller never surface these to the user: they log the
//! error and drop the gesture, so an error on the interactive path degrades to
//! "nothing happens".

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::doc::{ItemId, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    /// A transform operation ran before `open()` completed the initial layout.
    #[error("viewport is not initialized; call open() first")]
    NotInitialized,
    /// A transform operation ran while the view is hidden.
    #[error("viewport is closed")]
    ViewportClosed,
    /// The item is not present in the projection cache.
    #[error("unknown item: {0}")]
    InvalidItemReference(ItemId),
    /// The background tile image could not be loaded.
    #[error("failed to load tile asset {path}: {reason}")]
    AssetLoadFailure { path: String, reason: String },
    /// The viewport has no usable area.
    #[error("viewport has no area: {width}x{height}")]
    EmptyViewport { width: f64, height: f64 },
    /// The configuration failed validation.
    #[error("invalid viewport config: {0}")]
    InvalidConfig(String),
    /// The item store rejected a read or write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ViewportError {
    /// Stable machine-readable code for logs and the host UI.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotInitialized => "E_NOT_INITIALIZED",
            Self::ViewportClosed => "E_VIEWPORT_CLOSED",
            Self::InvalidItemReference(_) => "E_INVALID_ITEM",
            Self::AssetLoadFailure { .. } => "E_ASSET_LOAD",
            Self::EmptyViewport { .. } => "E_EMPTY_VIEWPORT",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            Self::Store(_) => "E_STORE",
        }
    }

    /// Whether the caller can retry the same operation after fixing state
    /// (opening the view, reloading the asset, resizing).
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized | Self::ViewportClosed | Self::AssetLoadFailure { .. } | Self::EmptyViewport { .. }
        )
    }
}
