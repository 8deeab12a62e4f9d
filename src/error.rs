//! Crate-wide error type.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Everything that can go wrong while starting or configuring the
/// carousel.
///
/// Runtime rendering faults stay with [`wgpu::SurfaceError`] at the
/// render call, and image fetch or decode problems never surface here
/// because atlas composition falls back to placeholder artwork.
#[derive(Debug)]
pub enum MenuError {
    /// GPU bring-up failed; the carousel cannot start.
    Gpu(RenderContextError),
    /// The item list is not valid JSON for a list of menu items.
    Catalog(serde_json::Error),
    /// An options file would not parse or serialize as TOML.
    Options(String),
    /// Reading or writing a file on behalf of the caller failed.
    Io(std::io::Error),
    /// The atlas composer thread could not be spawned.
    AtlasThread(std::io::Error),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "graphics initialization failed: {e}"),
            Self::Catalog(e) => write!(f, "item list is not valid JSON: {e}"),
            Self::Options(msg) => write!(f, "options file rejected: {msg}"),
            Self::Io(e) => write!(f, "file access failed: {e}"),
            Self::AtlasThread(e) => {
                write!(f, "could not start the atlas thread: {e}")
            }
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::Io(e) | Self::AtlasThread(e) => Some(e),
            Self::Options(_) => None,
        }
    }
}

impl From<RenderContextError> for MenuError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(e: serde_json::Error) -> Self {
        Self::Catalog(e)
    }
}

impl From<std::io::Error> for MenuError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
