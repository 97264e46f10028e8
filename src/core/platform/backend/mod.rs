// src/core/platform/backend/mod.rs
#[cfg(feature = "sdl")]
pub mod sdl;

#[cfg(test)]
pub(crate) mod mock;

// Re-export the selected backend under a common name:
#[cfg(feature = "sdl")]
pub use sdl::SdlPlatform as SelectedPlatform;
