// src/core/guard.rs
//
// Process-wide subsystem lifetimes. One guard per subsystem; the image guard
// borrows the video guard so it can never outlive it.

use log::info;

use crate::core::platform::api::Platform;
use crate::error::{AppError, PlatformResultExt, Result};

/// Shared owning/empty state machine for both guards.
struct Subsystem<'p, P: Platform> {
    platform: &'p P,
    owning: bool,
    quit: fn(&P),
    name: &'static str,
}

impl<P: Platform> Subsystem<'_, P> {
    fn shutdown(&mut self) {
        if std::mem::take(&mut self.owning) {
            (self.quit)(self.platform);
            info!("{} subsystem shut down", self.name);
        }
    }
}

impl<P: Platform> Drop for Subsystem<'_, P> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Owns "video subsystem is initialized".
pub struct SubsystemGuard<'p, P: Platform> {
    inner: Subsystem<'p, P>,
}

impl<'p, P: Platform> SubsystemGuard<'p, P> {
    pub fn init(platform: &'p P) -> Result<Self> {
        platform
            .init_video()
            .or_init_error("video subsystem initialization")?;
        info!("video subsystem initialized");

        Ok(Self {
            inner: Subsystem {
                platform,
                owning: true,
                quit: P::quit_video,
                name: "video",
            },
        })
    }

    pub fn platform(&self) -> &'p P {
        self.inner.platform
    }

    pub fn is_owning(&self) -> bool {
        self.inner.owning
    }

    /// Tear the subsystem down now. Later calls and the eventual drop are no-ops.
    pub fn shutdown(&mut self) {
        self.inner.shutdown();
    }
}

/// Owns "image decoding subsystem is initialized".
pub struct ImageSubsystemGuard<'v, P: Platform> {
    inner: Subsystem<'v, P>,
}

impl<'v, P: Platform> ImageSubsystemGuard<'v, P> {
    pub fn init(video: &'v SubsystemGuard<'_, P>) -> Result<Self> {
        if !video.is_owning() {
            return Err(AppError::initialization(
                "image subsystem initialization",
                "video subsystem is not running",
            ));
        }

        let platform = video.platform();
        platform
            .init_image()
            .or_init_error("image subsystem initialization")?;
        info!("image subsystem initialized");

        Ok(Self {
            inner: Subsystem {
                platform,
                owning: true,
                quit: P::quit_image,
                name: "image",
            },
        })
    }

    pub fn is_owning(&self) -> bool {
        self.inner.owning
    }

    pub fn shutdown(&mut self) {
        self.inner.shutdown();
    }
}
