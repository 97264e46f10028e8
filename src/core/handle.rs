// src/core/handle.rs

use std::fmt;

use log::info;

use crate::core::guard::SubsystemGuard;
use crate::core::platform::api::{Platform, RendererOptions, WindowConfig};
use crate::error::{AppError, PlatformResultExt, Result};

/// Scoped owner of a single foreign handle.
///
/// The release function is fixed per handle kind at construction. It runs at
/// most once: on [`HandleOwner::release`] or on drop, whichever comes first.
/// [`HandleOwner::into_raw`] gives the handle back without releasing it.
pub struct HandleOwner<'p, P: Platform, H: Copy> {
    platform: &'p P,
    handle: Option<H>,
    releaser: fn(&P, H),
    kind: &'static str,
}

pub type WindowOwner<'p, P> = HandleOwner<'p, P, <P as Platform>::Window>;
pub type RendererOwner<'p, P> = HandleOwner<'p, P, <P as Platform>::Renderer>;
pub type SurfaceOwner<'p, P> = HandleOwner<'p, P, <P as Platform>::Surface>;
pub type TextureOwner<'p, P> = HandleOwner<'p, P, <P as Platform>::Texture>;

impl<'p, P: Platform, H: Copy> HandleOwner<'p, P, H> {
    pub fn new(platform: &'p P, handle: H, releaser: fn(&P, H), kind: &'static str) -> Self {
        Self {
            platform,
            handle: Some(handle),
            releaser,
            kind,
        }
    }

    /// Raw handle for passing to platform calls; ownership stays here.
    pub fn get(&self) -> Option<H> {
        self.handle
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    pub fn platform(&self) -> &'p P {
        self.platform
    }

    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            (self.releaser)(self.platform, handle);
        }
    }

    /// Give up ownership; the caller becomes responsible for releasing.
    pub fn into_raw(mut self) -> Option<H> {
        self.handle.take()
    }
}

impl<P: Platform, H: Copy> Drop for HandleOwner<'_, P, H> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<P: Platform, H: Copy + fmt::Debug> fmt::Debug for HandleOwner<'_, P, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleOwner")
            .field("kind", &self.kind)
            .field("handle", &self.handle)
            .finish()
    }
}

/// Open a window. Borrowing the video guard keeps the subsystem alive for
/// as long as the window is.
pub fn create_window<'v, P: Platform>(
    video: &'v SubsystemGuard<'_, P>,
    config: &WindowConfig,
) -> Result<WindowOwner<'v, P>> {
    let platform = video.platform();
    let window = platform
        .create_window(config)
        .or_init_error("window creation")?;
    info!(
        "window \"{}\" created ({}x{})",
        config.title, config.width, config.height
    );
    Ok(HandleOwner::new(platform, window, P::destroy_window, "window"))
}

/// Create a renderer bound to `window`'s surface.
pub fn create_renderer<'w, P: Platform>(
    window: &'w WindowOwner<'_, P>,
    options: RendererOptions,
) -> Result<RendererOwner<'w, P>> {
    let platform = window.platform();
    let Some(raw) = window.get() else {
        return Err(AppError::initialization(
            "renderer creation",
            "window handle is empty",
        ));
    };
    let renderer = platform
        .create_renderer(raw, options)
        .or_init_error("renderer creation")?;
    info!(
        "renderer created (accelerated: {}, vsync: {})",
        options.accelerated, options.present_vsync
    );
    Ok(HandleOwner::new(
        platform,
        renderer,
        P::destroy_renderer,
        "renderer",
    ))
}
