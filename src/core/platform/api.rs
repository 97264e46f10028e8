// src/core/platform/api.rs

use std::fmt::Debug;
use std::path::Path;

/// Diagnostic text reported by the native library.
pub type PlatformResult<T> = std::result::Result<T, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(0xFF, 0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgba(0x00, 0x00, 0x00, 0xFF);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Mirror flags for a textured draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    /// Bit layout used by `SDL_RendererFlip`.
    pub const fn bits(self) -> i32 {
        match self {
            Flip::None => 0,
            Flip::Horizontal => 1,
            Flip::Vertical => 2,
            Flip::Both => 3,
        }
    }
}

/// The only event kind the application reacts to is `Quit`; everything
/// else is carried through with its raw type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Quit,
    Other(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererOptions {
    pub accelerated: bool,
    pub present_vsync: bool, // frame pacing comes from here, not from the loop
}

/// Boundary to the native multimedia library.
///
/// Every `create_*`/`load_*` call hands out a handle the caller now owns and
/// must return through the matching `destroy_*`/`free_*` call exactly once.
/// The owning wrappers in [`crate::core::handle`] and [`crate::core::guard`]
/// take care of that; nothing else should call the release functions.
pub trait Platform {
    type Window: Copy + Debug;
    type Renderer: Copy + Debug;
    type Surface: Copy + Debug;
    type Texture: Copy + Debug;

    /// Start the video subsystem.
    fn init_video(&self) -> PlatformResult<()>;
    fn quit_video(&self);

    /// Start the image decoding subsystem (PNG support is required).
    /// Only valid while the video subsystem is running.
    fn init_image(&self) -> PlatformResult<()>;
    fn quit_image(&self);

    fn create_window(&self, config: &WindowConfig) -> PlatformResult<Self::Window>;
    fn destroy_window(&self, window: Self::Window);

    fn create_renderer(
        &self,
        window: Self::Window,
        options: RendererOptions,
    ) -> PlatformResult<Self::Renderer>;
    fn destroy_renderer(&self, renderer: Self::Renderer);

    /// Decode an image file into a CPU-side surface.
    fn load_surface(&self, path: &Path) -> PlatformResult<Self::Surface>;
    fn free_surface(&self, surface: Self::Surface);
    fn surface_size(&self, surface: Self::Surface) -> (u32, u32);

    /// Upload a surface into a texture owned by `renderer`.
    fn create_texture(
        &self,
        renderer: Self::Renderer,
        surface: Self::Surface,
    ) -> PlatformResult<Self::Texture>;
    fn destroy_texture(&self, texture: Self::Texture);

    #[allow(clippy::too_many_arguments)]
    fn copy_texture(
        &self,
        renderer: Self::Renderer,
        texture: Self::Texture,
        src: Option<Rect>,
        dst: Rect,
        angle: f64,
        center: Option<Point>,
        flip: Flip,
    ) -> PlatformResult<()>;

    /// Non-blocking; `None` once the pending queue is drained.
    fn poll_event(&self) -> Option<Event>;

    fn set_draw_color(&self, renderer: Self::Renderer, color: Color) -> PlatformResult<()>;
    fn clear(&self, renderer: Self::Renderer) -> PlatformResult<()>;
    fn present(&self, renderer: Self::Renderer);
}
