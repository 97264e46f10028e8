// src/core/platform/backend/sdl.rs
//
// SDL2 + SDL2_image, opened at runtime through libloading.

use std::ffi::{CStr, CString, c_char, c_int};
use std::path::Path;
use std::ptr::{self, NonNull};

use libloading::Library;
use log::info;

use crate::core::platform::api::{
    Color, Event, Flip, Platform, PlatformResult, Point, Rect, RendererOptions, WindowConfig,
};
use crate::error::Result;

#[cfg(target_os = "macos")]
const SDL_LIB: &str = "libSDL2-2.0.0.dylib";
#[cfg(target_os = "macos")]
const IMG_LIB: &str = "libSDL2_image-2.0.0.dylib";
#[cfg(target_os = "windows")]
const SDL_LIB: &str = "SDL2.dll";
#[cfg(target_os = "windows")]
const IMG_LIB: &str = "SDL2_image.dll";
#[cfg(all(unix, not(target_os = "macos")))]
const SDL_LIB: &str = "libSDL2-2.0.so.0";
#[cfg(all(unix, not(target_os = "macos")))]
const IMG_LIB: &str = "libSDL2_image-2.0.so.0";

const SDL_INIT_VIDEO: u32 = 0x0000_0020;
const IMG_INIT_PNG: c_int = 0x0000_0002;
const SDL_WINDOWPOS_UNDEFINED: c_int = 0x1FFF_0000;
const SDL_WINDOW_SHOWN: u32 = 0x0000_0004;
const SDL_RENDERER_ACCELERATED: u32 = 0x0000_0002;
const SDL_RENDERER_PRESENTVSYNC: u32 = 0x0000_0004;
const SDL_QUIT: u32 = 0x100;

/// Opaque native types; only ever used behind pointers.
#[repr(C)]
pub struct SdlWindow {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct SdlRenderer {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct SdlSurface {
    _opaque: [u8; 0],
}
#[repr(C)]
pub struct SdlTexture {
    _opaque: [u8; 0],
}

// Leading fields of SDL_Surface; enough to read the pixel size.
#[repr(C)]
struct SurfaceHeader {
    _flags: u32,
    _format: *mut std::ffi::c_void,
    w: c_int,
    h: c_int,
}

#[repr(C)]
struct SdlRect {
    x: c_int,
    y: c_int,
    w: c_int,
    h: c_int,
}

impl From<Rect> for SdlRect {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            w: c_int::try_from(r.w).unwrap_or(c_int::MAX),
            h: c_int::try_from(r.h).unwrap_or(c_int::MAX),
        }
    }
}

#[repr(C)]
struct SdlPoint {
    x: c_int,
    y: c_int,
}

// SDL_Event is a 56-byte union tagged by its first u32.
#[repr(C, align(8))]
struct SdlEvent {
    kind: u32,
    _payload: [u8; 52],
}

type WindowPtr = *mut SdlWindow;
type RendererPtr = *mut SdlRenderer;
type SurfacePtr = *mut SdlSurface;
type TexturePtr = *mut SdlTexture;

struct SdlFns {
    init: unsafe extern "C" fn(u32) -> c_int,
    quit: unsafe extern "C" fn(),
    get_error: unsafe extern "C" fn() -> *const c_char,
    create_window:
        unsafe extern "C" fn(*const c_char, c_int, c_int, c_int, c_int, u32) -> WindowPtr,
    destroy_window: unsafe extern "C" fn(WindowPtr),
    create_renderer: unsafe extern "C" fn(WindowPtr, c_int, u32) -> RendererPtr,
    destroy_renderer: unsafe extern "C" fn(RendererPtr),
    free_surface: unsafe extern "C" fn(SurfacePtr),
    create_texture_from_surface: unsafe extern "C" fn(RendererPtr, SurfacePtr) -> TexturePtr,
    destroy_texture: unsafe extern "C" fn(TexturePtr),
    render_copy_ex: unsafe extern "C" fn(
        RendererPtr,
        TexturePtr,
        *const SdlRect,
        *const SdlRect,
        f64,
        *const SdlPoint,
        c_int,
    ) -> c_int,
    poll_event: unsafe extern "C" fn(*mut SdlEvent) -> c_int,
    set_render_draw_color: unsafe extern "C" fn(RendererPtr, u8, u8, u8, u8) -> c_int,
    render_clear: unsafe extern "C" fn(RendererPtr) -> c_int,
    render_present: unsafe extern "C" fn(RendererPtr),
}

struct ImgFns {
    init: unsafe extern "C" fn(c_int) -> c_int,
    quit: unsafe extern "C" fn(),
    load: unsafe extern "C" fn(*const c_char) -> SurfacePtr,
}

/// Native SDL2 backend.
///
/// The function pointers are copied out of the libraries, so the libraries
/// are kept in the struct for as long as it lives.
pub struct SdlPlatform {
    sdl: SdlFns,
    img: ImgFns,
    _img_lib: Library,
    _sdl_lib: Library,
}

/// Copy a symbol out of `lib`. `T` must be the exact fn-pointer type.
unsafe fn symbol<T: Copy>(lib: &Library, name: &[u8]) -> Result<T> {
    let sym = unsafe { lib.get::<T>(name) }?;
    Ok(*sym)
}

impl SdlPlatform {
    pub fn load() -> Result<Self> {
        let sdl_lib = unsafe { Library::new(SDL_LIB) }?;
        let img_lib = unsafe { Library::new(IMG_LIB) }?;
        info!("loaded {SDL_LIB} and {IMG_LIB}");

        let sdl = unsafe {
            SdlFns {
                init: symbol(&sdl_lib, b"SDL_Init\0")?,
                quit: symbol(&sdl_lib, b"SDL_Quit\0")?,
                get_error: symbol(&sdl_lib, b"SDL_GetError\0")?,
                create_window: symbol(&sdl_lib, b"SDL_CreateWindow\0")?,
                destroy_window: symbol(&sdl_lib, b"SDL_DestroyWindow\0")?,
                create_renderer: symbol(&sdl_lib, b"SDL_CreateRenderer\0")?,
                destroy_renderer: symbol(&sdl_lib, b"SDL_DestroyRenderer\0")?,
                free_surface: symbol(&sdl_lib, b"SDL_FreeSurface\0")?,
                create_texture_from_surface: symbol(&sdl_lib, b"SDL_CreateTextureFromSurface\0")?,
                destroy_texture: symbol(&sdl_lib, b"SDL_DestroyTexture\0")?,
                render_copy_ex: symbol(&sdl_lib, b"SDL_RenderCopyEx\0")?,
                poll_event: symbol(&sdl_lib, b"SDL_PollEvent\0")?,
                set_render_draw_color: symbol(&sdl_lib, b"SDL_SetRenderDrawColor\0")?,
                render_clear: symbol(&sdl_lib, b"SDL_RenderClear\0")?,
                render_present: symbol(&sdl_lib, b"SDL_RenderPresent\0")?,
            }
        };
        let img = unsafe {
            ImgFns {
                init: symbol(&img_lib, b"IMG_Init\0")?,
                quit: symbol(&img_lib, b"IMG_Quit\0")?,
                load: symbol(&img_lib, b"IMG_Load\0")?,
            }
        };

        Ok(Self {
            sdl,
            img,
            _img_lib: img_lib,
            _sdl_lib: sdl_lib,
        })
    }

    fn last_error(&self) -> String {
        let msg = unsafe { (self.sdl.get_error)() };
        if msg.is_null() {
            return String::from("unknown SDL error");
        }
        unsafe { CStr::from_ptr(msg) }.to_string_lossy().into_owned()
    }

    fn check(&self, status: c_int) -> PlatformResult<()> {
        if status == 0 { Ok(()) } else { Err(self.last_error()) }
    }

    fn non_null<T>(&self, ptr: *mut T) -> PlatformResult<NonNull<T>> {
        NonNull::new(ptr).ok_or_else(|| self.last_error())
    }
}

impl Platform for SdlPlatform {
    type Window = NonNull<SdlWindow>;
    type Renderer = NonNull<SdlRenderer>;
    type Surface = NonNull<SdlSurface>;
    type Texture = NonNull<SdlTexture>;

    fn init_video(&self) -> PlatformResult<()> {
        self.check(unsafe { (self.sdl.init)(SDL_INIT_VIDEO) })
    }

    fn quit_video(&self) {
        unsafe { (self.sdl.quit)() }
    }

    fn init_image(&self) -> PlatformResult<()> {
        let loaded = unsafe { (self.img.init)(IMG_INIT_PNG) };
        if loaded & IMG_INIT_PNG != IMG_INIT_PNG {
            return Err(self.last_error());
        }
        Ok(())
    }

    fn quit_image(&self) {
        unsafe { (self.img.quit)() }
    }

    fn create_window(&self, config: &WindowConfig) -> PlatformResult<Self::Window> {
        let title = CString::new(config.title.as_str()).map_err(|e| e.to_string())?;
        let w = c_int::try_from(config.width).map_err(|e| e.to_string())?;
        let h = c_int::try_from(config.height).map_err(|e| e.to_string())?;
        let window = unsafe {
            (self.sdl.create_window)(
                title.as_ptr(),
                SDL_WINDOWPOS_UNDEFINED,
                SDL_WINDOWPOS_UNDEFINED,
                w,
                h,
                SDL_WINDOW_SHOWN,
            )
        };
        self.non_null(window)
    }

    fn destroy_window(&self, window: Self::Window) {
        unsafe { (self.sdl.destroy_window)(window.as_ptr()) }
    }

    fn create_renderer(
        &self,
        window: Self::Window,
        options: RendererOptions,
    ) -> PlatformResult<Self::Renderer> {
        let mut flags = 0;
        if options.accelerated {
            flags |= SDL_RENDERER_ACCELERATED;
        }
        if options.present_vsync {
            flags |= SDL_RENDERER_PRESENTVSYNC;
        }
        // -1: first driver supporting the flags
        let renderer = unsafe { (self.sdl.create_renderer)(window.as_ptr(), -1, flags) };
        self.non_null(renderer)
    }

    fn destroy_renderer(&self, renderer: Self::Renderer) {
        unsafe { (self.sdl.destroy_renderer)(renderer.as_ptr()) }
    }

    fn load_surface(&self, path: &Path) -> PlatformResult<Self::Surface> {
        let c_path =
            CString::new(path.to_string_lossy().as_bytes()).map_err(|e| e.to_string())?;
        let surface = unsafe { (self.img.load)(c_path.as_ptr()) };
        self.non_null(surface)
    }

    fn free_surface(&self, surface: Self::Surface) {
        unsafe { (self.sdl.free_surface)(surface.as_ptr()) }
    }

    fn surface_size(&self, surface: Self::Surface) -> (u32, u32) {
        let header = unsafe { &*surface.as_ptr().cast::<SurfaceHeader>() };
        (
            u32::try_from(header.w).unwrap_or(0),
            u32::try_from(header.h).unwrap_or(0),
        )
    }

    fn create_texture(
        &self,
        renderer: Self::Renderer,
        surface: Self::Surface,
    ) -> PlatformResult<Self::Texture> {
        let texture =
            unsafe { (self.sdl.create_texture_from_surface)(renderer.as_ptr(), surface.as_ptr()) };
        self.non_null(texture)
    }

    fn destroy_texture(&self, texture: Self::Texture) {
        unsafe { (self.sdl.destroy_texture)(texture.as_ptr()) }
    }

    fn copy_texture(
        &self,
        renderer: Self::Renderer,
        texture: Self::Texture,
        src: Option<Rect>,
        dst: Rect,
        angle: f64,
        center: Option<Point>,
        flip: Flip,
    ) -> PlatformResult<()> {
        let src = src.map(SdlRect::from);
        let dst = SdlRect::from(dst);
        let center = center.map(|p| SdlPoint { x: p.x, y: p.y });

        let status = unsafe {
            (self.sdl.render_copy_ex)(
                renderer.as_ptr(),
                texture.as_ptr(),
                src.as_ref().map_or(ptr::null(), |r| r as *const SdlRect),
                &dst,
                angle,
                center.as_ref().map_or(ptr::null(), |p| p as *const SdlPoint),
                flip.bits(),
            )
        };
        self.check(status)
    }

    fn poll_event(&self) -> Option<Event> {
        let mut raw = SdlEvent {
            kind: 0,
            _payload: [0; 52],
        };
        if unsafe { (self.sdl.poll_event)(&mut raw) } == 0 {
            return None;
        }
        Some(match raw.kind {
            SDL_QUIT => Event::Quit,
            other => Event::Other(other),
        })
    }

    fn set_draw_color(&self, renderer: Self::Renderer, color: Color) -> PlatformResult<()> {
        let status = unsafe {
            (self.sdl.set_render_draw_color)(renderer.as_ptr(), color.r, color.g, color.b, color.a)
        };
        self.check(status)
    }

    fn clear(&self, renderer: Self::Renderer) -> PlatformResult<()> {
        self.check(unsafe { (self.sdl.render_clear)(renderer.as_ptr()) })
    }

    fn present(&self, renderer: Self::Renderer) {
        unsafe { (self.sdl.render_present)(renderer.as_ptr()) }
    }
}
