// src/core/platform/backend/mock.rs
//
// Recording backend used by the unit tests. Handles are plain ids; every
// call is appended to a log so tests can assert on ordering and counts.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::core::platform::api::{
    Color, Event, Flip, Platform, PlatformResult, Point, Rect, RendererOptions, WindowConfig,
};

pub const SURFACE_SIZE: (u32, u32) = (32, 16);

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    InitVideo,
    QuitVideo,
    InitImage,
    QuitImage,
    CreateWindow(u32),
    DestroyWindow(u32),
    CreateRenderer(u32),
    DestroyRenderer(u32),
    LoadSurface(PathBuf),
    FreeSurface(u32),
    CreateTexture(u32),
    DestroyTexture(u32),
    CopyTexture {
        texture: u32,
        src: Option<Rect>,
        dst: Rect,
        angle: f64,
        center: Option<Point>,
        flip: Flip,
    },
    SetDrawColor(Color),
    Clear,
    Present,
}

/// Step at which the mock reports a native failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    InitVideo,
    InitImage,
    CreateWindow,
    CreateRenderer,
    LoadSurface,
    CreateTexture,
    CopyTexture,
}

#[derive(Default)]
pub struct MockPlatform {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    fail_at: Cell<Option<Step>>,
    // `None` entries end the current drain without consuming later events.
    events: RefCell<VecDeque<Option<Event>>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(step: Step) -> Self {
        let platform = Self::default();
        platform.fail_at.set(Some(step));
        platform
    }

    /// Queue events; `None` marks the end of one frame's drain.
    pub fn with_events(self, events: impl IntoIterator<Item = Option<Event>>) -> Self {
        self.events.borrow_mut().extend(events);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn fails(&self, step: Step) -> bool {
        self.fail_at.get() == Some(step)
    }

    fn next(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn acquire(&self, step: Step, record: impl FnOnce(u32) -> Call) -> PlatformResult<u32> {
        if self.fails(step) {
            return Err(format!("mock: {step:?} failed"));
        }
        let id = self.next();
        self.record(record(id));
        Ok(id)
    }
}

impl Platform for MockPlatform {
    type Window = u32;
    type Renderer = u32;
    type Surface = u32;
    type Texture = u32;

    fn init_video(&self) -> PlatformResult<()> {
        self.record(Call::InitVideo);
        if self.fails(Step::InitVideo) {
            return Err("mock: no video device".into());
        }
        Ok(())
    }

    fn quit_video(&self) {
        self.record(Call::QuitVideo);
    }

    fn init_image(&self) -> PlatformResult<()> {
        self.record(Call::InitImage);
        if self.fails(Step::InitImage) {
            return Err("mock: png support missing".into());
        }
        Ok(())
    }

    fn quit_image(&self) {
        self.record(Call::QuitImage);
    }

    fn create_window(&self, _config: &WindowConfig) -> PlatformResult<u32> {
        self.acquire(Step::CreateWindow, Call::CreateWindow)
    }

    fn destroy_window(&self, window: u32) {
        self.record(Call::DestroyWindow(window));
    }

    fn create_renderer(&self, _window: u32, _options: RendererOptions) -> PlatformResult<u32> {
        self.acquire(Step::CreateRenderer, Call::CreateRenderer)
    }

    fn destroy_renderer(&self, renderer: u32) {
        self.record(Call::DestroyRenderer(renderer));
    }

    fn load_surface(&self, path: &Path) -> PlatformResult<u32> {
        self.record(Call::LoadSurface(path.to_path_buf()));
        if self.fails(Step::LoadSurface) {
            return Err(format!("mock: couldn't open {}", path.display()));
        }
        Ok(self.next())
    }

    fn free_surface(&self, surface: u32) {
        self.record(Call::FreeSurface(surface));
    }

    fn surface_size(&self, _surface: u32) -> (u32, u32) {
        SURFACE_SIZE
    }

    fn create_texture(&self, _renderer: u32, _surface: u32) -> PlatformResult<u32> {
        self.acquire(Step::CreateTexture, Call::CreateTexture)
    }

    fn destroy_texture(&self, texture: u32) {
        self.record(Call::DestroyTexture(texture));
    }

    fn copy_texture(
        &self,
        _renderer: u32,
        texture: u32,
        src: Option<Rect>,
        dst: Rect,
        angle: f64,
        center: Option<Point>,
        flip: Flip,
    ) -> PlatformResult<()> {
        self.record(Call::CopyTexture {
            texture,
            src,
            dst,
            angle,
            center,
            flip,
        });
        if self.fails(Step::CopyTexture) {
            return Err("mock: invalid texture".into());
        }
        Ok(())
    }

    fn poll_event(&self) -> Option<Event> {
        self.events.borrow_mut().pop_front().flatten()
    }

    fn set_draw_color(&self, _renderer: u32, color: Color) -> PlatformResult<()> {
        self.record(Call::SetDrawColor(color));
        Ok(())
    }

    fn clear(&self, _renderer: u32) -> PlatformResult<()> {
        self.record(Call::Clear);
        Ok(())
    }

    fn present(&self, _renderer: u32) {
        self.record(Call::Present);
    }
}
