// src/app.rs

use std::io::Write;

use log::{debug, info, trace, warn};
use smallvec::SmallVec;

use crate::config::AppConfig;
use crate::core::guard::{ImageSubsystemGuard, SubsystemGuard};
use crate::core::handle::{RendererOwner, create_renderer, create_window};
use crate::core::platform::api::{Event, Platform};
use crate::error::Result;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

pub struct App<'p, P: Platform> {
    platform: &'p P,
    config: AppConfig,
}

impl<'p, P: Platform> App<'p, P> {
    pub fn new(platform: &'p P, config: AppConfig) -> Self {
        Self { platform, config }
    }

    /// Bring everything up, run until quit, tear down in reverse.
    /// Returns the number of frames presented.
    pub fn run(&self) -> Result<u64> {
        // Locals drop in reverse order: renderer, window, image, video.
        let video = SubsystemGuard::init(self.platform)?;
        let _image = ImageSubsystemGuard::init(&video)?;
        let window = create_window(&video, &self.config.window)?;
        let renderer = create_renderer(&window, self.config.renderer)?;

        let frames = self.event_loop(&renderer);
        info!("quit after {frames} frame(s)");
        Ok(frames)
    }

    fn event_loop(&self, renderer: &RendererOwner<'_, P>) -> u64 {
        let mut frames = 0;
        let mut quit = false;

        while !quit {
            // Drain everything pending before drawing.
            let events: SmallVec<[Event; 8]> =
                std::iter::from_fn(|| self.platform.poll_event()).collect();
            for event in &events {
                match event {
                    Event::Quit => {
                        info!("quit requested");
                        quit = true;
                    }
                    Event::Other(kind) => trace!("ignoring event {kind:#x}"),
                }
            }

            self.draw_frame(renderer);
            frames += 1;
        }
        frames
    }

    fn draw_frame(&self, renderer: &RendererOwner<'_, P>) {
        let Some(raw) = renderer.get() else {
            return;
        };

        if let Err(e) = self.platform.set_draw_color(raw, self.config.clear_color) {
            warn!("set draw color failed: {e}");
        }
        if let Err(e) = self.platform.clear(raw) {
            warn!("clear failed: {e}");
        }
        self.platform.present(raw);
    }
}

/// Turn the outcome of [`App::run`] into a process status, writing the
/// failure line to `err`.
pub fn report(result: Result<u64>, err: &mut impl Write) -> u8 {
    match result {
        Ok(frames) => {
            debug!("clean exit, {frames} frame(s)");
            EXIT_SUCCESS
        }
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            EXIT_FAILURE
        }
    }
}
