// src/config.rs
//
// Compile-time configuration. There is no config file or environment input
// besides RUST_LOG for the logger.

use crate::core::platform::api::{Color, RendererOptions, WindowConfig};

pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;
pub const WINDOW_TITLE: &str = "Environment";
pub const CLEAR_COLOR: Color = Color::WHITE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub renderer: RendererOptions,
    pub clear_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                title: WINDOW_TITLE.to_string(),
                width: SCREEN_WIDTH,
                height: SCREEN_HEIGHT,
            },
            renderer: RendererOptions {
                accelerated: true,
                present_vsync: true,
            },
            clear_color: CLEAR_COLOR,
        }
    }
}
