// src/main.rs
use std::process::ExitCode;

use sdl_env::app::{self, App};
use sdl_env::config::AppConfig;
use sdl_env::core::platform::backend::SelectedPlatform;
use sdl_env::error::Result;

fn launch() -> Result<u64> {
    let platform = SelectedPlatform::load()?;
    App::new(&platform, AppConfig::default()).run()
}

fn main() -> ExitCode {
    env_logger::init();

    ExitCode::from(app::report(launch(), &mut std::io::stderr()))
}
