// src/core/mod.rs
pub mod guard;
pub mod handle;
pub mod platform;
pub mod texture;
