// src/core/platform/mod.rs
pub mod api;
pub mod backend;
