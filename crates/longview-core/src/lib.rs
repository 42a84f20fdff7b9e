pub mod buffer;
pub mod config;
pub mod consts;
pub mod decoder;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod physics;
pub mod render;
pub mod viewer;
pub mod viewport;
