#![allow(clippy::uninlined_format_args)]

pub mod app;
pub mod card;
pub mod comments;
pub mod config;
pub mod data;
pub mod debug;
pub mod dispatch;
pub mod image_state;
pub mod links;
pub mod media;
pub mod resolver;
pub mod ui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use app::run;
