pub mod api;
pub mod cli;
pub mod config;
pub mod console;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod render;
