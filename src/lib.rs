pub mod canvas;
pub mod config;
pub mod convert;
pub mod display;
pub mod errors;
pub mod loader;
pub mod sink;
