pub mod application;
pub mod config;
pub mod graphics;
pub mod logging;
pub mod math;
pub mod timing;
pub mod wayland;
