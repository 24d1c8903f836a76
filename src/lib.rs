//! Software-rendered wrap-around snake
//!
//! Everything here is platform independent: the game paints into a caller
//! supplied RGBA pixel buffer and reads keys from an [`input::InputLatch`].
//! The `smoking-snake` binary wires it to an SDL2 window.

pub mod config;
pub mod frame;
pub mod game;
pub mod grid;
pub mod input;
pub mod math;
pub mod raster;
pub mod render;
pub mod util;

pub use config::GameConfig;
pub use frame::FrameDriver;
