// src/aircraft/mod.rs
pub mod motion;

pub use motion::MotionModel;
