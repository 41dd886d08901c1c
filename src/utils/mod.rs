pub mod debug;
pub mod display;
