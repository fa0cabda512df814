//! Board resources and shared state
pub mod channels;
pub mod resources;
pub mod screen;
