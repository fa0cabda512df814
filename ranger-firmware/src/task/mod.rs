pub mod edge_capture;
pub mod measure;
pub mod render;
pub mod trigger;
