pub mod cache;
pub mod context;
pub mod cpu;
pub mod pass;
pub mod scene;
pub mod shapes;
pub mod surface;
