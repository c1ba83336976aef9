pub mod group;
pub mod linear;
