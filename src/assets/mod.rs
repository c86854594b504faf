pub mod color;
pub mod media;
