//! Compositing: the layered composite model and the CPU renderer that turns it into frames.

pub mod blend;
pub mod composite;
pub mod frame;
pub mod renderer;
