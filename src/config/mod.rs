//! Meme configuration: the JSON wire format and its validated, per-template form.

pub mod load;
pub mod model;
