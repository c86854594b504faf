//! Background audio: decoded clips, random selection from a directory, and fitting a track to a
//! composite's duration.

pub mod clip;
pub mod select;
