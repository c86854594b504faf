//! Video normalization: probing, looping, trimming, resizing, and frame streaming.

pub mod clip;
