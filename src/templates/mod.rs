//! Template renderers: turn one configuration record into the composites it produces.
//!
//! Composites come back silent; background audio is attached by the batch driver.

pub mod single;
pub mod stacked;

use crate::config::model::MemeConfig;
use crate::foundation::error::MemeResult;
use crate::render::composite::Composite;
use crate::video::clip::VideoClip;

/// Load the record's videos and build one composite per output file, in caption order.
#[tracing::instrument(skip_all, fields(template = meme.template_id()))]
pub fn compose_meme(meme: &MemeConfig) -> MemeResult<Vec<Composite>> {
    match meme {
        MemeConfig::SingleVideo(m) => {
            let video = VideoClip::load(&m.video_path)?;
            single::compose(m, &video)
        }
        MemeConfig::StackedVideo(m) => {
            let top = VideoClip::load(&m.top_video_path)?;
            let bottom = VideoClip::load(&m.bottom_video_path)?;
            stacked::compose(m, &top, &bottom)
        }
    }
}
