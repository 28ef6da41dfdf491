//! Selection of the latest existing tag for a search prefix

pub mod latest_tag;

pub use latest_tag::{LatestTagResolver, Origin};
