//! Image download and bounding-box cropping

mod config;
mod crop;
mod error;
mod fetcher;

pub use config::{FetchConfig, DEFAULT_TIMEOUT_SECS};
pub use crop::{crop, crop_and_save};
pub use error::FetchError;
pub use fetcher::{HttpImageSaver, ImageSaver};
