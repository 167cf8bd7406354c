use std::path::PathBuf;

/// Failure to fetch, crop or store one annotation image
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The image server answered with a non-2xx status.
    #[error("Failed to download image, status {0}")]
    HttpStatus(u16),

    #[error("Failed to download image: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The bounding box does not fit inside the image.
    #[error("Bad extract area {width}x{height}+{left}+{top} for {image_width}x{image_height} image")]
    BadExtractArea {
        left: u32,
        top: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Unsupported image format for {}", .0.display())]
    UnknownFormat(PathBuf),

    #[error("Failed to save image {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Crop task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
