pub mod download;
pub mod plan;
pub mod resume_info;
pub mod version;
