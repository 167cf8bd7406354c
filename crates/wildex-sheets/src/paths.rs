//! Path resolution for run folders and resume files

use crate::resume::RESUME_FILE_EXTENSION_PREFIX;
use std::path::{Component, Path, PathBuf};

/// Keeps only the normal components of `name`, so joining the result never
/// leaves the base folder
fn confined(name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

/// Resolves the folder layout of one download run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub download_root: PathBuf,
    /// Export the run is named after (the original export when resuming)
    pub source_file: PathBuf,
}

impl RunPaths {
    pub fn new(download_root: impl Into<PathBuf>, source_file: impl Into<PathBuf>) -> Self {
        Self {
            download_root: download_root.into(),
            source_file: source_file.into(),
        }
    }

    /// Source file name without its last extension
    pub fn stem(&self) -> String {
        self.source_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Folder wrapping every individual's folder
    pub fn run_root(&self) -> PathBuf {
        self.download_root.join(self.stem())
    }

    /// Folder for one individual, always inside the run root
    pub fn identity_folder(&self, identity: &str) -> PathBuf {
        self.run_root().join(confined(identity))
    }

    /// Crop destination directly inside the individual's folder
    pub fn annotation_file(&self, identity: &str, file_name: &str) -> PathBuf {
        let folder = self.identity_folder(identity);
        match Path::new(file_name).file_name() {
            Some(name) => folder.join(name),
            None => folder,
        }
    }

    /// `<run_root>/<stem>.resume.<ext>`
    pub fn resume_file(&self) -> PathBuf {
        let ext = self
            .source_file
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        self.run_root()
            .join(format!("{}.{}{}", self.stem(), RESUME_FILE_EXTENSION_PREFIX, ext))
    }
}

/// Default download root: the user's Downloads folder, else home, else cwd
pub fn default_download_root() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| Path::new(".").to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_root_named_after_source_stem() {
        let paths = RunPaths::new("/downloads", "/exports/whales.xlsx");
        assert_eq!(paths.stem(), "whales");
        assert_eq!(paths.run_root(), PathBuf::from("/downloads/whales"));
        assert_eq!(
            paths.identity_folder("Zara"),
            PathBuf::from("/downloads/whales/Zara")
        );
    }

    #[test]
    fn test_identity_and_file_stay_in_run_root() {
        let paths = RunPaths::new("/downloads", "/exports/whales.xlsx");
        assert_eq!(
            paths.identity_folder("/etc/cron.d"),
            PathBuf::from("/downloads/whales/etc/cron.d")
        );
        assert_eq!(
            paths.identity_folder("../../Zara"),
            PathBuf::from("/downloads/whales/Zara")
        );
        assert_eq!(
            paths.annotation_file("Zara", "/tmp/a1.jpg.jpg"),
            PathBuf::from("/downloads/whales/Zara/a1.jpg.jpg")
        );
        assert_eq!(
            paths.annotation_file("Zara", "../../a1.jpg.jpg"),
            PathBuf::from("/downloads/whales/Zara/a1.jpg.jpg")
        );
    }

    #[test]
    fn test_resume_file_name() {
        let paths = RunPaths::new("/downloads", "/exports/whales.xlsx");
        assert_eq!(
            paths.resume_file(),
            PathBuf::from("/downloads/whales/whales.resume.xlsx")
        );
    }

    #[test]
    fn test_resume_file_without_extension() {
        let paths = RunPaths::new("/downloads", "/exports/whales");
        assert_eq!(
            paths.resume_file(),
            PathBuf::from("/downloads/whales/whales.resume")
        );
    }

    #[test]
    fn test_default_download_root_is_not_empty() {
        assert!(!default_download_root().as_os_str().is_empty());
    }
}
