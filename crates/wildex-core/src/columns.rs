//! Column names used by encounter exports and resume files

/// Row-level identity of the individual
pub const IDENTITY: &str = "Name0.value";

/// Error message attached to a failed annotation in a resume file
pub const ERROR_MESSAGE: &str = "wildExErrorMessage";

/// Sheet holding the failed annotations of a resume file
pub const SEARCH_RESULTS_SHEET: &str = "Search Results";

/// Sheet holding the submission parameters of a resume file
pub const RESUME_INFORMATION_SHEET: &str = "Resume Information";

pub const DOWNLOAD_ROOT: &str = "downloadRoot";
pub const INPUT_XLSX: &str = "inputXlsx";
pub const UNIDENTIFIED_ENCOUNTERS: &str = "unidentifiedEncounters";
pub const NUM_ANNOTATIONS_PER_ID: &str = "numAnnotationsPerId";

/// Value of the match-against flag that marks a usable slot
pub const MATCH_AGAINST_TRUE: &str = "true";

pub fn match_against(slot: usize) -> String {
    format!("Annotation{}.MatchAgainst", slot)
}

pub fn viewpoint(slot: usize) -> String {
    format!("Annotation{}.ViewPoint", slot)
}

pub fn bbox(slot: usize) -> String {
    format!("Annotation{}.bbox", slot)
}

pub fn media_asset(slot: usize) -> String {
    format!("Encounter.mediaAsset{}", slot)
}

pub fn image_url(slot: usize) -> String {
    format!("Encounter.mediaAsset{}.imageUrl", slot)
}

/// Header of the failed-annotations sheet, in write order
pub fn search_results_header() -> Vec<String> {
    vec![
        IDENTITY.to_string(),
        media_asset(0),
        image_url(0),
        bbox(0),
        viewpoint(0),
        match_against(0),
        ERROR_MESSAGE.to_string(),
    ]
}

/// Header of the resume descriptor sheet, in write order
pub const RESUME_INFORMATION_HEADER: [&str; 4] = [
    DOWNLOAD_ROOT,
    INPUT_XLSX,
    UNIDENTIFIED_ENCOUNTERS,
    NUM_ANNOTATIONS_PER_ID,
];
