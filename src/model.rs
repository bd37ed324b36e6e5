use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub filename: String,
    pub sha256: String,
    pub input_chars: usize,
    pub output_path: Option<String>,
    pub section_count: usize,
    pub total_content_length: usize,
    pub strategy: String,
    pub advisory_appended: bool,
    pub diagnostic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub source_directory: String,
    pub output_directory: String,
    pub report_type: String,
    pub file_count: usize,
    pub degraded_count: usize,
    pub files: Vec<BatchEntry>,
}
