use crate::domain::Document;
use std::fs;

pub struct FileRepository;

impl FileRepository {
    pub fn read_text(filename: &str) -> Result<String, String> {
        fs::read_to_string(filename).map_err(|e| e.to_string())
    }

    pub fn write_text(filename: &str, contents: &str) -> Result<String, String> {
        match fs::write(filename, contents) {
            Ok(_) => Ok(filename.to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    pub fn save_document(document: &Document, filename: &str) -> Result<String, String> {
        match serde_json::to_string_pretty(document) {
            Ok(json) => Self::write_text(filename, &json),
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }

    pub fn load_document(filename: &str) -> Result<(Document, String), String> {
        match Self::read_text(filename) {
            Ok(content) => match serde_json::from_str::<Document>(&content) {
                Ok(document) => Ok((document, filename.to_string())),
                Err(e) => Err(format!("Invalid file format - {}", e)),
            },
            Err(e) => Err(e),
        }
    }
}
