//! Analysis document persistence
//!
//! The analysis output is one JSON document holding every result plus the
//! list of files already analyzed; a later run resumes by loading it back.

use crate::core::errors::Result;
use crate::core::AnalysisOutput;
use std::fs;
use std::io::Write;
use std::path::Path;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_output(&mut self, output: &AnalysisOutput) -> Result<()> {
        let json = serde_json::to_string_pretty(output)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// Write the document to disk, replacing any previous version
pub fn save_output(output: &AnalysisOutput, path: &Path) -> Result<()> {
    let mut writer = JsonWriter::new(fs::File::create(path)?);
    writer.write_output(output)
}

/// Load a previously written document
pub fn load_output(path: &Path) -> Result<AnalysisOutput> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiagnosticMessage, EntityRecord, Location, UsageResult};
    use pretty_assertions::assert_eq;

    fn sample() -> AnalysisOutput {
        AnalysisOutput {
            results: vec![UsageResult {
                file_path: "src/user.ts".to_string(),
                location: Location::new(2, 0, 4, 1),
                message: DiagnosticMessage::Entity(EntityRecord {
                    name: "User".to_string(),
                }),
            }],
            done_files: vec!["src/user.ts".to_string()],
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        let output = sample();
        save_output(&output, &path).unwrap();
        let loaded = load_output(&path).unwrap();
        assert_eq!(loaded, output);
    }

    #[test]
    fn test_json_writer_shape() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer).write_output(&sample()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"results\""));
        assert!(text.contains("\"doneFiles\""));
        assert!(text.contains("\"kind\": \"entity\""));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_output(&dir.path().join("absent.json")).is_err());
    }
}
