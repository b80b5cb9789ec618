//! Test data builders for checkpoint logs

use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

/// Builder for JSON-lines checkpoint logs
#[derive(Debug, Default)]
pub struct CheckpointLogBuilder {
    lines: Vec<Vec<u8>>,
}

impl CheckpointLogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A six-component pose record
    pub fn pose(self, key: &str, toi: u64, pose: [f64; 6]) -> Self {
        self.array(key, toi, &pose)
    }

    pub fn array(self, key: &str, toi: u64, values: &[f64]) -> Self {
        self.record(key, toi, "double_array", json!(values))
    }

    pub fn double(self, key: &str, toi: u64, value: f64) -> Self {
        self.record(key, toi, "double", json!(value))
    }

    pub fn text(self, key: &str, toi: u64, value: &str) -> Self {
        self.record(key, toi, "string", json!(value))
    }

    pub fn bytes(self, key: &str, toi: u64, value: &[u8]) -> Self {
        self.record(key, toi, "any", json!(value))
    }

    pub fn record(mut self, key: &str, toi: u64, tag: &str, value: serde_json::Value) -> Self {
        self.lines.push(
            json!({ "key": key, "toi": toi, "type": tag, "value": value })
                .to_string()
                .into_bytes(),
        );
        self
    }

    /// Append a line verbatim
    pub fn raw(self, line: &str) -> Self {
        self.raw_bytes(line.as_bytes())
    }

    /// Append a line verbatim, without requiring valid UTF-8
    pub fn raw_bytes(mut self, line: &[u8]) -> Self {
        self.lines.push(line.to_vec());
        self
    }

    pub fn build_bytes(self) -> Vec<u8> {
        let mut bytes = self.lines.join(&b'\n');
        bytes.push(b'\n');
        bytes
    }

    pub fn build(self) -> String {
        String::from_utf8(self.build_bytes()).unwrap()
    }

    /// Write the log to a temporary file that lives as long as the handle
    pub fn write(self) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&self.build_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_log_builder() {
        let text = CheckpointLogBuilder::new()
            .double("a", 1, 0.5)
            .raw("garbage")
            .build();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"type\":\"double\""));
        assert_eq!(lines[1], "garbage");
    }
}
