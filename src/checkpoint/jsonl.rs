//! JSON-lines checkpoint source
//!
//! Each non-blank line holds one record:
//!
//! ```text
//! {"key": ".gams.frames.p1_base_footprint.origin", "toi": 1534412859, "type": "double_array", "value": [1.0, 2.0, 0.0, 0.0, 0.0, 1.57]}
//! ```
//!
//! Supported `type` tags are `double`, `double_array`, `string` and `any`
//! (an array of byte values). Lines are read one at a time.

use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{PlaybackError, Result};

use super::{LogSource, RawDecodeError, RawRecord, RawValue, TypeTag};

/// A raw record value read from a JSON-lines checkpoint
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValue {
    tag: String,
    toi: u64,
    payload: Value,
}

impl JsonValue {
    pub fn new(tag: impl Into<String>, toi: u64, payload: Value) -> Self {
        Self {
            tag: tag.into(),
            toi,
            payload,
        }
    }
}

impl RawValue for JsonValue {
    fn type_tag(&self) -> TypeTag {
        match self.tag.as_str() {
            "double" => TypeTag::Double,
            "double_array" => TypeTag::DoubleArray,
            "string" => TypeTag::String,
            "any" => TypeTag::Any,
            other => TypeTag::Unknown(other.to_string()),
        }
    }

    fn toi(&self) -> u64 {
        self.toi
    }

    fn to_double(&self) -> std::result::Result<f64, RawDecodeError> {
        self.payload
            .as_f64()
            .ok_or_else(|| RawDecodeError::new("value is not a number"))
    }

    fn to_double_array(&self) -> std::result::Result<Vec<f64>, RawDecodeError> {
        let items = self
            .payload
            .as_array()
            .ok_or_else(|| RawDecodeError::new("value is not an array"))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_f64()
                    .ok_or_else(|| RawDecodeError(format!("element {} is not a number", i)))
            })
            .collect()
    }

    fn to_text(&self) -> std::result::Result<String, RawDecodeError> {
        self.payload
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| RawDecodeError::new("value is not a string"))
    }

    fn to_bytes(&self) -> std::result::Result<Vec<u8>, RawDecodeError> {
        let items = self
            .payload
            .as_array()
            .ok_or_else(|| RawDecodeError::new("value is not a byte array"))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_u64()
                    .and_then(|b| u8::try_from(b).ok())
                    .ok_or_else(|| RawDecodeError(format!("element {} is not a byte", i)))
            })
            .collect()
    }
}

/// Line-oriented checkpoint source backed by any buffered reader
#[derive(Debug)]
pub struct JsonLinesSource<R = BufReader<File>> {
    reader: R,
    path: Option<PathBuf>,
    line_no: usize,
    buf: Vec<u8>,
    finished: bool,
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a checkpoint file
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PlaybackError::LogUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Opened checkpoint log {:?}", path);

        let mut source = Self::from_reader(BufReader::new(file));
        source.path = Some(path.to_path_buf());
        Ok(source)
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Read records from an already-open reader
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            path: None,
            line_no: 0,
            buf: Vec::new(),
            finished: false,
        }
    }

    /// Path of the underlying file, if opened from disk
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of lines consumed so far
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    fn line_location(&self) -> String {
        format!("<line {}>", self.line_no)
    }

    fn parse_line(&self, line: &str) -> RawRecord<JsonValue> {
        let malformed = |location: String, reason: String| RawRecord::Malformed { location, reason };

        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => return malformed(self.line_location(), e.to_string()),
        };
        let Value::Object(mut obj) = value else {
            return malformed(self.line_location(), "record is not a JSON object".into());
        };
        let key = match obj.remove("key") {
            Some(Value::String(key)) => key,
            _ => return malformed(self.line_location(), "missing string \"key\"".into()),
        };
        let Some(toi) = obj.get("toi").and_then(Value::as_u64) else {
            return malformed(key, "missing or non-integer \"toi\"".into());
        };
        let tag = match obj.remove("type") {
            Some(Value::String(tag)) => tag,
            _ => return malformed(key, "missing string \"type\"".into()),
        };
        let payload = obj.remove("value").unwrap_or(Value::Null);

        RawRecord::Record {
            key,
            value: JsonValue::new(tag, toi, payload),
        }
    }
}

impl<R: BufRead> LogSource for JsonLinesSource<R> {
    type Value = JsonValue;

    fn next_record(&mut self) -> Option<RawRecord<JsonValue>> {
        if self.finished {
            return None;
        }

        loop {
            self.buf.clear();
            self.line_no += 1;
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {
                    // An undecodable line is fully consumed; later lines still parse
                    let line = match std::str::from_utf8(&self.buf) {
                        Ok(line) => line.trim(),
                        Err(e) => {
                            return Some(RawRecord::Malformed {
                                location: self.line_location(),
                                reason: format!("line is not valid UTF-8: {}", e),
                            });
                        }
                    };
                    if line.is_empty() {
                        continue;
                    }
                    return Some(self.parse_line(line));
                }
                Err(e) => {
                    // A read failure mid-file leaves the rest of the log unreachable
                    self.finished = true;
                    return Some(RawRecord::Malformed {
                        location: self.line_location(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn source(text: &str) -> JsonLinesSource<Cursor<Vec<u8>>> {
        JsonLinesSource::from_reader(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_parses_all_tags() {
        let mut src = source(concat!(
            r#"{"key":"a","toi":1,"type":"double","value":1.5}"#,
            "\n",
            r#"{"key":"b","toi":2,"type":"double_array","value":[1,2,3]}"#,
            "\n",
            r#"{"key":"c","toi":3,"type":"string","value":"hi"}"#,
            "\n",
            r#"{"key":"d","toi":4,"type":"any","value":[0,255]}"#,
            "\n",
        ));

        let mut tags = Vec::new();
        while let Some(RawRecord::Record { key, value }) = src.next_record() {
            tags.push((key, value.type_tag()));
        }
        assert_eq!(
            tags,
            vec![
                ("a".to_string(), TypeTag::Double),
                ("b".to_string(), TypeTag::DoubleArray),
                ("c".to_string(), TypeTag::String),
                ("d".to_string(), TypeTag::Any),
            ]
        );
        assert!(src.next_record().is_none());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut src = source("\n\n{\"key\":\"a\",\"toi\":1,\"type\":\"double\",\"value\":1}\n\n");
        assert!(matches!(src.next_record(), Some(RawRecord::Record { .. })));
        assert!(src.next_record().is_none());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let mut src = source("{\"key\":\"a\",\"toi\":1,\"type\":\"double\",\"value\":1}\nnot json\n");
        assert!(matches!(src.next_record(), Some(RawRecord::Record { .. })));
        match src.next_record() {
            Some(RawRecord::Malformed { location, .. }) => assert_eq!(location, "<line 2>"),
            other => panic!("expected malformed record, got {:?}", other),
        }
        assert!(src.next_record().is_none());
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_the_log() {
        let mut bytes = br#"{"key":"a.origin","toi":1,"type":"double","value":1}"#.to_vec();
        bytes.extend_from_slice(b"\n{\"key\":\"b\xff\",\"toi\":2,\"type\":\"double\",\"value\":2}\n");
        bytes.extend_from_slice(br#"{"key":"c.origin","toi":3,"type":"double","value":3}"#);
        let mut src = JsonLinesSource::from_reader(Cursor::new(bytes));

        assert!(matches!(src.next_record(), Some(RawRecord::Record { ref key, .. }) if key == "a.origin"));
        match src.next_record() {
            Some(RawRecord::Malformed { location, reason }) => {
                assert_eq!(location, "<line 2>");
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
        assert!(matches!(src.next_record(), Some(RawRecord::Record { ref key, .. }) if key == "c.origin"));
        assert!(src.next_record().is_none());
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device gone"))
        }
    }

    #[test]
    fn test_read_error_ends_the_log() {
        let first = Cursor::new(b"{\"key\":\"a\",\"toi\":1,\"type\":\"double\",\"value\":1}\n".to_vec());
        let mut src = JsonLinesSource::from_reader(BufReader::new(first.chain(BrokenReader)));

        assert!(matches!(src.next_record(), Some(RawRecord::Record { .. })));
        match src.next_record() {
            Some(RawRecord::Malformed { location, reason }) => {
                assert_eq!(location, "<line 2>");
                assert!(reason.contains("device gone"));
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
        assert!(src.next_record().is_none());
    }

    #[test]
    fn test_missing_toi_reports_key() {
        let mut src = source(r#"{"key":"k.origin","type":"double","value":1}"#);
        match src.next_record() {
            Some(RawRecord::Malformed { location, reason }) => {
                assert_eq!(location, "k.origin");
                assert!(reason.contains("toi"));
            }
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_value_decoding_failures() {
        let v = JsonValue::new("double_array", 1, serde_json::json!([1.0, "x"]));
        assert_eq!(
            v.to_double_array().unwrap_err().to_string(),
            "element 1 is not a number"
        );

        let v = JsonValue::new("any", 1, serde_json::json!([1, 256]));
        assert!(v.to_bytes().is_err());

        let v = JsonValue::new("quaternion", 1, Value::Null);
        assert_eq!(v.type_tag(), TypeTag::Unknown("quaternion".into()));
    }

    #[test]
    fn test_open_missing_file_is_unreadable() {
        let err = JsonLinesSource::open("/definitely/not/here.jsonl").unwrap_err();
        assert!(err.is_log_unreadable());
    }
}
