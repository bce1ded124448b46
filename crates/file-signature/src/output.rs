//! Result types produced by parser dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::signature::SignatureMatch;

/// What the caller knows about the file besides its bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub file_name: String,
    pub size: u64,
    pub last_modified: Option<DateTime<Utc>>,
}

impl FileInfo {
    pub fn new(file_name: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size,
            last_modified: None,
        }
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub format: String,
    pub description: String,
    pub file_name: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub size: u64,
}

//  Metadata

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub label: String,
    pub value: String,
}

/// Label → value pairs in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: Vec<MetadataField>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an overwritten label keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, value: impl ToString) {
        let label = label.into();
        let value = value.to_string();
        match self.fields.iter_mut().find(|f| f.label == label) {
            Some(field) => field.value = value,
            None => self.fields.push(MetadataField { label, value }),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.label.as_str(), f.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Successful parse: the file, the signature that selected the parser, and
/// whatever header fields the parser extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOutput {
    pub file: FileDescriptor,
    pub signature: SignatureMatch,
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_preserves_insertion_order() {
        let mut metadata = Metadata::new();
        metadata.insert("Width", 640);
        metadata.insert("Height", 480);
        metadata.insert("Bit Depth", 8);
        metadata.insert("Width", 800);

        let labels: Vec<&str> = metadata.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Width", "Height", "Bit Depth"]);
        assert_eq!(metadata.get("Width"), Some("800"));
        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata.get("Missing"), None);
    }

    #[test]
    fn metadata_serializes_as_ordered_list() {
        let mut metadata = Metadata::new();
        metadata.insert("b", "2");
        metadata.insert("a", "1");
        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(
            json,
            r#"[{"label":"b","value":"2"},{"label":"a","value":"1"}]"#
        );
    }
}
