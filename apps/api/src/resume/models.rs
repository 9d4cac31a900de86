//! Structured resume tree and bullet modifications.
//!
//! The tree arrives as arbitrary JSON from the structuring LLM (or back from the client).
//! It is converted once into an explicit three-case enum so the renderer can match
//! exhaustively instead of probing JSON types at every node.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResumeShapeError {
    #[error("resume must be a JSON object of sections, found {found}")]
    NotAnObject { found: &'static str },

    #[error("unexpected {found} at '{path}': expected a string, a list, or an object")]
    UnexpectedValue { path: String, found: &'static str },
}

/// One node of a resume section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    /// A single bullet line.
    Text(String),
    /// Siblings rendered at the same indent.
    List(Vec<SectionContent>),
    /// Named subsections (institutions, projects, ...), in source order. Names may be empty.
    Subsections(Vec<(String, SectionContent)>),
}

/// Ordered section name → content mapping. Section order mirrors the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredResume {
    sections: Vec<(String, SectionContent)>,
}

impl StructuredResume {
    pub fn sections(&self) -> &[(String, SectionContent)] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Every bullet string in document order, untrimmed.
    pub fn bullets(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for (_, content) in &self.sections {
            content.collect_bullets(&mut out);
        }
        out
    }
}

impl SectionContent {
    fn collect_bullets<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            SectionContent::Text(text) => out.push(text),
            SectionContent::List(items) => items.iter().for_each(|c| c.collect_bullets(out)),
            SectionContent::Subsections(subs) => {
                subs.iter().for_each(|(_, c)| c.collect_bullets(out))
            }
        }
    }

    fn from_value(value: &Value, path: &mut String) -> Result<Self, ResumeShapeError> {
        match value {
            Value::String(text) => Ok(SectionContent::Text(text.clone())),
            Value::Array(items) => {
                let mut children = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let len = path.len();
                    let _ = write!(path, "[{i}]");
                    children.push(Self::from_value(item, path)?);
                    path.truncate(len);
                }
                Ok(SectionContent::List(children))
            }
            Value::Object(map) => {
                let mut subs = Vec::with_capacity(map.len());
                for (key, child) in map {
                    let len = path.len();
                    path.push('.');
                    path.push_str(key);
                    subs.push((key.clone(), Self::from_value(child, path)?));
                    path.truncate(len);
                }
                Ok(SectionContent::Subsections(subs))
            }
            other => Err(ResumeShapeError::UnexpectedValue {
                path: path.clone(),
                found: json_kind(other),
            }),
        }
    }
}

impl TryFrom<&Value> for StructuredResume {
    type Error = ResumeShapeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let map = value.as_object().ok_or(ResumeShapeError::NotAnObject {
            found: json_kind(value),
        })?;

        let mut sections = Vec::with_capacity(map.len());
        for (name, content) in map {
            let mut path = name.clone();
            sections.push((name.clone(), SectionContent::from_value(content, &mut path)?));
        }
        Ok(Self { sections })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

impl Serialize for SectionContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SectionContent::Text(text) => serializer.serialize_str(text),
            SectionContent::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            SectionContent::Subsections(subs) => serialize_pairs(subs, serializer),
        }
    }
}

impl Serialize for StructuredResume {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_pairs(&self.sections, serializer)
    }
}

fn serialize_pairs<S: Serializer>(
    pairs: &[(String, SectionContent)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

/// A suggested replacement for one resume bullet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    pub original: String,
    pub improved: String,
}

/// Lookup from trimmed original bullet text to trimmed improved text.
///
/// Built once per render. When two modifications share an original, the later one wins.
#[derive(Debug, Clone, Default)]
pub struct ModificationMap {
    by_original: HashMap<String, String>,
}

impl ModificationMap {
    pub fn from_modifications(modifications: &[Modification]) -> Self {
        let by_original = modifications
            .iter()
            .map(|m| (m.original.trim().to_string(), m.improved.trim().to_string()))
            .collect();
        Self { by_original }
    }

    /// The improved text for an already-trimmed bullet, if it is non-empty and actually differs.
    pub fn improvement_for(&self, text: &str) -> Option<&str> {
        self.by_original
            .get(text)
            .map(String::as_str)
            .filter(|improved| !improved.is_empty() && *improved != text)
    }

    pub fn len(&self) -> usize {
        self.by_original.len()
    }
}
