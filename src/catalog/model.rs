//! Deserializable representation of an Educational Theory Library document.
//!
//! Every field except `id` is optional and stays optional in memory: a field
//! missing from the document is `None`, a field present but empty is
//! `Some(vec![])`. Accessors paper over the difference for query code, while
//! serialization keeps it so exports reproduce exactly what was loaded.
//!
//! Decoding is lenient per field. A modeled field whose value has the wrong
//! shape (or is `null`) is left as `None` and its raw value is kept in
//! `extra`, so one odd field never costs the rest of the record, and a record
//! without a usable `id` is skipped without costing the rest of the document.

use crate::catalog::error::LoadError;
use crate::catalog::identity::{TheoryId, Theorists};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Top-level field holding the record array.
pub const THEORIES_FIELD: &str = "educational_theories";

#[derive(Clone, Debug, PartialEq, Serialize)]
/// One educational theory entry.
pub struct Theory {
    pub id: TheoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theory_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theorist: Option<Theorists>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_concepts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core_concepts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educational_applications: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_levels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_objectives: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_theories: Option<Vec<TheoryId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_principles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_prompt_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veteran_teacher_insights: Option<TeacherInsights>,
    /// Fields this crate does not model, plus modeled fields whose value could
    /// not be decoded, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
/// Classroom experience attached to a theory.
pub struct TeacherInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub practical_tips: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_challenges: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw object fields, drained one modeled key at a time.
struct LenientFields {
    fields: Map<String, Value>,
}

impl LenientFields {
    /// Decode `key` if present and well-formed; otherwise leave the raw value
    /// (including an explicit `null`) in place for `extra`.
    fn take<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let raw = self.fields.get(key)?;
        if raw.is_null() {
            return None;
        }
        match T::deserialize(raw) {
            Ok(value) => {
                self.fields.remove(key);
                Some(value)
            }
            Err(err) => {
                tracing::debug!(field = key, error = %err, "keeping undecodable field verbatim");
                None
            }
        }
    }

    fn into_extra(self) -> Map<String, Value> {
        self.fields
    }
}

impl<'de> Deserialize<'de> for Theory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let id = match fields.remove("id") {
            Some(raw) => TheoryId::deserialize(raw).map_err(D::Error::custom)?,
            None => return Err(D::Error::missing_field("id")),
        };
        let mut lenient = LenientFields { fields };
        Ok(Theory {
            id,
            theory_name: lenient.take("theory_name"),
            theorist: lenient.take("theorist"),
            category: lenient.take("category"),
            key_concepts: lenient.take("key_concepts"),
            core_concepts: lenient.take("core_concepts"),
            educational_applications: lenient.take("educational_applications"),
            grade_levels: lenient.take("grade_levels"),
            subjects: lenient.take("subjects"),
            learning_objectives: lenient.take("learning_objectives"),
            related_theories: lenient.take("related_theories"),
            key_principles: lenient.take("key_principles"),
            ai_prompt_template: lenient.take("ai_prompt_template"),
            veteran_teacher_insights: lenient.take("veteran_teacher_insights"),
            extra: lenient.into_extra(),
        })
    }
}

impl<'de> Deserialize<'de> for TeacherInsights {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let mut lenient = LenientFields { fields };
        Ok(TeacherInsights {
            practical_tips: lenient.take("practical_tips"),
            success_patterns: lenient.take("success_patterns"),
            common_challenges: lenient.take("common_challenges"),
            extra: lenient.into_extra(),
        })
    }
}

fn or_empty(field: &Option<Vec<String>>) -> &[String] {
    field.as_deref().unwrap_or(&[])
}

impl Theory {
    /// Minimal record carrying only an id and a name.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: TheoryId(id),
            theory_name: Some(name.into()),
            theorist: None,
            category: None,
            key_concepts: None,
            core_concepts: None,
            educational_applications: None,
            grade_levels: None,
            subjects: None,
            learning_objectives: None,
            related_theories: None,
            key_principles: None,
            ai_prompt_template: None,
            veteran_teacher_insights: None,
            extra: Map::new(),
        }
    }

    /// Name for display; falls back to the id when the record has no name.
    pub fn display_name(&self) -> String {
        match &self.theory_name {
            Some(name) => name.clone(),
            None => format!("Theory {}", self.id),
        }
    }

    pub fn key_concepts(&self) -> &[String] {
        or_empty(&self.key_concepts)
    }

    pub fn core_concepts(&self) -> &[String] {
        or_empty(&self.core_concepts)
    }

    pub fn educational_applications(&self) -> &[String] {
        or_empty(&self.educational_applications)
    }

    pub fn grade_levels(&self) -> &[String] {
        or_empty(&self.grade_levels)
    }

    pub fn subjects(&self) -> &[String] {
        or_empty(&self.subjects)
    }

    pub fn learning_objectives(&self) -> &[String] {
        or_empty(&self.learning_objectives)
    }

    pub fn key_principles(&self) -> &[String] {
        or_empty(&self.key_principles)
    }

    pub fn related_theories(&self) -> &[TheoryId] {
        self.related_theories.as_deref().unwrap_or(&[])
    }

    /// Practical tips, empty when either the insights block or the list is missing.
    pub fn practical_tips(&self) -> &[String] {
        self.veteran_teacher_insights
            .as_ref()
            .map(|insights| or_empty(&insights.practical_tips))
            .unwrap_or(&[])
    }

    pub fn success_patterns(&self) -> &[String] {
        self.veteran_teacher_insights
            .as_ref()
            .map(|insights| or_empty(&insights.success_patterns))
            .unwrap_or(&[])
    }

    pub fn common_challenges(&self) -> &[String] {
        self.veteran_teacher_insights
            .as_ref()
            .map(|insights| or_empty(&insights.common_challenges))
            .unwrap_or(&[])
    }
}

/// Read and parse theory records from disk.
///
/// Accepts the library layout (`{"educational_theories": [...]}`) as well as
/// a bare array, which is what a projected export writes.
pub fn load_theories_from_path(path: &Path) -> Result<Vec<Theory>, LoadError> {
    let data = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_theories(path, &data)
}

pub(crate) fn parse_theories(path: &Path, data: &str) -> Result<Vec<Theory>, LoadError> {
    let parse_err = |source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let value: Value = serde_json::from_str(data).map_err(parse_err)?;
    let records = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(THEORIES_FIELD) {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(LoadError::MissingTheories {
                    path: path.to_path_buf(),
                    field: THEORIES_FIELD,
                });
            }
        },
        _ => {
            return Err(LoadError::MissingTheories {
                path: path.to_path_buf(),
                field: THEORIES_FIELD,
            });
        }
    };

    let mut theories = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Theory>(record) {
            Ok(theory) => theories.push(theory),
            Err(err) => tracing::warn!(
                path = %path.display(),
                index,
                error = %err,
                "skipping theory record that is not an object with an integer id"
            ),
        }
    }
    Ok(theories)
}
