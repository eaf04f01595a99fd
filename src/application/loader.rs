// src/application/loader.rs
use crate::constants::{DEFAULT_FALSE_LABEL, DEFAULT_TRUE_LABEL};
use crate::domain::{DeckError, QuestionKind, QuestionRecord};
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, instrument};

/// Key used in errors that concern the document as a whole.
pub const DOCUMENT_KEY: &str = "<document>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Yaml,
    Toml,
}

impl InputFormat {
    /// `.toml` files are TOML, everything else is read as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Reads question documents into validated records, in declaration order.
#[derive(Debug, Clone)]
pub struct QuestionLoader {
    true_label: String,
    false_label: String,
}

impl QuestionLoader {
    pub fn new() -> Self {
        Self {
            true_label: DEFAULT_TRUE_LABEL.to_string(),
            false_label: DEFAULT_FALSE_LABEL.to_string(),
        }
    }

    pub fn with_labels(mut self, true_label: impl Into<String>, false_label: impl Into<String>) -> Self {
        self.true_label = true_label.into();
        self.false_label = false_label.into();
        self
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Vec<QuestionRecord>, DeckError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DeckError::io(path, e))?;
        self.parse(&content, InputFormat::from_path(path))
    }

    #[instrument(level = "debug", skip(self, content))]
    pub fn parse(&self, content: &str, format: InputFormat) -> Result<Vec<QuestionRecord>, DeckError> {
        if content.trim().is_empty() {
            debug!("Empty question document");
            return Ok(Vec::new());
        }

        let records = match format {
            InputFormat::Yaml => {
                let doc: OrderedEntries<serde_yaml::Value> =
                    serde_yaml::from_str(content).map_err(document_error)?;
                self.validate_all(doc.0)?
            }
            InputFormat::Toml => {
                let doc: OrderedEntries<toml::Value> =
                    toml::from_str(content).map_err(document_error)?;
                self.validate_all(doc.0)?
            }
        };

        debug!(count = records.len(), "Loaded questions");
        Ok(records)
    }

    fn validate_all<V: DocumentValue>(
        &self,
        entries: Vec<(String, V)>,
    ) -> Result<Vec<QuestionRecord>, DeckError> {
        entries
            .into_iter()
            .map(|(key, value)| self.validate(key, value))
            .collect()
    }

    fn validate<V: DocumentValue>(&self, key: String, value: V) -> Result<QuestionRecord, DeckError> {
        // the kind decides which fields matter, so check it before the rest of the record
        let probe: KindProbe = value
            .clone()
            .decode()
            .map_err(|reason| DeckError::malformed(&key, reason))?;
        let tag = probe
            .kind
            .ok_or_else(|| DeckError::malformed(&key, "missing field `kind`"))?;
        let kind = QuestionKind::from_tag(tag.as_str()).ok_or_else(|| DeckError::UnsupportedKind {
            key: key.clone(),
            kind: tag.clone(),
        })?;

        let raw: RawQuestion = value
            .decode()
            .map_err(|reason| DeckError::malformed(&key, reason))?;

        let text = match raw.text {
            Some(text) if !text.trim().is_empty() => text,
            Some(_) => return Err(DeckError::malformed(&key, "field `text` is empty")),
            None => return Err(DeckError::malformed(&key, "missing field `text`")),
        };

        let difficulty = raw
            .difficulty
            .map(|d| {
                u32::try_from(d)
                    .map_err(|_| DeckError::malformed(&key, format!("difficulty {d} must not be negative")))
            })
            .transpose()?;

        let (options, correct) = match kind {
            QuestionKind::MultipleChoice => {
                let options = required_options(&key, raw.options)?;
                let correct = required_correct(&key, raw.correct, options.len())?;
                (options, Some(correct))
            }
            QuestionKind::TrueFalse => {
                if raw.options.is_some() {
                    debug!(%key, "Ignoring options on true/false question");
                }
                let options = vec![self.true_label.clone(), self.false_label.clone()];
                let correct = required_correct(&key, raw.correct, options.len())?;
                (options, Some(correct))
            }
            QuestionKind::Enumeration => {
                if raw.correct.is_some() {
                    return Err(DeckError::malformed(
                        &key,
                        "enumeration questions have no single correct answer; remove `correct`",
                    ));
                }
                (required_options(&key, raw.options)?, None)
            }
        };

        Ok(QuestionRecord {
            key,
            kind,
            text,
            options,
            correct,
            curiosity: raw.curiosity,
            difficulty,
        })
    }
}

impl Default for QuestionLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn document_error(err: impl fmt::Display) -> DeckError {
    DeckError::malformed(DOCUMENT_KEY, err.to_string())
}

fn required_options(key: &str, options: Option<Vec<Scalar>>) -> Result<Vec<String>, DeckError> {
    let options = options.ok_or_else(|| DeckError::malformed(key, "missing field `options`"))?;
    if options.is_empty() {
        return Err(DeckError::malformed(key, "field `options` is empty"));
    }
    Ok(options.into_iter().map(|o| o.to_string()).collect())
}

fn required_correct(key: &str, correct: Option<i64>, len: usize) -> Result<usize, DeckError> {
    let correct = correct.ok_or_else(|| DeckError::malformed(key, "missing field `correct`"))?;
    usize::try_from(correct)
        .ok()
        .filter(|idx| *idx < len)
        .ok_or_else(|| {
            DeckError::malformed(
                key,
                format!("correct index {correct} out of range for {len} options"),
            )
        })
}

#[derive(Debug, Deserialize)]
struct KindProbe {
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    text: Option<String>,
    options: Option<Vec<Scalar>>,
    correct: Option<i64>,
    curiosity: Option<String>,
    difficulty: Option<i64>,
}

/// Option values and keys may be written as any scalar.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Format-specific value that can be re-decoded into a typed record.
trait DocumentValue: Clone {
    fn decode<T: DeserializeOwned>(self) -> Result<T, String>;
}

impl DocumentValue for serde_yaml::Value {
    fn decode<T: DeserializeOwned>(self) -> Result<T, String> {
        serde_yaml::from_value(self).map_err(|e| e.to_string())
    }
}

impl DocumentValue for toml::Value {
    fn decode<T: DeserializeOwned>(self) -> Result<T, String> {
        self.try_into().map_err(|e: toml::de::Error| e.message().to_string())
    }
}

/// Top-level mapping kept in document order, rejecting duplicate keys.
struct OrderedEntries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of question keys to questions")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedEntries(Vec::new()))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedEntries(Vec::new()))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut seen = HashSet::new();
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(key) = map.next_key::<Scalar>()? {
                    let key = key.to_string();
                    if !seen.insert(key.clone()) {
                        return Err(de::Error::custom(format!("duplicate question key '{key}'")));
                    }
                    entries.push((key, map.next_value::<V>()?));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_any(EntriesVisitor(PhantomData))
    }
}
