//! Core data models for the dictionary lookup
//!
//! This module contains the shape of the dictionary service's JSON response
//! and the query-language classification used when rendering samples.

pub mod dictionary;

#[cfg(test)]
pub(crate) use dictionary::test_server;
pub use dictionary::{Dictionary, DictionaryClient, DictionaryError, DEFAULT_ENDPOINT};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Part-of-speech tag the service uses for web-sourced definitions
pub const WEB_POS: &str = "Web";

/// Suffix of pronunciation labels that point at audio clips
pub const AUDIO_LABEL_SUFFIX: &str = "mp3";

/// Parsed response from the dictionary service for one word
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupResponse {
    /// The word as the service spells it
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: String,
    /// Phonetic system label -> transcription, in document order
    #[serde(default, deserialize_with = "null_as_default")]
    pub pronunciation: Map<String, Value>,
    /// Definitions, one per part of speech
    #[serde(default, deserialize_with = "null_as_default")]
    pub defs: Vec<Definition>,
    /// Usage samples with translations
    #[serde(default, deserialize_with = "null_as_default")]
    pub sams: Vec<Sample>,
}

/// A single definition line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Definition {
    /// Part of speech, e.g. `v.` or `Web`
    #[serde(default, deserialize_with = "null_as_default")]
    pub pos: String,
    /// Definition text
    #[serde(default, deserialize_with = "null_as_default")]
    pub def: String,
}

/// A sample sentence pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sample {
    /// English sentence
    #[serde(default, deserialize_with = "null_as_default")]
    pub eng: String,
    /// Translated sentence
    #[serde(default, deserialize_with = "null_as_default")]
    pub chn: String,
}

impl LookupResponse {
    /// Parses raw response bytes
    pub fn from_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    /// Pronunciations worth displaying, skipping audio-clip labels
    pub fn phonetics(&self) -> impl Iterator<Item = (&str, String)> {
        self.pronunciation
            .iter()
            .filter(|(label, _)| !label.ends_with(AUDIO_LABEL_SUFFIX))
            .map(|(label, value)| (label.as_str(), transcription(value)))
    }

    /// Definitions worth displaying, skipping web-sourced ones
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.defs.iter().filter(|d| d.pos != WEB_POS)
    }
}

fn transcription(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Language of the queried word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Pure ASCII input
    English,
    /// Anything containing a non-ASCII character
    Target,
}

impl Language {
    /// Classifies a query: any code point above 127 makes it target-language
    pub fn detect(word: &str) -> Self {
        if word.is_ascii() {
            Language::English
        } else {
            Language::Target
        }
    }
}
