// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word stemming.
//!
//! Vocabulary entries carry a language tag (`fr:crème-brûlée`), so each entry
//! is stemmed with the Snowball algorithm for its language. Queries are stemmed
//! with the configured query language. Languages without a Snowball algorithm
//! (or builds without the `snowball` feature) fall back to plain lowercasing,
//! which still lets surface-prefix retrieval do its job.

use std::collections::HashMap;
#[cfg(feature = "snowball")]
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Language assumed when a vocabulary entry carries no tag.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Reduces a single word to its stem.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;

    /// Stem every whitespace-separated word and rejoin with single spaces.
    fn stem_phrase(&self, phrase: &str) -> String {
        phrase
            .split_whitespace()
            .map(|word| self.stem(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Fallback stemmer: lowercases and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LowercaseStemmer;

impl Stemmer for LowercaseStemmer {
    fn stem(&self, word: &str) -> String {
        word.to_lowercase()
    }
}

/// Snowball stemmer for one language.
#[cfg(feature = "snowball")]
pub struct SnowballStemmer {
    language: &'static str,
    inner: rust_stemmers::Stemmer,
}

#[cfg(feature = "snowball")]
impl SnowballStemmer {
    /// Stemmer for an ISO 639-1 code, if Snowball has an algorithm for it.
    pub fn for_language(language: &str) -> Option<Self> {
        let (code, algorithm) = snowball_algorithm(language)?;
        Some(Self {
            language: code,
            inner: rust_stemmers::Stemmer::create(algorithm),
        })
    }

    pub fn language(&self) -> &'static str {
        self.language
    }
}

#[cfg(feature = "snowball")]
impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("language", &self.language)
            .finish()
    }
}

#[cfg(feature = "snowball")]
impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(&word.to_lowercase()).into_owned()
    }
}

#[cfg(feature = "snowball")]
fn snowball_algorithm(language: &str) -> Option<(&'static str, rust_stemmers::Algorithm)> {
    use rust_stemmers::Algorithm;

    let lang = language.trim().to_ascii_lowercase();
    // Accept regional tags like `en-gb` or `pt_BR`.
    let code = lang.split(['-', '_']).next().unwrap_or_default();

    let found = match code {
        "ar" => ("ar", Algorithm::Arabic),
        "da" => ("da", Algorithm::Danish),
        "de" => ("de", Algorithm::German),
        "el" => ("el", Algorithm::Greek),
        "en" => ("en", Algorithm::English),
        "es" => ("es", Algorithm::Spanish),
        "fi" => ("fi", Algorithm::Finnish),
        "fr" => ("fr", Algorithm::French),
        "hu" => ("hu", Algorithm::Hungarian),
        "it" => ("it", Algorithm::Italian),
        "nl" => ("nl", Algorithm::Dutch),
        "no" | "nb" => ("no", Algorithm::Norwegian),
        "pt" => ("pt", Algorithm::Portuguese),
        "ro" => ("ro", Algorithm::Romanian),
        "ru" => ("ru", Algorithm::Russian),
        "sv" => ("sv", Algorithm::Swedish),
        "ta" => ("ta", Algorithm::Tamil),
        "tr" => ("tr", Algorithm::Turkish),
        _ => return None,
    };
    Some(found)
}

/// Does this build have a real stemmer for `language`?
pub fn is_supported(language: &str) -> bool {
    #[cfg(feature = "snowball")]
    {
        snowball_algorithm(language).is_some()
    }
    #[cfg(not(feature = "snowball"))]
    {
        let _ = language;
        false
    }
}

/// Pick the stemmer for an optional language tag.
///
/// `None` means [`DEFAULT_LANGUAGE`]. Unsupported languages get
/// [`LowercaseStemmer`].
pub fn stemmer_for(language: Option<&str>) -> Arc<dyn Stemmer> {
    let language = language.unwrap_or(DEFAULT_LANGUAGE);

    #[cfg(feature = "snowball")]
    {
        if let Some(stemmer) = SnowballStemmer::for_language(language) {
            return Arc::new(stemmer);
        }
    }

    tracing::trace!(language, "no snowball stemmer, lowercasing");
    Arc::new(LowercaseStemmer)
}

/// Stemmers by language tag, created on first use and shared afterwards.
#[derive(Default)]
pub struct StemmerRegistry {
    stemmers: RwLock<HashMap<String, Arc<dyn Stemmer>>>,
}

impl std::fmt::Debug for StemmerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemmerRegistry")
            .field("languages", &self.stemmers.read().len())
            .finish()
    }
}

impl StemmerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, language: Option<&str>) -> Arc<dyn Stemmer> {
        let key = language.unwrap_or(DEFAULT_LANGUAGE).trim().to_ascii_lowercase();
        if let Some(stemmer) = self.stemmers.read().get(&key) {
            return Arc::clone(stemmer);
        }
        let mut stemmers = self.stemmers.write();
        Arc::clone(
            stemmers
                .entry(key)
                .or_insert_with_key(|lang| stemmer_for(Some(lang))),
        )
    }
}
