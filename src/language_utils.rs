use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating ISO 639-1 (2-letter) and
/// ISO 639-3 (3-letter) language codes and deriving the BCP-47 tags the
/// speech synthesizers expect.
/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<Language> {
    let normalized_code = code.trim().to_lowercase();

    // Check for ISO 639-1 (2-letter) code
    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang);
        }
    }
    // Check for ISO 639-3 (3-letter) code
    else if normalized_code.len() == 3 {
        if let Some(lang) = Language::from_639_3(&normalized_code) {
            return Ok(lang);
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English name of a language from its code, e.g. "ru" -> "Russian"
pub fn get_language_name(code: &str) -> Result<String> {
    let language = validate_language_code(code)?;
    Ok(language.to_name().to_string())
}

/// Derive a BCP-47 speech tag from a language code, e.g. "ru" -> "ru-RU".
///
/// Only the languages with an unambiguous default region are mapped; other
/// codes pass through unchanged, which most synthesizers accept.
pub fn speech_tag(code: &str) -> String {
    let normalized = code.trim().to_lowercase();

    match normalized.as_str() {
        "en" | "eng" => "en-US".to_string(),
        "ru" | "rus" => "ru-RU".to_string(),
        "fr" | "fra" => "fr-FR".to_string(),
        "de" | "deu" => "de-DE".to_string(),
        "es" | "spa" => "es-ES".to_string(),
        "it" | "ita" => "it-IT".to_string(),
        "pt" | "por" => "pt-PT".to_string(),
        "ja" | "jpn" => "ja-JP".to_string(),
        "zh" | "zho" => "zh-CN".to_string(),
        _ => normalized,
    }
}
