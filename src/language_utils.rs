use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for target language handling
///
/// The translation runs iterate over a fixed, ordered table of Indic
/// target languages. Codes outside the table are accepted when they are
/// valid ISO 639-1 codes, with their English name taken from isolang.
/// A target language: ISO 639-1 code and display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage {
    /// ISO 639-1 code sent to the backend
    pub code: String,
    /// Human readable name used in logs and progress bars
    pub name: String,
}

impl TargetLanguage {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Default target languages, in iteration order
pub const TARGET_LANGUAGES: [(&str, &str); 11] = [
    ("hi", "Hindi"),
    ("te", "Telugu"),
    ("kn", "Kannada"),
    ("mr", "Marathi"),
    ("ta", "Tamil"),
    ("gu", "Gujarati"),
    ("ml", "Malayalam"),
    ("or", "Oriya"),
    ("pa", "Punjabi"),
    ("bn", "Bengali"),
    ("as", "Assamese"),
];

/// All default target languages in table order
pub fn default_target_languages() -> Vec<TargetLanguage> {
    TARGET_LANGUAGES
        .iter()
        .map(|(code, name)| TargetLanguage::new(*code, *name))
        .collect()
}

/// Default target language codes in table order
pub fn default_target_codes() -> Vec<String> {
    TARGET_LANGUAGES.iter().map(|(code, _)| code.to_string()).collect()
}

/// Validate that a code is a two-letter ISO 639-1 language code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the display name for a language code
///
/// Table entries win over isolang names so that log output matches the
/// names used for output files and progress bars.
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if let Some((_, name)) = TARGET_LANGUAGES.iter().find(|(c, _)| *c == normalized_code) {
        return Ok(name.to_string());
    }

    validate_language_code(&normalized_code)?;
    let lang = Language::from_639_1(&normalized_code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized_code))?;

    Ok(lang.to_name().to_string())
}

/// Resolve a list of codes into target languages, keeping the given order
/// and dropping duplicates
pub fn resolve_target_languages<S: AsRef<str>>(codes: &[S]) -> Result<Vec<TargetLanguage>> {
    let mut languages: Vec<TargetLanguage> = Vec::with_capacity(codes.len());

    for code in codes {
        let code = code.as_ref().trim().to_lowercase();
        if languages.iter().any(|l| l.code == code) {
            continue;
        }
        let name = get_language_name(&code)?;
        languages.push(TargetLanguage::new(code, name));
    }

    Ok(languages)
}
