/*!
 * Tests for language utility functions
 */

use jsontrans::language_utils::{
    TARGET_LANGUAGES, TargetLanguage, default_target_languages, get_language_name,
    resolve_target_languages, validate_language_code,
};

/// Test that the default table holds the eleven Indic languages
#[test]
fn test_default_target_languages_shouldContainElevenEntries() {
    let languages = default_target_languages();
    assert_eq!(languages.len(), TARGET_LANGUAGES.len());
    assert_eq!(languages.first(), Some(&TargetLanguage::new("hi", "Hindi")));
    assert_eq!(languages.last(), Some(&TargetLanguage::new("as", "Assamese")));
}

/// Test validation of language codes
#[test]
fn test_validate_language_code_withVariousCodes_shouldValidateCorrectly() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code(" TA ").is_ok());
    assert!(validate_language_code("xyz").is_err());
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("zz").is_err());
}

/// Test display names
#[test]
fn test_get_language_name_withTableAndIsoCodes_shouldReturnNames() {
    assert_eq!(get_language_name("bn").unwrap(), "Bengali");
    assert_eq!(get_language_name("pa").unwrap(), "Punjabi");
    assert_eq!(get_language_name("de").unwrap(), "German");
}

/// Test resolving a user selection
#[test]
fn test_resolve_target_languages_withInvalidCode_shouldFail() {
    assert!(resolve_target_languages(&["hi", "qq"]).is_err());

    let resolved = resolve_target_languages(&["ml", "gu"]).unwrap();
    assert_eq!(resolved[0].to_string(), "Malayalam (ml)");
    assert_eq!(resolved[1].code, "gu");
}
