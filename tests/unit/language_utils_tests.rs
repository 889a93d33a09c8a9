/*!
 * Tests for language utility functions
 */

use voxlate::language_utils::{get_language_name, speech_tag, validate_language_code};

#[test]
fn test_validateLanguageCode_shouldAcceptTwoLetterCodes() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("ru").is_ok());
    assert!(validate_language_code(" RU ").is_ok());
}

#[test]
fn test_validateLanguageCode_shouldAcceptThreeLetterCodes() {
    assert!(validate_language_code("eng").is_ok());
    assert!(validate_language_code("rus").is_ok());
}

#[test]
fn test_validateLanguageCode_shouldRejectUnknownCodes() {
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("english").is_err());
}

#[test]
fn test_getLanguageName_shouldReturnEnglishNames() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("ru").unwrap(), "Russian");
    assert!(get_language_name("zz").is_err());
}

#[test]
fn test_speechTag_shouldMapKnownLanguagesToRegionTags() {
    assert_eq!(speech_tag("ru"), "ru-RU");
    assert_eq!(speech_tag("rus"), "ru-RU");
    assert_eq!(speech_tag("en"), "en-US");
    assert_eq!(speech_tag("de"), "de-DE");
}

#[test]
fn test_speechTag_shouldPassUnknownCodesThrough() {
    assert_eq!(speech_tag("uk"), "uk");
    assert_eq!(speech_tag(" FI "), "fi");
}
