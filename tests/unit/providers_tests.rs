/*!
 * Tests for provider behavior shared across implementations
 */

use voxlate::errors::ProviderError;
use voxlate::providers::mock::{MockSynthesizer, MockTranslator};
use voxlate::providers::{SpeechSynthesizer, TranslateRequest, Translator};
use voxlate::translation::clean_translation_response;

fn request(text: &str) -> TranslateRequest {
    TranslateRequest::new(text, "en", "ru")
}

#[tokio::test]
async fn test_mockTranslator_shouldPrefixTranslations() {
    let provider = MockTranslator::working();

    let result = provider.translate(&request("Good morning")).await.unwrap();
    assert_eq!(result, "Translated: Good morning");
}

#[tokio::test]
async fn test_mockTranslator_shouldReportApiErrors() {
    let provider = MockTranslator::failing();

    let error = provider.translate(&request("Hello")).await.unwrap_err();
    match error {
        ProviderError::ApiError {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 500);
            assert_eq!(message, "Translation failed.");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_mockTranslator_failFirst_shouldRecoverAfterConfiguredFailures() {
    let provider = MockTranslator::fail_first(2);

    assert!(provider.translate(&request("a")).await.is_err());
    assert!(provider.translate(&request("b")).await.is_err());

    let result = provider.translate(&request("c")).await.unwrap();
    assert_eq!(result, "Translated: c");
}

#[tokio::test]
async fn test_mockTranslator_testConnection_shouldSucceed() {
    let provider = MockTranslator::working();
    assert!(provider.test_connection().await.is_ok());
}

#[tokio::test]
async fn test_mockSynthesizer_shouldHonorLanguageTagParameter() {
    // The mock ignores the tag but must accept any value the config derives
    let provider = MockSynthesizer::working();

    for tag in ["ru-RU", "en-US", "de"] {
        let clip = provider.synthesize("text", tag).await.unwrap();
        assert!(!clip.is_empty());
    }
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn test_mockSynthesizer_failFirst_shouldRecover() {
    let provider = MockSynthesizer::fail_first(1);

    assert!(provider.synthesize("text", "ru-RU").await.is_err());
    assert!(provider.synthesize("text", "ru-RU").await.is_ok());
}

#[test]
fn test_cleanResponse_shouldPassPlainTextThrough() {
    assert_eq!(clean_translation_response("Привет, мир"), "Привет, мир");
    assert_eq!(clean_translation_response("  padded  "), "padded");
}

#[test]
fn test_cleanResponse_shouldUnwrapCodeFences() {
    let response = "```text\nПривет, мир\n```";
    assert_eq!(clean_translation_response(response), "Привет, мир");
}

#[test]
fn test_cleanResponse_shouldDropCommentaryLines() {
    let response = "Here's the translation you asked for:\nПривет, мир";
    assert_eq!(clean_translation_response(response), "Привет, мир");

    let response = "Translation:\nПривет\nPlease note the informal register.";
    assert_eq!(clean_translation_response(response), "Привет");
}

#[test]
fn test_cleanResponse_shouldReturnEmptyForEmptyInput() {
    assert_eq!(clean_translation_response(""), "");
    assert_eq!(clean_translation_response("   \n  "), "");
}
