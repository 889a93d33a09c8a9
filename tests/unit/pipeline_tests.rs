/*!
 * Tests for the translate-then-narrate pipeline composition
 */

use std::sync::Arc;
use std::time::Duration;

use voxlate::errors::PipelineError;
use voxlate::narration::{AudioStore, NarrationService};
use voxlate::pipeline::{PipelinePhase, TranslationPipeline};
use voxlate::providers::mock::{MockSynthesizer, MockTranslator};
use voxlate::providers::{SpeechSynthesizer, Translator};
use voxlate::retry::RetryPolicy;
use voxlate::translation::TranslationService;

use crate::common::mock_providers::{PanickingSynthesizer, ScriptedTranslator, transient_failure};

fn pipeline_with(
    translator: Arc<dyn Translator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    policy: RetryPolicy,
) -> (TranslationPipeline, Arc<AudioStore>) {
    let store = Arc::new(AudioStore::new());
    let translation = TranslationService::new(translator, "en", "ru").with_policy(policy);
    let narration = NarrationService::new(synthesizer, "ru-RU", Arc::clone(&store));
    (
        TranslationPipeline::new(translation, Some(narration)),
        store,
    )
}

#[tokio::test]
async fn test_alwaysSucceedingTranslator_shouldProduceTextAndAudio() {
    // Scenario: "Hello" with three allowed attempts and a reliable provider
    let (pipeline, store) = pipeline_with(
        Arc::new(MockTranslator::working()),
        Arc::new(MockSynthesizer::working()),
        RetryPolicy::new(3, Duration::from_millis(10)),
    );

    let result = pipeline.run("Hello").await.unwrap();

    assert_eq!(result.translated_text, "Translated: Hello");
    assert_eq!(result.attempts, 1);

    let handle = result.audio.expect("narration was enabled");
    let clip = store.take(&handle).expect("audio should be registered");
    assert_eq!(clip.bytes.as_ref(), &[1, 2, 3]);
    assert_eq!(clip.mime_type, "audio/mpeg");
}

#[tokio::test(start_paused = true)]
async fn test_successOnThirdAttempt_shouldMakeExactlyThreeCallsWithBackoff() {
    // Scenario: two transient failures, then success
    let translator = Arc::new(ScriptedTranslator::new(vec![
        Err(transient_failure()),
        Err(transient_failure()),
        Ok("Translated: Hello".to_string()),
    ]));
    let (pipeline, _store) = pipeline_with(
        Arc::clone(&translator) as Arc<dyn Translator>,
        Arc::new(MockSynthesizer::working()),
        RetryPolicy::new(3, Duration::from_secs(1)),
    );

    let start = tokio::time::Instant::now();
    let result = pipeline.run("Hello").await.unwrap();

    assert_eq!(result.translated_text, "Translated: Hello");
    assert_eq!(result.attempts, 3);
    assert_eq!(translator.calls(), 3);
    // Two backoff waits: one unit then two units
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn test_singleAttemptFailure_shouldExhaustWithoutWaiting() {
    // Scenario: one allowed attempt, one failure
    let translator = Arc::new(ScriptedTranslator::new(vec![Err(transient_failure())]));
    let (pipeline, _store) = pipeline_with(
        Arc::clone(&translator) as Arc<dyn Translator>,
        Arc::new(MockSynthesizer::working()),
        RetryPolicy::new(1, Duration::from_secs(1)),
    );

    let start = tokio::time::Instant::now();
    let error = pipeline.run("Hello").await.unwrap_err();

    match error {
        PipelineError::Translation { attempts, .. } => assert_eq!(attempts, 1),
        other => panic!("expected a translation failure, got {:?}", other),
    }
    assert_eq!(translator.calls(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn test_narrationFailure_shouldStillSurfaceTranslatedText() {
    // Scenario: translation succeeds, synthesis fails
    let (pipeline, store) = pipeline_with(
        Arc::new(MockTranslator::working()),
        Arc::new(MockSynthesizer::failing()),
        RetryPolicy::new(3, Duration::from_millis(10)),
    );

    let error = pipeline.run("Hi").await.unwrap_err();

    match error {
        PipelineError::Narration {
            translated_text, ..
        } => assert_eq!(translated_text, "Translated: Hi"),
        other => panic!("expected a narration failure, got {:?}", other),
    }
    // Nothing was registered for the failed narration
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_translationFailure_shouldNeverInvokeNarration() {
    let (pipeline, _store) = pipeline_with(
        Arc::new(MockTranslator::failing()),
        Arc::new(PanickingSynthesizer),
        RetryPolicy::new(3, Duration::from_secs(1)),
    );

    let error = pipeline.run("Hello").await.unwrap_err();

    match error {
        PipelineError::Translation { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("expected a translation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_disabledNarration_shouldReturnTextWithoutAudio() {
    let translation =
        TranslationService::new(Arc::new(MockTranslator::working()), "en", "ru");
    let pipeline = TranslationPipeline::new(translation, None);

    let result = pipeline.run("Hello").await.unwrap();

    assert_eq!(result.translated_text, "Translated: Hello");
    assert!(result.audio.is_none());
}

#[tokio::test]
async fn test_emptyProviderResponses_shouldCountAsFailedAttempts() {
    let (pipeline, _store) = pipeline_with(
        Arc::new(MockTranslator::empty()),
        Arc::new(MockSynthesizer::working()),
        RetryPolicy::new(2, Duration::from_millis(1)),
    );

    let error = pipeline.run("Hello").await.unwrap_err();

    match error {
        PipelineError::Translation { attempts, reason } => {
            assert_eq!(attempts, 2);
            assert!(reason.contains("empty response"));
        }
        other => panic!("expected a translation failure, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_progress_shouldStepThroughPhases() {
    let translator = Arc::new(ScriptedTranslator::new(vec![
        Err(transient_failure()),
        Ok("Translated: Hello".to_string()),
    ]));
    let (pipeline, _store) = pipeline_with(
        translator as Arc<dyn Translator>,
        Arc::new(MockSynthesizer::working()),
        RetryPolicy::new(3, Duration::from_secs(1)),
    );

    let mut events = Vec::new();
    pipeline
        .run_with_progress("Hello", |p| events.push(p))
        .await
        .unwrap();

    let phases: Vec<(PipelinePhase, u32)> = events.iter().map(|p| (p.phase, p.attempt)).collect();
    assert_eq!(phases, vec![
        (PipelinePhase::Translating, 1),
        (PipelinePhase::Translating, 2),
        (PipelinePhase::Narrating, 0),
        (PipelinePhase::Done, 0),
    ]);

    // Percentages never move backwards
    for pair in events.windows(2) {
        assert!(pair[1].percent >= pair[0].percent);
    }
}
