/*!
 * End-to-end workflow tests driving the controller with mock providers
 */

use std::sync::Arc;

use voxlate::app_controller::Controller;
use voxlate::narration::AudioStore;
use voxlate::providers::Translator;
use voxlate::providers::mock::MockTranslator;
use voxlate::translation::TranslationService;

use crate::common::{create_temp_dir, create_test_file, mock_config};

#[tokio::test]
async fn test_run_shouldWriteTranslationAndAudio() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = create_test_file(&dir, "notes.txt", "Hello").unwrap();

    let controller = Controller::with_config(mock_config()).unwrap();
    controller.run(input, dir.clone(), false).await.unwrap();

    let text_output = dir.join("notes.ru.txt");
    let audio_output = dir.join("notes.ru.mp3");

    assert_eq!(
        std::fs::read_to_string(&text_output).unwrap(),
        "Translated: Hello"
    );
    assert_eq!(std::fs::read(&audio_output).unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_run_withoutNarration_shouldOnlyWriteText() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = create_test_file(&dir, "notes.txt", "Hello").unwrap();

    let mut config = mock_config();
    config.narration.enabled = false;

    let controller = Controller::with_config(config).unwrap();
    controller.run(input, dir.clone(), false).await.unwrap();

    assert!(dir.join("notes.ru.txt").exists());
    assert!(!dir.join("notes.ru.mp3").exists());
}

#[tokio::test]
async fn test_run_shouldSkipExistingTranslationWithoutForce() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = create_test_file(&dir, "notes.txt", "Hello").unwrap();
    create_test_file(&dir, "notes.ru.txt", "previous translation").unwrap();

    let controller = Controller::with_config(mock_config()).unwrap();
    controller.run(input, dir.clone(), false).await.unwrap();

    // The existing output was left untouched
    assert_eq!(
        std::fs::read_to_string(dir.join("notes.ru.txt")).unwrap(),
        "previous translation"
    );
}

#[tokio::test]
async fn test_run_withForce_shouldOverwriteExistingTranslation() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = create_test_file(&dir, "notes.txt", "Hello").unwrap();
    create_test_file(&dir, "notes.ru.txt", "previous translation").unwrap();

    let controller = Controller::with_config(mock_config()).unwrap();
    controller.run(input, dir.clone(), true).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(dir.join("notes.ru.txt")).unwrap(),
        "Translated: Hello"
    );
}

#[tokio::test]
async fn test_run_shouldRejectEmptyInputFile() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let input = create_test_file(&dir, "empty.txt", "  \n ").unwrap();

    let controller = Controller::with_config(mock_config()).unwrap();
    let error = controller.run(input, dir, false).await.unwrap_err();

    assert!(error.to_string().contains("empty"));
}

#[tokio::test]
async fn test_run_shouldRejectMissingInputFile() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();

    let controller = Controller::with_config(mock_config()).unwrap();
    let error = controller
        .run(dir.join("missing.txt"), dir.clone(), false)
        .await
        .unwrap_err();

    assert!(error.to_string().contains("does not exist"));
}

#[tokio::test]
async fn test_runFolder_shouldProcessEveryTextFile() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    create_test_file(&dir, "first.txt", "One").unwrap();
    create_test_file(&dir, "second.txt", "Two").unwrap();
    create_test_file(&dir, "ignored.dat", "Three").unwrap();

    let controller = Controller::with_config(mock_config()).unwrap();
    controller.run_folder(dir.clone(), false).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(dir.join("first.ru.txt")).unwrap(),
        "Translated: One"
    );
    assert_eq!(
        std::fs::read_to_string(dir.join("second.ru.txt")).unwrap(),
        "Translated: Two"
    );
    assert!(!dir.join("ignored.ru.txt").exists());
}

#[tokio::test]
async fn test_runFolder_shouldIgnoreItsOwnOutputs() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    create_test_file(&dir, "first.txt", "One").unwrap();

    let controller = Controller::with_config(mock_config()).unwrap();
    controller.run_folder(dir.clone(), false).await.unwrap();
    // A second pass must not translate first.ru.txt into first.ru.ru.txt
    controller.run_folder(dir.clone(), true).await.unwrap();

    assert!(!dir.join("first.ru.ru.txt").exists());
}

#[tokio::test]
async fn test_buildPipeline_shouldHonorMockProviderSelection() {
    let store = Arc::new(AudioStore::new());
    let controller = Controller::with_config(mock_config()).unwrap();

    let pipeline = controller.build_pipeline(Arc::clone(&store)).unwrap();
    let result = pipeline.run("Hello").await.unwrap();

    assert_eq!(result.translated_text, "Translated: Hello");
    assert!(result.audio.is_some());
}

#[tokio::test]
async fn test_testConnection_shouldSucceedForMockProvider() {
    let service = TranslationService::new(
        Arc::new(MockTranslator::working()) as Arc<dyn Translator>,
        "en",
        "ru",
    );

    assert!(service.test_connection().await.is_ok());
}
