#[cfg(test)]
mod core_test {

    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crate::config::Config;
    use crate::image_classifier::interface::{ApiError, Label, PredictResponse, TestResponse};
    use crate::image_data::{sample_png, ImageData};
    use crate::pet_classifier::core::{
        init, transition, ApiStatus, CameraState, Effect, ImageSource, InputMethod, Msg,
        PredictionResult, State, ToastVariant, CLASSIFY_FAILED_ERROR, MISSING_IMAGE_ERROR,
    };

    fn image() -> ImageData {
        ImageData::from_bytes(&sample_png()).unwrap()
    }

    fn predict(result: Option<&str>, prediction: Option<&str>, confidence: Option<f32>) -> PredictResponse {
        PredictResponse {
            result: result.map(str::to_string),
            prediction: prediction.map(str::to_string),
            confidence,
        }
    }

    fn with_image(config: &Config) -> State {
        let (state, _) = transition(config, State::default(), Msg::ImageLoaded(Ok(image())));
        state
    }

    fn classify(config: &Config, state: State, response: Result<PredictResponse, ApiError>) -> State {
        let (state, effects) = transition(config, state, Msg::ClassifyClicked);
        let generation = match effects.as_slice() {
            [Effect::Classify { generation, .. }] => *generation,
            other => panic!("Unexpected effects: {:?}", other),
        };
        let (state, effects) = transition(
            config,
            state,
            Msg::ClassifyDone {
                generation,
                response,
            },
        );
        assert!(effects.is_empty());
        state
    }

    fn http_error(status: u16) -> ApiError {
        ApiError::Status {
            url: "http://localhost:8000/predict".to_string(),
            status,
        }
    }

    #[test]
    fn test_init() {
        let (state, effects) = init(&Config::default());

        assert_eq!(state.api_status, ApiStatus::Checking);
        assert_eq!(state.input_method, InputMethod::Upload);
        assert!(state.image.is_none());
        assert_eq!(effects, vec![Effect::SubscribeTick, Effect::CheckApi]);
    }

    #[test]
    fn test_api_check_connected() {
        let config = Config::default();
        let (state, _) = init(&config);

        let (state, effects) = transition(
            &config,
            state,
            Msg::ApiCheckDone(Ok(TestResponse {
                message: Some("Hello from the API".to_string()),
            })),
        );

        assert_eq!(state.api_status, ApiStatus::Connected);
        assert!(effects.is_empty());
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].variant, ToastVariant::Success);
        assert_eq!(state.toasts[0].title, "API Connection Successful");
        assert_eq!(state.toasts[0].description, "Hello from the API");
    }

    #[test]
    fn test_api_check_without_message_uses_fallback() {
        let config = Config::default();
        let (state, _) = init(&config);

        let (state, _) = transition(
            &config,
            state,
            Msg::ApiCheckDone(Ok(TestResponse { message: None })),
        );

        assert_eq!(state.toasts[0].description, "Connection to the API is working!");
    }

    #[test]
    fn test_api_check_disconnected() {
        let config = Config {
            api_url: "http://pets.local:9000".to_string(),
            ..Config::default()
        };
        let (state, _) = init(&config);

        let (state, _) = transition(&config, state, Msg::ApiCheckDone(Err(http_error(500))));

        assert_eq!(state.api_status, ApiStatus::Disconnected);
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].variant, ToastVariant::Failure);
        assert_eq!(state.toasts[0].title, "API Connection Failed");
        assert_eq!(
            state.toasts[0].description,
            "Could not connect to the API at http://pets.local:9000. Please check if it's running."
        );
    }

    #[test]
    fn test_api_check_runs_once_per_request() {
        let config = Config::default();
        let (state, _) = init(&config);

        // Already checking.
        let (state, effects) = transition(&config, state, Msg::ApiCheckRequested);
        assert!(effects.is_empty());

        let (state, _) = transition(
            &config,
            state,
            Msg::ApiCheckDone(Ok(TestResponse::default())),
        );
        assert_eq!(state.api_status, ApiStatus::Connected);

        // A late duplicate answer does not flip the status or add toasts.
        let (state, _) = transition(&config, state, Msg::ApiCheckDone(Err(http_error(503))));
        assert_eq!(state.api_status, ApiStatus::Connected);
        assert_eq!(state.toasts.len(), 1);

        // A new check goes through checking again.
        let (state, effects) = transition(&config, state, Msg::ApiCheckRequested);
        assert_eq!(state.api_status, ApiStatus::Checking);
        assert_eq!(effects, vec![Effect::CheckApi]);
    }

    #[test]
    fn test_classify_without_image() {
        let config = Config::default();

        let (state, effects) = transition(&config, State::default(), Msg::ClassifyClicked);

        assert!(effects.is_empty());
        assert_eq!(state.error.as_deref(), Some(MISSING_IMAGE_ERROR));
        assert!(state.result.is_none());
        assert!(!state.is_classifying());
    }

    #[test]
    fn test_classify_dog_with_default_confidence() {
        let config = Config::default();
        let state = with_image(&config);

        let state = classify(&config, state, Ok(predict(Some("dog"), None, None)));

        assert_eq!(
            state.result,
            Some(PredictionResult {
                label: Label::Dog,
                confidence: 0.95,
            })
        );
        assert!(state.error.is_none());
        assert!(!state.is_classifying());
    }

    #[test]
    fn test_classify_sets_loading_and_clears_error() {
        let config = Config::default();
        let state = State {
            error: Some("old".to_string()),
            ..with_image(&config)
        };

        let (state, effects) = transition(&config, state, Msg::ClassifyClicked);

        assert!(state.is_classifying());
        assert!(state.error.is_none());
        assert_eq!(
            effects,
            vec![Effect::Classify {
                generation: state.image_generation,
                image: state.image.clone().unwrap(),
            }]
        );
    }

    #[test]
    fn test_classify_ignored_while_in_flight() {
        let config = Config::default();
        let state = with_image(&config);

        let (state, _) = transition(&config, state, Msg::ClassifyClicked);
        let (state, effects) = transition(&config, state, Msg::ClassifyClicked);

        assert!(effects.is_empty());
        assert!(state.is_classifying());
    }

    #[test]
    fn test_classify_failure_clears_previous_result() {
        let config = Config::default();
        let state = with_image(&config);
        let state = classify(&config, state, Ok(predict(Some("cat"), None, Some(0.8))));
        assert!(state.result.is_some());

        let state = classify(&config, state, Err(http_error(500)));

        assert!(state.result.is_none());
        assert_eq!(state.error.as_deref(), Some(CLASSIFY_FAILED_ERROR));
        assert!(!state.is_classifying());
    }

    #[test]
    fn test_classify_uses_prediction_when_result_missing() {
        let config = Config::default();

        let state = classify(
            &config,
            with_image(&config),
            Ok(predict(None, Some("Human"), Some(0.42))),
        );
        assert_eq!(
            state.result,
            Some(PredictionResult {
                label: Label::Human,
                confidence: 0.42,
            })
        );

        let state = classify(
            &config,
            with_image(&config),
            Ok(predict(Some(""), Some("cat"), None)),
        );
        assert_eq!(state.result.map(|result| result.label), Some(Label::Cat));
    }

    #[test]
    fn test_classify_keeps_explicit_zero_confidence() {
        let config = Config::default();

        let state = classify(
            &config,
            with_image(&config),
            Ok(predict(Some("dog"), None, Some(0.0))),
        );
        assert_eq!(
            state.result,
            Some(PredictionResult {
                label: Label::Dog,
                confidence: 0.0,
            })
        );

        let state = classify(
            &config,
            with_image(&config),
            Ok(predict(Some("cat"), None, Some(1.7))),
        );
        assert_eq!(state.result.map(|result| result.confidence), Some(1.0));
    }

    #[test]
    fn test_classify_unknown_label_is_a_failure() {
        let config = Config::default();

        let state = classify(
            &config,
            with_image(&config),
            Ok(predict(Some("hamster"), None, Some(0.99))),
        );

        assert!(state.result.is_none());
        assert_eq!(state.error.as_deref(), Some(CLASSIFY_FAILED_ERROR));
    }

    #[test]
    fn test_stale_classification_is_discarded() {
        let config = Config::default();
        let state = with_image(&config);

        let (state, effects) = transition(&config, state, Msg::ClassifyClicked);
        let Some(Effect::Classify { generation, .. }) = effects.first().cloned() else {
            panic!("Expected a classify effect");
        };

        let (state, _) = transition(&config, state, Msg::ResetClicked);
        let (state, _) = transition(
            &config,
            state,
            Msg::ClassifyDone {
                generation,
                response: Ok(predict(Some("dog"), None, None)),
            },
        );

        assert!(state.image.is_none());
        assert!(state.result.is_none());
        assert!(state.error.is_none());
        assert!(!state.is_classifying());
    }

    #[test]
    fn test_new_image_clears_result_and_error() {
        let config = Config::default();
        let state = classify(&config, with_image(&config), Ok(predict(Some("dog"), None, None)));
        let generation = state.image_generation;

        let (state, _) = transition(&config, state, Msg::ImageLoaded(Ok(image())));

        assert!(state.image.is_some());
        assert!(state.result.is_none());
        assert!(state.error.is_none());
        assert_eq!(state.image_generation, generation + 1);

        let (state, _) = transition(&config, state, Msg::ClassifyClicked);
        let (state, _) = transition(&config, state, Msg::ImageCleared);
        assert!(state.image.is_none());
        assert!(state.result.is_none());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_result_and_error_never_both_set() {
        let config = Config::default();
        let mut state = with_image(&config);
        let responses = vec![
            Ok(predict(Some("dog"), None, None)),
            Err(http_error(502)),
            Ok(predict(Some("cat"), None, Some(0.7))),
            Ok(predict(Some("lizard"), None, None)),
        ];

        for response in responses {
            state = classify(&config, state, response);
            assert!(!(state.result.is_some() && state.error.is_some()));
        }
    }

    #[test]
    fn test_unreadable_file_is_ignored() {
        let config = Config::default();
        let state = with_image(&config);
        let before = state.image.clone();

        let (state, effects) = transition(
            &config,
            state,
            Msg::ImageLoaded(Err("not an image".into())),
        );

        assert!(effects.is_empty());
        assert_eq!(state.image, before);
    }

    #[test]
    fn test_browse_and_pick() {
        let config = Config::default();

        let (state, effects) = transition(&config, State::default(), Msg::BrowseClicked);
        assert_eq!(effects, vec![Effect::PickFile]);

        let (state, effects) = transition(&config, state, Msg::FilePicked(Ok(None)));
        assert!(effects.is_empty());

        let path = PathBuf::from("/tmp/rex.jpg");
        let (_, effects) = transition(&config, state, Msg::FilePicked(Ok(Some(path.clone()))));
        assert_eq!(
            effects,
            vec![Effect::LoadImage {
                source: ImageSource::Path(path),
            }]
        );
    }

    #[test]
    fn test_drag_and_drop() {
        let config = Config::default();

        let (state, _) = transition(&config, State::default(), Msg::DragHovered);
        assert!(state.drag_active);

        let (state, _) = transition(&config, state, Msg::DragLeft);
        assert!(!state.drag_active);

        let bytes: Arc<[u8]> = sample_png().into();
        let (state, _) = transition(&config, state, Msg::DragHovered);
        let (state, effects) = transition(
            &config,
            state,
            Msg::FileDropped(ImageSource::Bytes(bytes.clone())),
        );
        assert!(!state.drag_active);
        assert_eq!(
            effects,
            vec![Effect::LoadImage {
                source: ImageSource::Bytes(bytes),
            }]
        );
    }

    #[test]
    fn test_toasts_expire_and_dismiss() {
        let config = Config::default();
        let (state, _) = init(&config);
        let (state, _) = transition(&config, state, Msg::ApiCheckDone(Err(http_error(500))));
        let (state, _) = transition(&config, state, Msg::ApiCheckRequested);
        let (state, _) = transition(
            &config,
            state,
            Msg::ApiCheckDone(Ok(TestResponse::default())),
        );
        assert_eq!(state.toasts.len(), 2);

        let first = state.toasts[0].id;
        let (state, _) = transition(&config, state, Msg::ToastDismissed(first));
        assert_eq!(state.toasts.len(), 1);
        assert_ne!(state.toasts[0].id, first);

        let (state, _) = transition(&config, state, Msg::Tick(Instant::now()));
        assert_eq!(state.toasts.len(), 1);

        let later = Instant::now() + config.toast_duration + Duration::from_millis(1);
        let (state, _) = transition(&config, state, Msg::Tick(later));
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn test_camera_follows_tab() {
        let config = Config::default();

        let (state, effects) = transition(
            &config,
            State::default(),
            Msg::InputMethodSelected(InputMethod::Camera),
        );
        assert!(matches!(state.camera, CameraState::Starting));
        assert_eq!(effects, vec![Effect::StartCamera]);

        let (state, effects) = transition(&config, state, Msg::CameraStartDone(Ok(())));
        assert!(matches!(state.camera, CameraState::Ready { .. }));
        assert!(effects.is_empty());

        let (state, effects) = transition(
            &config,
            state,
            Msg::InputMethodSelected(InputMethod::Upload),
        );
        assert!(matches!(state.camera, CameraState::Off));
        assert_eq!(effects, vec![Effect::StopCamera]);
    }

    #[test]
    fn test_camera_preview_and_capture() {
        let config = Config::default();
        let (state, _) = transition(
            &config,
            State::default(),
            Msg::InputMethodSelected(InputMethod::Camera),
        );
        let (state, _) = transition(&config, state, Msg::CameraStartDone(Ok(())));

        let now = Instant::now();
        let (state, effects) = transition(&config, state, Msg::Tick(now));
        assert_eq!(effects, vec![Effect::CapturePreview]);

        // Still waiting for the previous frame.
        let later = now + config.camera_preview_rate;
        let (state, effects) = transition(&config, state, Msg::Tick(later));
        assert!(effects.is_empty());

        // Nothing to capture yet.
        let (state, _) = transition(&config, state, Msg::CaptureClicked);
        assert!(state.image.is_none());

        let frame = image();
        let (state, _) = transition(&config, state, Msg::PreviewCaptured(Ok(frame.clone())));

        // Not due yet.
        let (state, effects) = transition(&config, state, Msg::Tick(now + Duration::from_millis(1)));
        assert!(effects.is_empty());
        let (state, effects) = transition(&config, state, Msg::Tick(later));
        assert_eq!(effects, vec![Effect::CapturePreview]);

        let (state, effects) = transition(&config, state, Msg::CaptureClicked);
        assert_eq!(state.image, Some(frame));
        assert!(matches!(state.camera, CameraState::Off));
        assert_eq!(effects, vec![Effect::StopCamera]);

        // "Take Another Photo" restarts the camera.
        let (state, effects) = transition(&config, state, Msg::ImageCleared);
        assert!(state.image.is_none());
        assert!(matches!(state.camera, CameraState::Starting));
        assert_eq!(effects, vec![Effect::StartCamera]);
    }

    #[test]
    fn test_camera_start_failure() {
        let config = Config::default();
        let (state, _) = transition(
            &config,
            State::default(),
            Msg::InputMethodSelected(InputMethod::Camera),
        );

        let (state, effects) = transition(
            &config,
            state,
            Msg::CameraStartDone(Err("no camera attached".into())),
        );
        assert!(effects.is_empty());
        match &state.camera {
            CameraState::Failed { reason } => assert_eq!(reason, "no camera attached"),
            other => panic!("Unexpected camera state: {:?}", other),
        }

        let (state, effects) = transition(
            &config,
            state,
            Msg::InputMethodSelected(InputMethod::Upload),
        );
        assert!(matches!(state.camera, CameraState::Off));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_camera_started_after_leaving_tab_is_stopped() {
        let config = Config::default();
        let (state, _) = transition(
            &config,
            State::default(),
            Msg::InputMethodSelected(InputMethod::Camera),
        );
        let (state, _) = transition(
            &config,
            state,
            Msg::InputMethodSelected(InputMethod::Upload),
        );

        let (state, effects) = transition(&config, state, Msg::CameraStartDone(Ok(())));

        assert!(matches!(state.camera, CameraState::Off));
        assert_eq!(effects, vec![Effect::StopCamera]);
    }

    #[test]
    fn test_camera_stays_off_while_photo_held() {
        let config = Config::default();
        let state = with_image(&config);

        let (state, effects) = transition(
            &config,
            state,
            Msg::InputMethodSelected(InputMethod::Camera),
        );

        assert!(matches!(state.camera, CameraState::Off));
        assert!(effects.is_empty());
    }
}
