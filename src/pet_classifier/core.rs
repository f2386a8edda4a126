use crate::config::Config;
use crate::image_classifier::interface::{ApiError, Label, PredictResponse, TestResponse};
use crate::image_data::ImageData;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

pub const MISSING_IMAGE_ERROR: &str = "Please select or capture an image first";
pub const CLASSIFY_FAILED_ERROR: &str = "Failed to process the image. Please try again.";
pub const API_CONNECTED_TITLE: &str = "API Connection Successful";
pub const API_CONNECTED_FALLBACK: &str = "Connection to the API is working!";
pub const API_FAILED_TITLE: &str = "API Connection Failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMethod {
    #[default]
    Upload,
    Camera,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Unknown,
    Connected,
    Disconnected,
    Checking,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub label: Label,
    pub confidence: f32,
}

impl PredictionResult {
    /// Reads the label from `result`, falling back to `prediction` when
    /// `result` is absent or empty. `None` when neither names a known label.
    pub fn from_response(response: &PredictResponse, default_confidence: f32) -> Option<Self> {
        let raw_label = response
            .result
            .as_deref()
            .filter(|label| !label.is_empty())
            .or(response.prediction.as_deref())?;

        Some(Self {
            label: Label::parse(raw_label)?,
            confidence: response
                .confidence
                .unwrap_or(default_confidence)
                .clamp(0.0, 1.0),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub enum CameraState {
    #[default]
    Off,
    Starting,
    Ready {
        preview: Option<ImageData>,
        preview_pending: bool,
        last_preview: Option<Instant>,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Failure,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub created_at: Instant,
}

#[derive(Clone, PartialEq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => write!(f, "Path({})", path.display()),
            ImageSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct State {
    pub input_method: InputMethod,
    pub image: Option<ImageData>,
    /// Bumped every time the image is replaced or cleared.
    pub image_generation: u64,
    /// Generation of the image whose classification is in flight.
    pub classifying: Option<u64>,
    pub result: Option<PredictionResult>,
    pub error: Option<String>,
    pub api_status: ApiStatus,
    pub camera: CameraState,
    pub drag_active: bool,
    pub toasts: Vec<Toast>,
    pub next_toast_id: u64,
}

impl State {
    pub fn is_classifying(&self) -> bool {
        self.classifying.is_some()
    }

    pub fn can_classify(&self) -> bool {
        self.image.is_some() && !self.is_classifying()
    }

    pub fn can_test_api(&self) -> bool {
        !self.is_classifying() && self.api_status != ApiStatus::Checking
    }

    fn camera_wanted(&self) -> bool {
        self.input_method == InputMethod::Camera && self.image.is_none()
    }

    fn select_image(&mut self, image: Option<ImageData>) {
        self.image = image;
        self.image_generation += 1;
        self.result = None;
        self.error = None;
    }

    fn push_toast(&mut self, variant: ToastVariant, title: &str, description: String) {
        self.toasts.push(Toast {
            id: self.next_toast_id,
            title: title.to_string(),
            description,
            variant,
            created_at: Instant::now(),
        });
        self.next_toast_id += 1;
    }
}

#[derive(Debug)]
pub enum Msg {
    Tick(Instant),
    InputMethodSelected(InputMethod),
    BrowseClicked,
    FilePicked(Result<Option<PathBuf>, Box<dyn std::error::Error + Send + Sync>>),
    DragHovered,
    DragLeft,
    FileDropped(ImageSource),
    ImageLoaded(Result<ImageData, Box<dyn std::error::Error + Send + Sync>>),
    ImageCleared,
    CameraStartDone(Result<(), Box<dyn std::error::Error + Send + Sync>>),
    PreviewCaptured(Result<ImageData, Box<dyn std::error::Error + Send + Sync>>),
    CaptureClicked,
    ClassifyClicked,
    ClassifyDone {
        generation: u64,
        response: Result<PredictResponse, ApiError>,
    },
    ResetClicked,
    ApiCheckRequested,
    ApiCheckDone(Result<TestResponse, ApiError>),
    ToastDismissed(u64),
}

impl Msg {
    /// Ticks arrive many times a second and are not worth logging.
    pub fn is_noisy(&self) -> bool {
        matches!(self, Msg::Tick(_) | Msg::PreviewCaptured(Ok(_)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeTick,
    PickFile,
    LoadImage { source: ImageSource },
    StartCamera,
    StopCamera,
    CapturePreview,
    Classify { generation: u64, image: ImageData },
    CheckApi,
}

/// The start-up state. The connectivity check runs once immediately.
pub fn init(config: &Config) -> (State, Vec<Effect>) {
    let (state, mut effects) = transition(config, State::default(), Msg::ApiCheckRequested);
    effects.insert(0, Effect::SubscribeTick);
    (state, effects)
}

pub fn transition(config: &Config, state: State, msg: Msg) -> (State, Vec<Effect>) {
    let (mut state, mut effects) = update(config, state, msg);
    reconcile_camera(&mut state, &mut effects);
    (state, effects)
}

fn update(config: &Config, mut state: State, msg: Msg) -> (State, Vec<Effect>) {
    match msg {
        Msg::Tick(now) => {
            state
                .toasts
                .retain(|toast| now.saturating_duration_since(toast.created_at) < config.toast_duration);

            let mut effects = vec![];
            let previewing = state.camera_wanted();
            if let CameraState::Ready {
                preview_pending,
                last_preview,
                ..
            } = &mut state.camera
            {
                let due = last_preview.map_or(true, |last| {
                    now.saturating_duration_since(last) >= config.camera_preview_rate
                });
                if previewing && !*preview_pending && due {
                    *preview_pending = true;
                    *last_preview = Some(now);
                    effects.push(Effect::CapturePreview);
                }
            }
            (state, effects)
        }

        // Acquisition
        Msg::InputMethodSelected(input_method) => {
            state.input_method = input_method;
            state.drag_active = false;
            (state, vec![])
        }
        Msg::BrowseClicked => (state, vec![Effect::PickFile]),
        Msg::FilePicked(Ok(Some(path))) => (
            state,
            vec![Effect::LoadImage {
                source: ImageSource::Path(path),
            }],
        ),
        Msg::FilePicked(_) => (state, vec![]),
        Msg::DragHovered => {
            state.drag_active = true;
            (state, vec![])
        }
        Msg::DragLeft => {
            state.drag_active = false;
            (state, vec![])
        }
        Msg::FileDropped(source) => {
            state.drag_active = false;
            (state, vec![Effect::LoadImage { source }])
        }
        Msg::ImageLoaded(Ok(image)) => {
            state.select_image(Some(image));
            (state, vec![])
        }
        // Files that are not images are ignored.
        Msg::ImageLoaded(Err(_)) => (state, vec![]),
        Msg::ImageCleared | Msg::ResetClicked => {
            state.select_image(None);
            (state, vec![])
        }

        // Camera
        Msg::CameraStartDone(Ok(())) => match state.camera {
            CameraState::Starting => {
                state.camera = CameraState::Ready {
                    preview: None,
                    preview_pending: false,
                    last_preview: None,
                };
                (state, vec![])
            }
            // The tab was left while the camera was starting.
            CameraState::Off => (state, vec![Effect::StopCamera]),
            _ => (state, vec![]),
        },
        Msg::CameraStartDone(Err(e)) => {
            if matches!(state.camera, CameraState::Starting) {
                state.camera = CameraState::Failed {
                    reason: e.to_string(),
                };
            }
            (state, vec![])
        }
        Msg::PreviewCaptured(frame) => {
            if let CameraState::Ready {
                preview,
                preview_pending,
                ..
            } = &mut state.camera
            {
                *preview_pending = false;
                if let Ok(frame) = frame {
                    *preview = Some(frame);
                }
            }
            (state, vec![])
        }
        Msg::CaptureClicked => {
            let captured = match &state.camera {
                CameraState::Ready {
                    preview: Some(preview),
                    ..
                } => Some(preview.clone()),
                _ => None,
            };
            if let Some(image) = captured {
                state.select_image(Some(image));
            }
            (state, vec![])
        }

        // Classification
        Msg::ClassifyClicked => {
            if state.is_classifying() {
                return (state, vec![]);
            }
            let Some(image) = state.image.clone() else {
                state.result = None;
                state.error = Some(MISSING_IMAGE_ERROR.to_string());
                return (state, vec![]);
            };

            let generation = state.image_generation;
            state.classifying = Some(generation);
            state.result = None;
            state.error = None;
            (state, vec![Effect::Classify { generation, image }])
        }
        Msg::ClassifyDone {
            generation,
            response,
        } => {
            if state.classifying == Some(generation) {
                state.classifying = None;
            }
            // The image was replaced or reset while the request was in flight.
            if generation != state.image_generation {
                return (state, vec![]);
            }

            let prediction = response
                .ok()
                .and_then(|body| PredictionResult::from_response(&body, config.default_confidence));
            match prediction {
                Some(prediction) => {
                    state.result = Some(prediction);
                    state.error = None;
                }
                None => {
                    state.result = None;
                    state.error = Some(CLASSIFY_FAILED_ERROR.to_string());
                }
            }
            (state, vec![])
        }

        // Connectivity
        Msg::ApiCheckRequested => {
            if state.api_status == ApiStatus::Checking {
                return (state, vec![]);
            }
            state.api_status = ApiStatus::Checking;
            (state, vec![Effect::CheckApi])
        }
        Msg::ApiCheckDone(response) => {
            if state.api_status != ApiStatus::Checking {
                return (state, vec![]);
            }
            match response {
                Ok(body) => {
                    state.api_status = ApiStatus::Connected;
                    let description = body
                        .message
                        .filter(|message| !message.is_empty())
                        .unwrap_or_else(|| API_CONNECTED_FALLBACK.to_string());
                    state.push_toast(ToastVariant::Success, API_CONNECTED_TITLE, description);
                }
                Err(_) => {
                    state.api_status = ApiStatus::Disconnected;
                    let description = format!(
                        "Could not connect to the API at {}. Please check if it's running.",
                        config.api_url
                    );
                    state.push_toast(ToastVariant::Failure, API_FAILED_TITLE, description);
                }
            }
            (state, vec![])
        }
        Msg::ToastDismissed(id) => {
            state.toasts.retain(|toast| toast.id != id);
            (state, vec![])
        }
    }
}

/// The camera runs only while the camera tab is open and no photo is held.
fn reconcile_camera(state: &mut State, effects: &mut Vec<Effect>) {
    let wanted = state.camera_wanted();
    match (&state.camera, wanted) {
        (CameraState::Off, true) => {
            state.camera = CameraState::Starting;
            effects.push(Effect::StartCamera);
        }
        (CameraState::Starting | CameraState::Ready { .. }, false) => {
            state.camera = CameraState::Off;
            effects.push(Effect::StopCamera);
        }
        (CameraState::Failed { .. }, false) => {
            state.camera = CameraState::Off;
        }
        _ => {}
    }
}
