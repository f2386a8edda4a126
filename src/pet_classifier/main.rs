use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_file_picker::interface::DeviceFilePicker;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::pet_classifier::core::{init, transition, CameraState, Effect, Msg, State};
use crate::pet_classifier::run_effect::RunEffect;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

pub type Repaint = Arc<dyn Fn() + Send + Sync>;

/// Owns the model and the message loop. Cloned handles share both.
#[derive(Clone)]
pub struct PetClassifier {
    model: Arc<Mutex<State>>,
    event_sender: Sender<Msg>,
    event_receiver: Arc<Mutex<Option<Receiver<Msg>>>>,
    pub config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    run_effect: RunEffect,
}

impl PetClassifier {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_file_picker: Arc<dyn DeviceFilePicker + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            device_camera,
            device_file_picker,
            image_classifier,
            event_sender.clone(),
        );

        Self {
            model: Arc::new(Mutex::new(State::default())),
            event_sender,
            event_receiver: Arc::new(Mutex::new(Some(event_receiver))),
            config,
            logger: logger.with_namespace("pet_classifier"),
            run_effect,
        }
    }

    fn lock_model(&self) -> MutexGuard<'_, State> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> State {
        self.lock_model().clone()
    }

    pub fn send(&self, msg: Msg) {
        if self.event_sender.send(msg).is_err() {
            let _ = self.logger.error("Event loop has stopped");
        }
    }

    /// Starts the message loop on its own thread. `repaint` is called after
    /// every transition so the GUI picks up the new model.
    pub fn start(&self, repaint: Repaint) -> Result<JoinHandle<()>, String> {
        let receiver = self
            .event_receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or("pet classifier loop already started")?;

        let self_clone = self.clone();
        Ok(std::thread::spawn(move || {
            self_clone.run_loop(receiver, repaint)
        }))
    }

    fn run_loop(&self, receiver: Receiver<Msg>, repaint: Repaint) {
        let (initial, effects) = init(&self.config);
        *self.lock_model() = initial.clone();
        repaint();
        self.spawn_effects(effects);

        let mut current = initial;
        while let Ok(msg) = receiver.recv() {
            let noisy = msg.is_noisy();
            if !noisy {
                let _ = self.logger.info(&format!("msg: {:?}", msg));
            }

            let (new_model, effects) = transition(&self.config, current, msg);

            if !effects.is_empty() && !(noisy && effects == [Effect::CapturePreview]) {
                let _ = self.logger.info(&format!("effects: {:?}", effects));
            }

            current = new_model.clone();
            *self.lock_model() = new_model;
            repaint();

            self.spawn_effects(effects);
        }

        let _ = self.logger.info("Event loop stopped");
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    /// Releases the camera when the window closes.
    pub fn shutdown(&self) {
        if !matches!(self.lock_model().camera, CameraState::Off) {
            self.run_effect.run_effect(Effect::StopCamera);
        }
    }
}
