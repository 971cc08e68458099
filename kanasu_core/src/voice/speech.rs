//! Speech capability seams.
//!
//! Recognition and synthesis are platform capabilities; the client talks to
//! them only through these traits so an absent capability degrades to
//! "no mic control" instead of an error path.

use crate::i18n::{translate, TranslationKey};
use crate::locale::Locale;
use crate::notification::Notification;

/// Synthesis speaking rate used for confirmations.
pub const SPEECH_RATE: f32 = 0.9;

/// Events a recognizer delivers during one listening pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Started,
    Result(String),
    Error(Option<String>),
    Ended,
}

pub trait SpeechRecognizer {
    fn is_supported(&self) -> bool;
    /// Begin one non-continuous listening pass in `locale`'s speech tag.
    fn start(&mut self, locale: Locale) -> Result<(), String>;
    fn stop(&mut self);
    /// Next pending event, if any.
    fn poll_event(&mut self) -> Option<RecognitionEvent>;
}

pub trait SpeechSynthesizer {
    fn speak(&mut self, text: &str, locale: Locale);
    fn cancel(&mut self);
}

/// The capability is absent on this platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSpeech;

impl SpeechRecognizer for UnsupportedSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _locale: Locale) -> Result<(), String> {
        Err("speech recognition unavailable".to_string())
    }

    fn stop(&mut self) {}

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        None
    }
}

impl SpeechSynthesizer for UnsupportedSpeech {
    fn speak(&mut self, _text: &str, _locale: Locale) {}
    fn cancel(&mut self) {}
}

/// Tracks listening state across recognizer events.
#[derive(Debug, Default)]
pub struct VoiceController {
    listening: bool,
    transcript: String,
}

impl VoiceController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Starts a pass. Returns a notification when recognition is unavailable.
    pub fn start(
        &mut self,
        recognizer: &mut dyn SpeechRecognizer,
        locale: Locale,
    ) -> Option<Notification> {
        if !recognizer.is_supported() {
            return Some(Notification::destructive(
                translate(locale, TranslationKey::VoiceNotSupported),
                "Your device does not support voice input",
            ));
        }
        if let Err(e) = recognizer.start(locale) {
            log::warn!("[VOICE] Failed to start recognition: {}", e);
            self.listening = false;
        }
        None
    }

    pub fn stop(&mut self, recognizer: &mut dyn SpeechRecognizer) {
        if recognizer.is_supported() {
            recognizer.stop();
            self.listening = false;
        }
    }

    /// Applies one event. A final transcript is returned for interpretation;
    /// errors come back as a notification.
    pub fn handle_event(
        &mut self,
        event: RecognitionEvent,
        locale: Locale,
    ) -> (Option<String>, Option<Notification>) {
        match event {
            RecognitionEvent::Started => {
                self.listening = true;
                self.transcript.clear();
                (None, None)
            }
            RecognitionEvent::Result(text) => {
                self.transcript = text.clone();
                (Some(text), None)
            }
            RecognitionEvent::Error(message) => {
                log::warn!("[VOICE] Recognition error: {:?}", message);
                self.listening = false;
                let description = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Failed to recognize speech".to_string());
                (
                    None,
                    Some(Notification::destructive(
                        translate(locale, TranslationKey::VoiceError),
                        description,
                    )),
                )
            }
            RecognitionEvent::Ended => {
                self.listening = false;
                (None, None)
            }
        }
    }

    /// Drains every pending event; returns the last transcript and notifications.
    pub fn pump(
        &mut self,
        recognizer: &mut dyn SpeechRecognizer,
        locale: Locale,
    ) -> (Option<String>, Vec<Notification>) {
        let mut transcript = None;
        let mut notices = Vec::new();
        while let Some(event) = recognizer.poll_event() {
            let (text, notice) = self.handle_event(event, locale);
            if text.is_some() {
                transcript = text;
            }
            notices.extend(notice);
        }
        (transcript, notices)
    }
}
