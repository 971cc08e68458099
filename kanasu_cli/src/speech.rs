//! Terminal stand-ins for the speech capabilities.
//!
//! A terminal has no microphone, so "recognition" is a transcript the user
//! types into the voice prompt, and "synthesis" is the status line.

use std::collections::VecDeque;

use kanasu_core::voice::{RecognitionEvent, SpeechRecognizer, SpeechSynthesizer, SPEECH_RATE};
use kanasu_core::Locale;

/// Recognizer whose results are typed transcripts.
#[derive(Debug, Default)]
pub struct TypedRecognizer {
    active: Option<Locale>,
    events: VecDeque<RecognitionEvent>,
}

impl TypedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locale of the pass in progress, if listening.
    pub fn active_locale(&self) -> Option<Locale> {
        self.active
    }

    /// Completes the current pass with `transcript`. An empty transcript
    /// ends the pass with a recognition error.
    pub fn submit(&mut self, transcript: &str) {
        if self.active.take().is_none() {
            return;
        }
        let transcript = transcript.trim();
        if transcript.is_empty() {
            self.events.push_back(RecognitionEvent::Error(Some(
                "No speech was detected".to_string(),
            )));
        } else {
            self.events
                .push_back(RecognitionEvent::Result(transcript.to_string()));
        }
        self.events.push_back(RecognitionEvent::Ended);
    }
}

impl SpeechRecognizer for TypedRecognizer {
    fn is_supported(&self) -> bool {
        true
    }

    fn start(&mut self, locale: Locale) -> Result<(), String> {
        if self.active.is_some() {
            return Err("already listening".to_string());
        }
        log::debug!("[VOICE] Listening ({})", locale.speech_tag());
        self.active = Some(locale);
        self.events.push_back(RecognitionEvent::Started);
        Ok(())
    }

    fn stop(&mut self) {
        if self.active.take().is_some() {
            self.events.push_back(RecognitionEvent::Ended);
        }
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        self.events.pop_front()
    }
}

/// Last utterance, shown on the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub locale: Locale,
    pub rate: f32,
}

/// Synthesizer that "speaks" by replacing the status-line utterance.
#[derive(Debug, Default)]
pub struct StatusLineSynthesizer {
    current: Option<Utterance>,
    spoken: usize,
}

impl StatusLineSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Utterance> {
        self.current.as_ref()
    }

    /// How many utterances have been spoken so far.
    pub fn spoken_count(&self) -> usize {
        self.spoken
    }
}

impl SpeechSynthesizer for StatusLineSynthesizer {
    fn speak(&mut self, text: &str, locale: Locale) {
        // a new utterance interrupts the previous one
        self.cancel();
        self.current = Some(Utterance {
            text: text.to_string(),
            locale,
            rate: SPEECH_RATE,
        });
        self.spoken += 1;
    }

    fn cancel(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_pass_emits_started_result_ended() {
        let mut rec = TypedRecognizer::new();
        rec.start(Locale::Kn).unwrap();
        assert_eq!(rec.active_locale(), Some(Locale::Kn));
        rec.submit("  open roadmap ");

        assert_eq!(rec.poll_event(), Some(RecognitionEvent::Started));
        assert_eq!(
            rec.poll_event(),
            Some(RecognitionEvent::Result("open roadmap".to_string()))
        );
        assert_eq!(rec.poll_event(), Some(RecognitionEvent::Ended));
        assert_eq!(rec.poll_event(), None);
    }

    #[test]
    fn empty_submission_is_an_error() {
        let mut rec = TypedRecognizer::new();
        rec.start(Locale::En).unwrap();
        rec.submit("   ");
        rec.poll_event();
        assert!(matches!(rec.poll_event(), Some(RecognitionEvent::Error(Some(_)))));
    }

    #[test]
    fn submit_without_start_is_ignored() {
        let mut rec = TypedRecognizer::new();
        rec.submit("home");
        assert_eq!(rec.poll_event(), None);
    }

    #[test]
    fn speaking_replaces_the_previous_utterance() {
        let mut synth = StatusLineSynthesizer::new();
        synth.speak("Opening Home", Locale::En);
        synth.speak("ಮುಖಪುಟ ತೆರೆಯಲಾಗುತ್ತಿದೆ", Locale::Kn);

        let current = synth.current().unwrap();
        assert_eq!(current.locale, Locale::Kn);
        assert_eq!(current.rate, 0.9);
        assert_eq!(synth.spoken_count(), 2);
    }
}
