use kanasu_core::locale::{detect_locale, Locale};
use kanasu_core::notification::Notification;
use kanasu_core::voice::{
    Route, RecognitionEvent, SpeechRecognizer, VoiceCommandInterpreter, VoiceController,
    VoiceOutcome, VoiceSink,
};
use std::collections::VecDeque;

#[derive(Default)]
struct Screen {
    route: Option<Route>,
    spoken: Vec<(String, Locale)>,
    toasts: Vec<Notification>,
}

impl VoiceSink for Screen {
    fn navigate(&mut self, route: Route) {
        self.route = Some(route);
    }
    fn speak(&mut self, text: &str, locale: Locale) {
        self.spoken.push((text.to_string(), locale));
    }
    fn notify(&mut self, notification: Notification) {
        self.toasts.push(notification);
    }
}

struct TypedRecognizer {
    queue: VecDeque<RecognitionEvent>,
}

impl TypedRecognizer {
    fn saying(text: &str) -> Self {
        Self {
            queue: VecDeque::from(vec![
                RecognitionEvent::Started,
                RecognitionEvent::Result(text.to_string()),
                RecognitionEvent::Ended,
            ]),
        }
    }
}

impl SpeechRecognizer for TypedRecognizer {
    fn is_supported(&self) -> bool {
        true
    }
    fn start(&mut self, _locale: Locale) -> Result<(), String> {
        Ok(())
    }
    fn stop(&mut self) {}
    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        self.queue.pop_front()
    }
}

#[test]
fn test_kannada_block_detection() {
    assert_eq!(detect_locale("open home"), Locale::En);
    assert_eq!(detect_locale("ಮನೆ"), Locale::Kn);
    // one Kannada character is enough
    assert_eq!(detect_locale("go to ಚಾಟ್ please"), Locale::Kn);
    assert_eq!(detect_locale("\u{0C80}"), Locale::Kn);
    assert_eq!(detect_locale("\u{0CFF}"), Locale::Kn);
    assert_eq!(detect_locale("\u{0D00}"), Locale::En);
}

#[test]
fn test_recognizer_to_navigation_pipeline() {
    let interpreter = VoiceCommandInterpreter::default();
    let mut recognizer = TypedRecognizer::saying("Show my Career Roadmap");
    let mut controller = VoiceController::new();
    let mut screen = Screen::default();

    assert!(controller.start(&mut recognizer, Locale::En).is_none());
    let (transcript, notices) = controller.pump(&mut recognizer, Locale::En);
    assert!(notices.is_empty());

    let outcome = interpreter.dispatch(&transcript.unwrap(), &mut screen);
    assert_eq!(screen.route, Some(Route::Roadmap));
    assert_eq!(screen.spoken, vec![("Opening Career Roadmap".to_string(), Locale::En)]);
    assert!(screen.toasts.is_empty());

    match outcome {
        VoiceOutcome::Navigate { matched, .. } => assert_eq!(matched.phrase, "roadmap"),
        other => panic!("expected navigation, got {:?}", other),
    }
}

#[test]
fn test_kannada_commands_confirm_in_kannada() {
    let interpreter = VoiceCommandInterpreter::default();
    let cases = [
        ("ವಿದ್ಯಾರ್ಥಿವೇತನ ತೋರಿಸಿ", Route::Scholarships),
        ("ನನ್ನ ಪ್ರೊಫೈಲ್", Route::Profile),
        ("ಲಾಗ್ ಔಟ್", Route::Login),
    ];

    for (transcript, expected) in cases {
        let outcome = interpreter.interpret(transcript);
        assert_eq!(outcome.route(), Some(expected), "transcript {transcript}");
        assert_eq!(outcome.locale(), Locale::Kn);
        assert!(outcome.spoken().ends_with("ತೆರೆಯಲಾಗುತ್ತಿದೆ"));
    }
}

#[test]
fn test_unmatched_command_does_not_navigate() {
    let interpreter = VoiceCommandInterpreter::default();
    let mut screen = Screen::default();

    interpreter.dispatch("xyz", &mut screen);
    assert!(screen.route.is_none());
    assert_eq!(screen.toasts.len(), 1);
    assert_eq!(screen.spoken[0].1, Locale::En);
}
