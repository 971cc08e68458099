//! Voice command interpreter: transcript in, navigation + speech out.

use serde::Serialize;

use super::command::{CommandGrammar, CommandMatch, Route};
use crate::i18n::{translate, TranslationKey};
use crate::locale::{detect_locale, Locale};
use crate::notification::Notification;

/// What the caller should do in response to a transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoiceOutcome {
    Navigate {
        locale: Locale,
        route: Route,
        matched: CommandMatch,
        confirmation: String,
    },
    Unrecognized {
        locale: Locale,
        apology: String,
        notification: Notification,
    },
}

impl VoiceOutcome {
    pub fn locale(&self) -> Locale {
        match self {
            VoiceOutcome::Navigate { locale, .. } | VoiceOutcome::Unrecognized { locale, .. } => {
                *locale
            }
        }
    }

    pub fn route(&self) -> Option<Route> {
        match self {
            VoiceOutcome::Navigate { route, .. } => Some(*route),
            VoiceOutcome::Unrecognized { .. } => None,
        }
    }

    /// The sentence to speak back to the user.
    pub fn spoken(&self) -> &str {
        match self {
            VoiceOutcome::Navigate { confirmation, .. } => confirmation,
            VoiceOutcome::Unrecognized { apology, .. } => apology,
        }
    }
}

/// Side effects the interpreter's caller knows how to perform.
pub trait VoiceSink {
    fn navigate(&mut self, route: Route);
    fn speak(&mut self, text: &str, locale: Locale);
    fn notify(&mut self, notification: Notification);
}

#[derive(Debug, Clone, Default)]
pub struct VoiceCommandInterpreter {
    grammar: CommandGrammar,
}

impl VoiceCommandInterpreter {
    pub fn new(grammar: CommandGrammar) -> Self {
        Self { grammar }
    }

    /// Trim and lowercase, the way recognizer output is compared.
    pub fn normalize(transcript: &str) -> String {
        transcript.trim().to_lowercase()
    }

    pub fn interpret(&self, transcript: &str) -> VoiceOutcome {
        let normalized = Self::normalize(transcript);
        let locale = detect_locale(&normalized);

        match self.grammar.resolve(&normalized) {
            Some(matched) => {
                let route = matched.intent.route();
                log::info!(
                    "[VOICE] '{}' -> {} via '{}' ({})",
                    normalized,
                    route.path(),
                    matched.phrase,
                    locale
                );
                VoiceOutcome::Navigate {
                    locale,
                    route,
                    matched,
                    confirmation: confirmation(route, locale),
                }
            }
            None => {
                log::info!("[VOICE] No command matched '{}' ({})", normalized, locale);
                VoiceOutcome::Unrecognized {
                    locale,
                    apology: apology(locale).to_string(),
                    notification: Notification::destructive(
                        translate(locale, TranslationKey::VoiceCommand),
                        unrecognized_description(locale, transcript.trim()),
                    ),
                }
            }
        }
    }

    /// Interprets `transcript` and applies the outcome to `sink`.
    pub fn dispatch(&self, transcript: &str, sink: &mut dyn VoiceSink) -> VoiceOutcome {
        let outcome = self.interpret(transcript);
        apply(&outcome, sink);
        outcome
    }
}

pub fn apply(outcome: &VoiceOutcome, sink: &mut dyn VoiceSink) {
    match outcome {
        VoiceOutcome::Navigate {
            locale,
            route,
            confirmation,
            ..
        } => {
            sink.navigate(*route);
            sink.speak(confirmation, *locale);
        }
        VoiceOutcome::Unrecognized {
            locale,
            apology,
            notification,
        } => {
            sink.speak(apology, *locale);
            sink.notify(notification.clone());
        }
    }
}

fn confirmation(route: Route, locale: Locale) -> String {
    let label = translate(locale, route.title_key());
    match locale {
        Locale::En => format!("Opening {}", label),
        Locale::Kn => format!("{} ತೆರೆಯಲಾಗುತ್ತಿದೆ", label),
    }
}

fn apology(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Sorry, I did not understand that command.",
        Locale::Kn => "ಕ್ಷಮಿಸಿ, ಆ ಆದೇಶ ಅರ್ಥವಾಗಲಿಲ್ಲ.",
    }
}

fn unrecognized_description(locale: Locale, transcript: &str) -> String {
    match locale {
        Locale::En => format!("Command not recognized: \"{}\"", transcript),
        Locale::Kn => format!("ಆದೇಶ ಗುರುತಿಸಲಾಗಿಲ್ಲ: \"{}\"", transcript),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        routes: Vec<Route>,
        spoken: Vec<(String, Locale)>,
        notices: Vec<Notification>,
    }

    impl VoiceSink for RecordingSink {
        fn navigate(&mut self, route: Route) {
            self.routes.push(route);
        }
        fn speak(&mut self, text: &str, locale: Locale) {
            self.spoken.push((text.to_string(), locale));
        }
        fn notify(&mut self, notification: Notification) {
            self.notices.push(notification);
        }
    }

    #[test]
    fn home_in_english() {
        let outcome = VoiceCommandInterpreter::default().interpret("home");
        assert_eq!(outcome.route(), Some(Route::Home));
        assert_eq!(outcome.locale(), Locale::En);
        assert_eq!(outcome.spoken(), "Opening Home");
    }

    #[test]
    fn home_in_kannada() {
        let outcome = VoiceCommandInterpreter::default().interpret("ಮುಖಪುಟ");
        assert_eq!(outcome.route(), Some(Route::Home));
        assert_eq!(outcome.locale(), Locale::Kn);
        assert_eq!(outcome.spoken(), "ಮುಖಪುಟ ತೆರೆಯಲಾಗುತ್ತಿದೆ");
    }

    #[test]
    fn raw_transcripts_are_normalized() {
        let outcome = VoiceCommandInterpreter::default().interpret("  Open My PROFILE ");
        assert_eq!(outcome.route(), Some(Route::Profile));
    }

    #[test]
    fn dispatch_navigates_then_speaks() {
        let mut sink = RecordingSink::default();
        VoiceCommandInterpreter::default().dispatch("scholarship", &mut sink);
        assert_eq!(sink.routes, vec![Route::Scholarships]);
        assert_eq!(sink.spoken.len(), 1);
        assert!(sink.notices.is_empty());
    }

    #[test]
    fn unmatched_transcript_apologizes_without_navigating() {
        let mut sink = RecordingSink::default();
        let outcome = VoiceCommandInterpreter::default().dispatch("xyz", &mut sink);

        assert!(outcome.route().is_none());
        assert!(sink.routes.is_empty());
        assert_eq!(
            sink.spoken,
            vec![("Sorry, I did not understand that command.".to_string(), Locale::En)]
        );
        assert_eq!(sink.notices.len(), 1);
        assert!(sink.notices[0].is_error());
    }

    #[test]
    fn unmatched_kannada_apologizes_in_kannada() {
        let mut sink = RecordingSink::default();
        VoiceCommandInterpreter::default().dispatch("ನಮಸ್ಕಾರ", &mut sink);

        assert!(sink.routes.is_empty());
        assert_eq!(sink.spoken[0].1, Locale::Kn);
        assert_eq!(sink.notices[0].title, "ಧ್ವನಿ ಆದೇಶ");
    }
}
