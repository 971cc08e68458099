//! Finite voice-command grammar.
//!
//! Each [`Intent`] owns a fixed set of English and Kannada phrases. A
//! transcript resolves to the intent whose phrase is the longest one contained
//! in it; equal lengths keep declaration order.

use serde::{Deserialize, Serialize};

use crate::i18n::TranslationKey;

/// Client screens reachable by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    SignUp,
    ForgotPassword,
    Home,
    Recommender,
    Roadmap,
    Scholarships,
    Profile,
    Settings,
    Chat,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::SignUp => "/signup",
            Route::ForgotPassword => "/forgot-password",
            Route::Home => "/home",
            Route::Recommender => "/career-recommender",
            Route::Roadmap => "/roadmap",
            Route::Scholarships => "/scholarships",
            Route::Profile => "/profile",
            Route::Settings => "/settings",
            Route::Chat => "/chat",
        }
    }

    pub fn title_key(&self) -> TranslationKey {
        match self {
            Route::Login => TranslationKey::Login,
            Route::SignUp => TranslationKey::SignUp,
            Route::ForgotPassword => TranslationKey::ResetPassword,
            Route::Home => TranslationKey::Home,
            Route::Recommender => TranslationKey::Recommender,
            Route::Roadmap => TranslationKey::Roadmap,
            Route::Scholarships => TranslationKey::Scholarships,
            Route::Profile => TranslationKey::Profile,
            Route::Settings => TranslationKey::Settings,
            Route::Chat => TranslationKey::Chat,
        }
    }

    /// Screens that require a signed-in user.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::SignUp | Route::ForgotPassword)
    }
}

/// A navigation intent recognized from speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Home,
    Recommender,
    Roadmap,
    Scholarships,
    Profile,
    Settings,
    Chat,
    Logout,
}

impl Intent {
    pub fn route(&self) -> Route {
        match self {
            Intent::Home => Route::Home,
            Intent::Recommender => Route::Recommender,
            Intent::Roadmap => Route::Roadmap,
            Intent::Scholarships => Route::Scholarships,
            Intent::Profile => Route::Profile,
            Intent::Settings => Route::Settings,
            Intent::Chat => Route::Chat,
            Intent::Logout => Route::Login,
        }
    }

    pub fn english_phrases(&self) -> &'static [&'static str] {
        match self {
            Intent::Home => &["home", "main page"],
            Intent::Recommender => &["career", "recommend", "recommendation", "suggest"],
            Intent::Roadmap => &["roadmap", "road map"],
            Intent::Scholarships => &["scholarship", "loan"],
            Intent::Profile => &["profile", "account"],
            Intent::Settings => &["settings", "setting"],
            Intent::Chat => &["chat", "assistant"],
            Intent::Logout => &["logout", "log out", "sign out"],
        }
    }

    pub fn kannada_phrases(&self) -> &'static [&'static str] {
        match self {
            Intent::Home => &["ಮುಖಪುಟ", "ಮನೆ"],
            Intent::Recommender => &["ಶಿಫಾರಸು", "ವೃತ್ತಿ"],
            Intent::Roadmap => &["ರೋಡ್‌ಮ್ಯಾಪ್", "ಮಾರ್ಗಸೂಚಿ"],
            Intent::Scholarships => &["ವಿದ್ಯಾರ್ಥಿವೇತನ", "ಸಾಲ"],
            Intent::Profile => &["ಪ್ರೊಫೈಲ್", "ಖಾತೆ"],
            Intent::Settings => &["ಸೆಟ್ಟಿಂಗ್"],
            Intent::Chat => &["ಚಾಟ್", "ಸಹಾಯಕ"],
            Intent::Logout => &["ಲಾಗ್ ಔಟ್"],
        }
    }

    pub fn phrases(&self) -> impl Iterator<Item = &'static str> {
        self.english_phrases()
            .iter()
            .chain(self.kannada_phrases().iter())
            .copied()
    }
}

/// Declaration order doubles as the tie-break order.
pub const ALL_INTENTS: &[Intent] = &[
    Intent::Home,
    Intent::Recommender,
    Intent::Roadmap,
    Intent::Scholarships,
    Intent::Profile,
    Intent::Settings,
    Intent::Chat,
    Intent::Logout,
];

/// A resolved command: which intent, and the phrase that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandMatch {
    pub intent: Intent,
    pub phrase: &'static str,
}

#[derive(Debug, Clone)]
pub struct CommandGrammar {
    intents: Vec<Intent>,
}

impl Default for CommandGrammar {
    fn default() -> Self {
        Self::new(ALL_INTENTS.to_vec())
    }
}

impl CommandGrammar {
    pub fn new(intents: Vec<Intent>) -> Self {
        Self { intents }
    }

    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Longest contained phrase wins; ties keep the earlier declaration.
    /// `transcript` is expected to be normalized already.
    pub fn resolve(&self, transcript: &str) -> Option<CommandMatch> {
        let mut best: Option<(usize, CommandMatch)> = None;

        for intent in &self.intents {
            for phrase in intent.phrases() {
                if !transcript.contains(phrase) {
                    continue;
                }
                let len = phrase.chars().count();
                if best.map_or(true, |(best_len, _)| len > best_len) {
                    best = Some((
                        len,
                        CommandMatch {
                            intent: *intent,
                            phrase,
                        },
                    ));
                }
            }
        }

        best.map(|(_, m)| m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_single_keywords() {
        let grammar = CommandGrammar::default();
        assert_eq!(grammar.resolve("home").unwrap().intent, Intent::Home);
        assert_eq!(grammar.resolve("ಮುಖಪುಟ").unwrap().intent, Intent::Home);
        assert_eq!(grammar.resolve("show scholarships").unwrap().intent, Intent::Scholarships);
        assert!(grammar.resolve("xyz").is_none());
    }

    #[test]
    fn longest_phrase_beats_declaration_order() {
        let grammar = CommandGrammar::default();
        // "career" is declared before "roadmap" but is shorter
        let m = grammar.resolve("career roadmap").unwrap();
        assert_eq!(m.intent, Intent::Roadmap);
        assert_eq!(m.phrase, "roadmap");

        let m = grammar.resolve("ವೃತ್ತಿ ರೋಡ್‌ಮ್ಯಾಪ್").unwrap();
        assert_eq!(m.intent, Intent::Roadmap);
    }

    #[test]
    fn equal_length_keeps_declaration_order() {
        // "home" and "chat" are both four characters
        let grammar = CommandGrammar::default();
        assert_eq!(grammar.resolve("chat home").unwrap().intent, Intent::Home);

        let reordered = CommandGrammar::new(vec![Intent::Chat, Intent::Home]);
        assert_eq!(reordered.resolve("chat home").unwrap().intent, Intent::Chat);
    }

    #[test]
    fn logout_lands_on_login() {
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Intent::Logout.route(), Route::Login);
        assert!(!Route::Login.requires_auth());
        assert!(Route::Roadmap.requires_auth());
    }
}
