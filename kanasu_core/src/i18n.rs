//! Static English/Kannada string tables.
//!
//! Lookup falls back from the active locale to English and finally to the
//! key's own name, so a missing Kannada entry never renders as an empty label.

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationKey {
    SignUp,
    Login,
    Email,
    Password,
    ConfirmPassword,
    Name,
    Age,
    Gender,
    Location,
    PreferredLanguage,
    ForgotPassword,
    ResetPassword,
    ResetLinkSent,
    Home,
    Recommender,
    Scholarships,
    Profile,
    Settings,
    Chat,
    GetRecommendations,
    TopCareerMatches,
    ViewRoadmap,
    Confidence,
    Education,
    Stream,
    Interests,
    Skills,
    Roadmap,
    ShortTerm,
    MediumTerm,
    LongTerm,
    NearbyInstitutions,
    Eligibility,
    Amount,
    SearchScholarships,
    NoScholarships,
    VoiceGuidance,
    LanguageUpdated,
    ProfileUpdated,
    Logout,
    Version,
    Listening,
    TapToSpeak,
    VoiceCommand,
    VoiceNotSupported,
    VoiceError,
    Loading,
    Error,
    Success,
    Save,
    Cancel,
    Back,
    AskSomething,
}

impl TranslationKey {
    /// Identifier used when neither table has an entry.
    pub fn name(&self) -> &'static str {
        match self {
            TranslationKey::SignUp => "signUp",
            TranslationKey::Login => "login",
            TranslationKey::Email => "email",
            TranslationKey::Password => "password",
            TranslationKey::ConfirmPassword => "confirmPassword",
            TranslationKey::Name => "name",
            TranslationKey::Age => "age",
            TranslationKey::Gender => "gender",
            TranslationKey::Location => "location",
            TranslationKey::PreferredLanguage => "preferredLanguage",
            TranslationKey::ForgotPassword => "forgotPassword",
            TranslationKey::ResetPassword => "resetPassword",
            TranslationKey::ResetLinkSent => "resetLinkSent",
            TranslationKey::Home => "home",
            TranslationKey::Recommender => "recommender",
            TranslationKey::Scholarships => "scholarships",
            TranslationKey::Profile => "profile",
            TranslationKey::Settings => "settings",
            TranslationKey::Chat => "chat",
            TranslationKey::GetRecommendations => "getRecommendations",
            TranslationKey::TopCareerMatches => "topCareerMatches",
            TranslationKey::ViewRoadmap => "viewRoadmap",
            TranslationKey::Confidence => "confidence",
            TranslationKey::Education => "education",
            TranslationKey::Stream => "stream",
            TranslationKey::Interests => "interests",
            TranslationKey::Skills => "skills",
            TranslationKey::Roadmap => "roadmap",
            TranslationKey::ShortTerm => "shortTerm",
            TranslationKey::MediumTerm => "mediumTerm",
            TranslationKey::LongTerm => "longTerm",
            TranslationKey::NearbyInstitutions => "nearbyInstitutions",
            TranslationKey::Eligibility => "eligibility",
            TranslationKey::Amount => "amount",
            TranslationKey::SearchScholarships => "searchScholarships",
            TranslationKey::NoScholarships => "noScholarships",
            TranslationKey::VoiceGuidance => "voiceGuidance",
            TranslationKey::LanguageUpdated => "languageUpdated",
            TranslationKey::ProfileUpdated => "profileUpdated",
            TranslationKey::Logout => "logout",
            TranslationKey::Version => "version",
            TranslationKey::Listening => "listening",
            TranslationKey::TapToSpeak => "tapToSpeak",
            TranslationKey::VoiceCommand => "voiceCommand",
            TranslationKey::VoiceNotSupported => "voiceNotSupported",
            TranslationKey::VoiceError => "voiceError",
            TranslationKey::Loading => "loading",
            TranslationKey::Error => "error",
            TranslationKey::Success => "success",
            TranslationKey::Save => "save",
            TranslationKey::Cancel => "cancel",
            TranslationKey::Back => "back",
            TranslationKey::AskSomething => "askSomething",
        }
    }
}

fn english(key: TranslationKey) -> Option<&'static str> {
    use TranslationKey::*;
    Some(match key {
        SignUp => "Sign Up",
        Login => "Login",
        Email => "Email",
        Password => "Password",
        ConfirmPassword => "Confirm Password",
        Name => "Name",
        Age => "Age",
        Gender => "Gender",
        Location => "Location",
        PreferredLanguage => "Preferred Language",
        ForgotPassword => "Forgot Password?",
        ResetPassword => "Reset Password",
        ResetLinkSent => "If an account exists, a reset link has been sent",
        Home => "Home",
        Recommender => "Career Recommender",
        Scholarships => "Scholarships & Loans",
        Profile => "Profile",
        Settings => "Settings",
        Chat => "Chat",
        GetRecommendations => "Get Recommendations",
        TopCareerMatches => "Top Career Matches",
        ViewRoadmap => "View Roadmap",
        Confidence => "Confidence",
        Education => "Education Level",
        Stream => "Stream",
        Interests => "Interests",
        Skills => "Skills",
        Roadmap => "Career Roadmap",
        ShortTerm => "Short Term (0-1 years)",
        MediumTerm => "Medium Term (1-3 years)",
        LongTerm => "Long Term (3+ years)",
        NearbyInstitutions => "Nearby Institutions",
        Eligibility => "Eligibility",
        Amount => "Amount",
        SearchScholarships => "Search scholarships",
        NoScholarships => "No scholarships found",
        VoiceGuidance => "Voice Guidance",
        LanguageUpdated => "Language updated",
        ProfileUpdated => "Profile updated",
        Logout => "Logout",
        Version => "Version",
        Listening => "Listening...",
        TapToSpeak => "Tap to speak",
        VoiceCommand => "Voice Command",
        VoiceNotSupported => "Voice not supported",
        VoiceError => "Voice error",
        Loading => "Loading...",
        Error => "Error",
        Success => "Success",
        Save => "Save",
        Cancel => "Cancel",
        Back => "Back",
        AskSomething => "Ask something...",
    })
}

fn kannada(key: TranslationKey) -> Option<&'static str> {
    use TranslationKey::*;
    let text = match key {
        SignUp => "ಸೈನ್ ಅಪ್",
        Login => "ಲಾಗಿನ್",
        Email => "ಇಮೇಲ್",
        Password => "ಪಾಸ್‌ವರ್ಡ್",
        ConfirmPassword => "ಪಾಸ್‌ವರ್ಡ್ ದೃಢೀಕರಿಸಿ",
        Name => "ಹೆಸರು",
        Age => "ವಯಸ್ಸು",
        Location => "ಸ್ಥಳ",
        PreferredLanguage => "ಆಯ್ಕೆಮಾಡಿದ ಭಾಷೆ",
        ForgotPassword => "ಪಾಸ್‌ವರ್ಡ್ ಮರೆತಿರಾ?",
        ResetPassword => "ಪಾಸ್‌ವರ್ಡ್ ಮರುಹೊಂದಿಸಿ",
        Home => "ಮುಖಪುಟ",
        Recommender => "ವೃತ್ತಿ ಶಿಫಾರಸು",
        Scholarships => "ವಿದ್ಯಾರ್ಥಿವೇತನ ಮತ್ತು ಸಾಲಗಳು",
        Profile => "ಪ್ರೊಫೈಲ್",
        Settings => "ಸೆಟ್ಟಿಂಗ್‌ಗಳು",
        Chat => "ಚಾಟ್",
        GetRecommendations => "ಶಿಫಾರಸುಗಳನ್ನು ಪಡೆಯಿರಿ",
        TopCareerMatches => "ಉತ್ತಮ ವೃತ್ತಿ ಸೂಕ್ತತೆಗಳು",
        ViewRoadmap => "ರೋಡ್‌ಮ್ಯಾಪ್ ವೀಕ್ಷಿಸಿ",
        Confidence => "ವಿಶ್ವಾಸ",
        Education => "ಶಿಕ್ಷಣ ಮಟ್ಟ",
        Stream => "ಸ್ಟ್ರೀಮ್",
        Interests => "ಆಸಕ್ತಿಗಳು",
        Skills => "ಕೌಶಲ್ಯಗಳು",
        Roadmap => "ವೃತ್ತಿ ರೋಡ್‌ಮ್ಯಾಪ್",
        ShortTerm => "ಅಲ್ಪಾವಧಿ (0-1 ವರ್ಷಗಳು)",
        MediumTerm => "ಮಧ್ಯಾವಧಿ (1-3 ವರ್ಷಗಳು)",
        LongTerm => "ದೀರ್ಘಾವಧಿ (3+ ವರ್ಷಗಳು)",
        NearbyInstitutions => "ಹತ್ತಿರದ ಸಂಸ್ಥೆಗಳು",
        VoiceGuidance => "ವಾಯ್ಸ್ ಮಾರ್ಗದರ್ಶನ",
        Logout => "ಲಾಗ್ ಔಟ್",
        Version => "ಆವೃತ್ತಿ",
        Listening => "ಕೇಳುತ್ತಿದೆ...",
        TapToSpeak => "ಮಾತನಾಡಲು ಟ್ಯಾಪ್ ಮಾಡಿ",
        VoiceCommand => "ಧ್ವನಿ ಆದೇಶ",
        Loading => "ಲೋಡ್ ಆಗುತ್ತಿದೆ...",
        Error => "ದೋಷ",
        Success => "ಯಶಸ್ವಿ",
        Save => "ಉಳಿಸಿ",
        Cancel => "ರದ್ದುಮಾಡಿ",
        Back => "ಹಿಂದೆ",
        // Not yet translated; English is used instead.
        Gender | ResetLinkSent | Eligibility | Amount | SearchScholarships | NoScholarships
        | LanguageUpdated | ProfileUpdated | VoiceNotSupported | VoiceError | AskSomething => {
            return None
        }
    };
    Some(text)
}

/// Looks up `key` for `locale`, falling back to English, then to the key name.
pub fn translate(locale: Locale, key: TranslationKey) -> &'static str {
    let localized = match locale {
        Locale::En => english(key),
        Locale::Kn => kannada(key),
    };
    localized.or_else(|| english(key)).unwrap_or_else(|| key.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_in_both_locales() {
        assert_eq!(translate(Locale::En, TranslationKey::Home), "Home");
        assert_eq!(translate(Locale::Kn, TranslationKey::Home), "ಮುಖಪುಟ");
    }

    #[test]
    fn missing_kannada_entry_falls_back_to_english() {
        assert_eq!(
            translate(Locale::Kn, TranslationKey::LanguageUpdated),
            "Language updated"
        );
    }
}
