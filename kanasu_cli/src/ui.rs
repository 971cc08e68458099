/// Top-level TUI state, event loop and input handler
use crate::components::{accent, border_style, dim};
use crate::export::export_recommendations;
use crate::keymap::KeyMap;
use crate::screens::{
    edit_text, AuthForm, AuthMode, AuthScreen, ChatScreen, ChatView, HomeScreen, HomeState,
    ProfileFocus, ProfileScreen, ProfileState, RecommenderFocus, RecommenderScreen,
    RecommenderState, RoadmapScreen, RoadmapState, ScholarshipsScreen, ScholarshipsState,
    SettingsItem, SettingsScreen, SettingsState, ViewContext,
};
use crate::speech::{StatusLineSynthesizer, TypedRecognizer, Utterance};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kanasu_core::chat::ChatSession;
use kanasu_core::i18n::{translate, TranslationKey};
use kanasu_core::notification::Notification;
use kanasu_core::provider::Providers;
use kanasu_core::roadmap::{Roadmap, RoadmapRequest};
use kanasu_core::session::{select_career, selected_career, AuthSession, LanguageSession};
use kanasu_core::store::KeyValueStore;
use kanasu_core::types::{CareerRecommendation, ChatMessage, User, UserPatch};
use kanasu_core::voice::{
    apply, Route, SpeechSynthesizer, UnsupportedSpeech, VoiceCommandInterpreter,
    VoiceController, VoiceSink,
};
use kanasu_core::{KanasuError, Locale};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Notifications kept for the session.
const NOTIFICATION_HISTORY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Overlay {
    None,
    Help,
    VoicePrompt { input: String },
}

#[derive(Debug, Clone)]
struct Modal {
    title: String,
    message: String,
}

impl Modal {
    fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// A blocking provider call waiting to run behind the loading modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Predict,
    Roadmap,
    ChatSend,
}

impl Pending {
    fn message(&self) -> &'static str {
        match self {
            Pending::Predict => "Finding your career matches...",
            Pending::Roadmap => "Building your roadmap...",
            Pending::ChatSend => "Waiting for the assistant...",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Offer the typed voice prompt. When off, voice input is unsupported.
    pub voice_input: bool,
    /// Where CSV exports are written.
    pub export_dir: PathBuf,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            voice_input: true,
            export_dir: PathBuf::from("."),
        }
    }
}

pub struct App<'a> {
    store: &'a KeyValueStore,
    providers: &'a Providers,
    auth: AuthSession<'a>,
    language: LanguageSession<'a>,
    chat: ChatSession<'a>,
    interpreter: VoiceCommandInterpreter,
    voice: VoiceController,
    recognizer: Option<TypedRecognizer>,
    synthesizer: StatusLineSynthesizer,
    route: Route,
    overlay: Overlay,
    auth_form: AuthForm,
    home: HomeState,
    recommender: RecommenderState,
    roadmap: RoadmapState,
    scholarships: ScholarshipsState,
    profile: ProfileState,
    settings: SettingsState,
    chat_view: ChatView,
    notifications: VecDeque<Notification>,
    toast: Option<Notification>,
    modal_stack: Vec<Modal>,
    pending: Option<Pending>,
    high_contrast: bool,
    voice_guidance: bool,
    export_dir: PathBuf,
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(
        store: &'a KeyValueStore,
        providers: &'a Providers,
        options: AppOptions,
    ) -> Result<Self> {
        let auth = AuthSession::restore(store)?;
        let language = LanguageSession::restore(store)?;
        let chat = ChatSession::open(store, providers.chat.as_ref())?;

        let route = if auth.is_signed_in() {
            Route::Home
        } else {
            Route::Login
        };
        let profile = auth
            .current_user()
            .map(ProfileState::from_user)
            .unwrap_or_default();

        log::info!(
            "[TUI] Starting on {} ({}, voice input {})",
            route.path(),
            language.locale(),
            if options.voice_input { "on" } else { "off" }
        );

        Ok(Self {
            store,
            providers,
            auth,
            language,
            chat,
            interpreter: VoiceCommandInterpreter::default(),
            voice: VoiceController::new(),
            recognizer: options.voice_input.then(TypedRecognizer::new),
            synthesizer: StatusLineSynthesizer::new(),
            route,
            overlay: Overlay::None,
            auth_form: AuthForm::new(AuthMode::Login),
            home: HomeState::default(),
            recommender: RecommenderState::new(),
            roadmap: RoadmapState::default(),
            scholarships: ScholarshipsState::default(),
            profile,
            settings: SettingsState::default(),
            chat_view: ChatView::default(),
            notifications: VecDeque::new(),
            toast: None,
            modal_stack: Vec::new(),
            pending: None,
            high_contrast: false,
            voice_guidance: true,
            export_dir: options.export_dir,
            should_quit: false,
        })
    }

    // ============================================================
    // ACCESSORS
    // ============================================================

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn locale(&self) -> Locale {
        self.language.locale()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    /// Oldest first.
    pub fn notifications(&self) -> &VecDeque<Notification> {
        &self.notifications
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    pub fn utterance(&self) -> Option<&Utterance> {
        self.synthesizer.current()
    }

    pub fn recommendations(&self) -> &[CareerRecommendation] {
        &self.recommender.results
    }

    pub fn roadmap(&self) -> Option<&Roadmap> {
        self.roadmap.roadmap.as_ref()
    }

    pub fn chat_messages(&self) -> &[ChatMessage] {
        self.chat.messages()
    }

    pub fn is_listening(&self) -> bool {
        self.voice.is_listening()
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    fn ctx(&self) -> ViewContext {
        ViewContext {
            locale: self.language.locale(),
            high_contrast: self.high_contrast,
        }
    }

    fn t(&self, key: TranslationKey) -> &'static str {
        self.language.t(key)
    }

    fn push_notification(&mut self, notification: Notification) {
        if notification.is_error() {
            log::warn!("[TUI] {}: {}", notification.title, notification.description);
        }
        self.toast = Some(notification.clone());
        self.notifications.push_back(notification);
        if self.notifications.len() > NOTIFICATION_HISTORY {
            self.notifications.pop_front();
        }
    }

    fn success(&mut self, description: impl Into<String>) {
        let title = self.t(TranslationKey::Success);
        self.push_notification(Notification::info(title, description));
    }

    fn failure(&mut self, description: impl Into<String>) {
        let title = self.t(TranslationKey::Error);
        self.push_notification(Notification::destructive(title, description));
    }

    fn say(&mut self, text: &str, locale: Locale) {
        if self.voice_guidance {
            self.synthesizer.speak(text, locale);
        }
    }

    // ============================================================
    // NAVIGATION
    // ============================================================

    /// Moves to `route`. Protected screens redirect to login when signed
    /// out; navigating to login while signed in logs out.
    pub fn go_to(&mut self, route: Route) {
        if route == Route::Login && self.auth.is_signed_in() {
            self.logout();
        }

        let route = match (route.requires_auth(), self.auth.require_user()) {
            (true, Err(_)) => Route::Login,
            (false, Ok(_)) => Route::Home,
            _ => route,
        };

        match route {
            Route::Login | Route::SignUp | Route::ForgotPassword => {
                if let Some(mode) = AuthMode::from_route(route) {
                    self.auth_form = AuthForm::new(mode);
                }
            }
            Route::Profile => {
                self.profile = self
                    .auth
                    .current_user()
                    .map(ProfileState::from_user)
                    .unwrap_or_default();
            }
            Route::Roadmap => {
                if !self.prepare_roadmap() {
                    return;
                }
            }
            Route::Scholarships => self.scholarships.searching = false,
            _ => {}
        }

        log::info!("[TUI] {} -> {}", self.route.path(), route.path());
        self.route = route;
    }

    /// Loads the selected career for the roadmap screen, queueing a
    /// generation when the cached plan is for another career or language.
    fn prepare_roadmap(&mut self) -> bool {
        match selected_career(self.store) {
            Ok(Some(career)) => {
                if !self.roadmap.is_for(&career, self.language.locale()) {
                    self.roadmap = RoadmapState {
                        career: Some(career),
                        roadmap: None,
                        scroll: 0,
                    };
                    self.pending = Some(Pending::Roadmap);
                }
                true
            }
            Ok(None) => {
                self.failure("Please choose a career first");
                self.go_to(Route::Recommender);
                false
            }
            Err(e) => {
                self.failure(e.to_string());
                false
            }
        }
    }

    fn logout(&mut self) {
        if let Err(e) = self.auth.logout() {
            self.failure(e.to_string());
            return;
        }
        self.recommender = RecommenderState::new();
        self.roadmap = RoadmapState::default();
        self.chat_view = ChatView::default();
        let title = self.t(TranslationKey::Logout);
        self.push_notification(Notification::info(title, ""));
    }

    fn go_back(&mut self) {
        match self.route {
            Route::Home | Route::Login | Route::SignUp | Route::ForgotPassword => {
                self.should_quit = true;
            }
            _ => self.go_to(Route::Home),
        }
    }

    fn set_language(&mut self, locale: Locale) {
        if let Err(e) = self.language.set_locale(locale) {
            self.failure(e.to_string());
            return;
        }
        if self.auth.is_signed_in() {
            let patch = UserPatch {
                preferred_language: Some(locale.code().to_string()),
                ..Default::default()
            };
            if let Err(e) = self.auth.update_user(patch) {
                log::warn!("[TUI] Failed to store language on profile: {}", e);
            }
        }
        self.profile.language = locale;
        self.push_notification(Notification::info(
            translate(locale, TranslationKey::LanguageUpdated),
            locale.native_name(),
        ));

        // plans are generated per language
        if self.route == Route::Roadmap {
            self.go_to(Route::Roadmap);
        }
    }

    // ============================================================
    // INPUT
    // ============================================================

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if KeyMap::is_force_quit(code, modifiers) {
            self.should_quit = true;
            return;
        }
        // one request in flight at a time
        if self.pending.is_some() {
            return;
        }
        self.toast = None;

        match self.overlay {
            Overlay::Help => {
                self.overlay = Overlay::None;
                return;
            }
            Overlay::VoicePrompt { .. } => {
                self.handle_voice_prompt_key(code);
                return;
            }
            Overlay::None => {}
        }

        if self.is_editing() {
            self.handle_screen_key(code);
            return;
        }

        if KeyMap::is_quit(code, modifiers) {
            self.go_back();
            return;
        }
        if KeyMap::is_help(code) {
            self.overlay = Overlay::Help;
            return;
        }
        if KeyMap::is_voice(code) {
            self.start_voice();
            return;
        }
        if KeyMap::is_toggle_language(code) {
            let next = self.language.locale().toggled();
            self.set_language(next);
            return;
        }
        if KeyMap::is_toggle_theme(code) {
            self.high_contrast = !self.high_contrast;
            return;
        }
        if self.auth.is_signed_in() {
            if let Some(route) = KeyMap::route_shortcut(code) {
                self.go_to(route);
                return;
            }
        }

        self.handle_screen_key(code);
    }

    /// Whether keystrokes currently go into a text field.
    fn is_editing(&self) -> bool {
        match self.route {
            Route::Login | Route::SignUp | Route::ForgotPassword => self.auth_form.editing,
            Route::Recommender => self.recommender.editing,
            Route::Scholarships => self.scholarships.searching,
            Route::Profile => self.profile.editing,
            Route::Chat => self.chat_view.editing,
            _ => false,
        }
    }

    fn handle_screen_key(&mut self, code: KeyCode) {
        match self.route {
            Route::Login | Route::SignUp | Route::ForgotPassword => self.handle_auth_key(code),
            Route::Home => self.handle_home_key(code),
            Route::Recommender => self.handle_recommender_key(code),
            Route::Roadmap => self.handle_roadmap_key(code),
            Route::Scholarships => self.handle_scholarships_key(code),
            Route::Profile => self.handle_profile_key(code),
            Route::Settings => self.handle_settings_key(code),
            Route::Chat => self.handle_chat_key(code),
        }
    }

    fn handle_auth_key(&mut self, code: KeyCode) {
        let form = &mut self.auth_form;
        if form.editing {
            match code {
                KeyCode::Enter | KeyCode::Esc => form.editing = false,
                KeyCode::Tab => {
                    form.editing = false;
                    form.focus_next();
                }
                _ => {
                    if let Some(field) = form.focused_field_mut() {
                        edit_text(&mut field.value, code);
                    }
                }
            }
            return;
        }

        match code {
            KeyCode::Char('l') => self.go_to(Route::Login),
            KeyCode::Char('s') => self.go_to(Route::SignUp),
            KeyCode::Char('f') => self.go_to(Route::ForgotPassword),
            c if KeyMap::is_next_field(c) || KeyMap::is_down(c) => self.auth_form.focus_next(),
            c if KeyMap::is_prev_field(c) || KeyMap::is_up(c) => self.auth_form.focus_prev(),
            c if KeyMap::is_confirm(c) => {
                if self.auth_form.on_submit() {
                    self.submit_auth();
                } else {
                    self.auth_form.editing = true;
                }
            }
            _ => {}
        }
    }

    fn submit_auth(&mut self) {
        let form = self.auth_form.clone();
        self.auth_form.error = None;
        self.auth_form.notice = None;

        let email = form.value(TranslationKey::Email);
        let password = form.value(TranslationKey::Password);
        let result = match form.mode {
            AuthMode::Login => self
                .auth
                .login(email, password)
                .map(|u| (u.locale(), u.name.clone())),
            AuthMode::SignUp => {
                let profile = form.sign_up_profile(self.language.locale());
                self.auth
                    .sign_up(
                        email,
                        password,
                        form.value(TranslationKey::ConfirmPassword),
                        profile,
                    )
                    .map(|u| (u.locale(), u.name.clone()))
            }
            AuthMode::ForgotPassword => {
                if email.trim().is_empty() {
                    self.auth_form.error = Some("Email is required".to_string());
                } else {
                    log::info!("[AUTH] Password reset requested for {}", email.trim());
                    self.auth_form.notice = Some(self.t(TranslationKey::ResetLinkSent).to_string());
                }
                return;
            }
        };

        match result {
            Ok((locale, name)) => {
                if let Err(e) = self.language.set_locale(locale) {
                    log::warn!("[TUI] Failed to apply profile language: {}", e);
                }
                self.go_to(Route::Home);
                self.success(format!("ನಮಸ್ಕಾರ, {}!", name));
            }
            Err(e) => self.auth_form.error = Some(e.to_string()),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        if KeyMap::is_down(code) {
            self.home.move_down();
        } else if KeyMap::is_up(code) {
            self.home.move_up();
        } else if KeyMap::is_confirm(code) {
            let route = self.home.selected_route();
            self.go_to(route);
        }
    }

    fn handle_recommender_key(&mut self, code: KeyCode) {
        if self.recommender.editing {
            match code {
                KeyCode::Enter | KeyCode::Esc => self.recommender.editing = false,
                KeyCode::Tab => {
                    self.recommender.editing = false;
                    self.recommender.focus_next();
                }
                _ => self.recommender.edit(code),
            }
            return;
        }

        let focus = self.recommender.focus;
        match code {
            c if KeyMap::is_next_field(c) => self.recommender.focus_next(),
            c if KeyMap::is_prev_field(c) => self.recommender.focus_prev(),
            c if KeyMap::is_down(c) => self.recommender.move_down(),
            c if KeyMap::is_up(c) => self.recommender.move_up(),
            c if KeyMap::is_export(c) => self.export_results(),
            c if KeyMap::is_space(c) && focus == RecommenderFocus::Interests => {
                self.toggle_interest()
            }
            c if KeyMap::is_confirm(c) => match focus {
                RecommenderFocus::Age | RecommenderFocus::Skills => {
                    self.recommender.editing = true
                }
                RecommenderFocus::Gender
                | RecommenderFocus::Education
                | RecommenderFocus::Stream => self.recommender.cycle_option(),
                RecommenderFocus::Interests => self.toggle_interest(),
                RecommenderFocus::Submit => self.pending = Some(Pending::Predict),
                RecommenderFocus::Results => self.open_selected_roadmap(),
            },
            _ => {}
        }
    }

    fn toggle_interest(&mut self) {
        let RecommenderState { picker, form, .. } = &mut self.recommender;
        match picker.toggle(form) {
            Ok(_) => {}
            Err(KanasuError::InterestLimit { max }) => {
                self.failure(format!("You can select up to {} interests", max))
            }
            Err(e) => self.failure(e.to_string()),
        }
    }

    fn open_selected_roadmap(&mut self) {
        let Some(career) = self.recommender.selected_result().cloned() else {
            return;
        };
        if let Err(e) = select_career(self.store, &career) {
            self.failure(e.to_string());
            return;
        }
        self.go_to(Route::Roadmap);
    }

    fn export_results(&mut self) {
        if self.recommender.results.is_empty() {
            self.failure("Nothing to export yet");
            return;
        }
        match export_recommendations(&self.export_dir, &self.recommender.results) {
            Ok(path) => self.success(format!("Exported to {}", path.display())),
            Err(e) => self.failure(format!("{:#}", e)),
        }
    }

    fn handle_roadmap_key(&mut self, code: KeyCode) {
        if KeyMap::is_down(code) {
            self.roadmap.scroll_down();
        } else if KeyMap::is_up(code) {
            self.roadmap.scroll_up();
        }
    }

    fn handle_scholarships_key(&mut self, code: KeyCode) {
        if self.scholarships.searching {
            match code {
                KeyCode::Enter | KeyCode::Esc => self.scholarships.searching = false,
                _ => {
                    let mut query = self.scholarships.query.clone();
                    if edit_text(&mut query, code) {
                        self.scholarships.set_query(&query);
                    }
                }
            }
            return;
        }

        match code {
            KeyCode::Char('/') => self.scholarships.searching = true,
            c if KeyMap::is_down(c) => self.scholarships.move_down(),
            c if KeyMap::is_up(c) => self.scholarships.move_up(),
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, code: KeyCode) {
        if self.profile.editing {
            match code {
                KeyCode::Enter | KeyCode::Esc => self.profile.editing = false,
                KeyCode::Tab => {
                    self.profile.editing = false;
                    self.profile.focus_next();
                }
                _ => self.profile.edit(code),
            }
            return;
        }

        match code {
            c if KeyMap::is_next_field(c) || KeyMap::is_down(c) => self.profile.focus_next(),
            c if KeyMap::is_prev_field(c) || KeyMap::is_up(c) => self.profile.focus_prev(),
            c if KeyMap::is_confirm(c) || KeyMap::is_space(c) => match self.profile.focus {
                ProfileFocus::Name | ProfileFocus::Age | ProfileFocus::Location => {
                    self.profile.editing = true
                }
                ProfileFocus::Language => {
                    self.profile.language = self.profile.language.toggled()
                }
                ProfileFocus::Save => self.save_profile(),
                ProfileFocus::Logout => self.go_to(Route::Login),
            },
            _ => {}
        }
    }

    fn save_profile(&mut self) {
        let patch = self.profile.to_patch();
        let language = self.profile.language;
        let saved = self
            .auth
            .update_user(patch)
            .map(|user| user.map(ProfileState::from_user));

        match saved {
            Ok(Some(mut refreshed)) => {
                refreshed.focus = self.profile.focus;
                self.profile = refreshed;
                if let Err(e) = self.language.set_locale(language) {
                    log::warn!("[TUI] Failed to apply profile language: {}", e);
                }
                let updated = self.t(TranslationKey::ProfileUpdated);
                self.success(updated);
            }
            Ok(None) => self.go_to(Route::Login),
            Err(e) => self.failure(e.to_string()),
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        if KeyMap::is_down(code) {
            self.settings.move_down();
        } else if KeyMap::is_up(code) {
            self.settings.move_up();
        } else if KeyMap::is_confirm(code) || KeyMap::is_space(code) {
            match self.settings.current() {
                SettingsItem::Language(locale) => self.set_language(locale),
                SettingsItem::VoiceGuidance => {
                    self.voice_guidance = !self.voice_guidance;
                    if !self.voice_guidance {
                        self.synthesizer.cancel();
                    }
                }
            }
        }
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        if self.chat_view.editing {
            match code {
                KeyCode::Enter => {
                    if self.chat_view.input.trim().is_empty() {
                        self.chat_view.editing = false;
                    } else {
                        self.pending = Some(Pending::ChatSend);
                    }
                }
                KeyCode::Esc => self.chat_view.editing = false,
                _ => self.chat_view.edit(code),
            }
            return;
        }

        match code {
            c if KeyMap::is_confirm(c) => self.chat_view.editing = true,
            KeyCode::Char('x') => {
                if let Err(e) = self.chat.clear() {
                    self.failure(e.to_string());
                }
            }
            c if KeyMap::is_down(c) => self.chat_view.scroll_down(),
            c if KeyMap::is_up(c) => self.chat_view.scroll_up(),
            _ => {}
        }
    }

    // ============================================================
    // VOICE
    // ============================================================

    fn start_voice(&mut self) {
        let locale = self.language.locale();
        let Some(recognizer) = self.recognizer.as_mut() else {
            if let Some(notice) = self.voice.start(&mut UnsupportedSpeech, locale) {
                self.push_notification(notice);
            }
            return;
        };

        if let Some(notice) = self.voice.start(recognizer, locale) {
            self.push_notification(notice);
            return;
        }
        let (_, notices) = self.voice.pump(recognizer, locale);
        for notice in notices {
            self.push_notification(notice);
        }
        self.overlay = Overlay::VoicePrompt {
            input: String::new(),
        };
    }

    fn handle_voice_prompt_key(&mut self, code: KeyCode) {
        let Overlay::VoicePrompt { input } = &mut self.overlay else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.overlay = Overlay::None;
                let locale = self.language.locale();
                if let Some(recognizer) = self.recognizer.as_mut() {
                    self.voice.stop(recognizer);
                    let (_, notices) = self.voice.pump(recognizer, locale);
                    for notice in notices {
                        self.push_notification(notice);
                    }
                }
            }
            KeyCode::Enter => {
                let transcript = std::mem::take(input);
                self.overlay = Overlay::None;
                self.submit_transcript(&transcript);
            }
            _ => {
                edit_text(input, code);
            }
        }
    }

    /// Completes the listening pass with a typed transcript and acts on it.
    pub fn submit_transcript(&mut self, transcript: &str) {
        let locale = self.language.locale();
        let Some(recognizer) = self.recognizer.as_mut() else {
            return;
        };
        recognizer.submit(transcript);
        let (heard, notices) = self.voice.pump(recognizer, locale);
        for notice in notices {
            self.push_notification(notice);
        }

        if let Some(text) = heard {
            log::info!("[VOICE] Heard '{}'", text);
            let outcome = self.interpreter.interpret(&text);
            apply(&outcome, self);
        }
    }

    // ============================================================
    // PROVIDER CALLS
    // ============================================================

    pub fn take_pending(&mut self) -> Option<Pending> {
        self.pending.take()
    }

    /// Runs every queued provider call without the loading modal.
    pub fn run_pending(&mut self) {
        while let Some(pending) = self.take_pending() {
            self.run(pending);
        }
    }

    pub fn run(&mut self, pending: Pending) {
        match pending {
            Pending::Predict => self.run_predict(),
            Pending::Roadmap => self.run_roadmap(),
            Pending::ChatSend => self.run_chat(),
        }
    }

    fn run_predict(&mut self) {
        let origin = self.auth.current_user().map(|u| u.location.clone());
        let request = self.recommender.form.to_predict_request(origin);
        log::info!(
            "[PREDICT] Requesting matches for {} interests, {} skills",
            request.interests.len(),
            request.skills.len()
        );

        match self.providers.recommender.predict(&request) {
            Ok(results) => {
                let count = results.len();
                let top = results.first().map(|r| r.title_label.clone());
                self.recommender.set_results(results);
                if let Some(label) = top {
                    let locale = self.language.locale();
                    let line = format!("{}: {}", self.t(TranslationKey::TopCareerMatches), label);
                    self.say(&line, locale);
                }
                self.success(format!("Found {} career matches!", count));
            }
            Err(e) => self.failure(e.to_string()),
        }
    }

    fn run_roadmap(&mut self) {
        let Some(career) = self.roadmap.career.clone() else {
            return;
        };
        let mut request = RoadmapRequest::for_career(&career.title_code, self.language.locale());
        request.form_data = Some(self.recommender.form.data().clone());
        request.origin = self.auth.current_user().map(|u| u.location.clone());

        match self.providers.roadmap.generate(&request) {
            Ok(roadmap) => {
                self.roadmap.roadmap = Some(roadmap);
                self.roadmap.scroll = 0;
            }
            Err(e) => self.failure(e.to_string()),
        }
    }

    fn run_chat(&mut self) {
        let text = self.chat_view.take_input();
        let locale = self.language.locale();
        if let Err(e) = self.chat.send(&text, locale) {
            // keep the message so it can be sent again
            self.chat_view.input = text;
            self.failure(e.to_string());
        }
    }

    fn push_modal(&mut self, modal: Modal) {
        self.modal_stack.push(modal);
    }

    fn pop_modal(&mut self) {
        self.modal_stack.pop();
    }

    // ============================================================
    // RENDERING
    // ============================================================

    pub fn render(&self, f: &mut Frame) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);
        let body = chunks[1];
        let ctx = self.ctx();

        self.render_header(f, chunks[0]);

        match self.route {
            Route::Login | Route::SignUp | Route::ForgotPassword => {
                f.render_widget(AuthScreen::new(&self.auth_form, ctx), body)
            }
            Route::Home => f.render_widget(
                HomeScreen::new(&self.home, ctx)
                    .user(self.auth.current_user())
                    .last_match(self.recommender.results.first())
                    .voice(self.recognizer.is_some()),
                body,
            ),
            Route::Recommender => f.render_widget(
                RecommenderScreen::new(&self.recommender, ctx)
                    .loading(self.pending == Some(Pending::Predict)),
                body,
            ),
            Route::Roadmap => f.render_widget(RoadmapScreen::new(&self.roadmap, ctx), body),
            Route::Scholarships => {
                f.render_widget(ScholarshipsScreen::new(&self.scholarships, ctx), body)
            }
            Route::Profile => f.render_widget(ProfileScreen::new(&self.profile, ctx), body),
            Route::Settings => f.render_widget(
                SettingsScreen::new(&self.settings, self.voice_guidance, ctx),
                body,
            ),
            Route::Chat => f.render_widget(
                ChatScreen::new(&self.chat_view, self.chat.messages(), ctx)
                    .waiting(self.pending == Some(Pending::ChatSend)),
                body,
            ),
        }

        self.render_status(f, chunks[2]);

        match &self.overlay {
            Overlay::Help => render_help(f, body, self.high_contrast, self.recognizer.is_some()),
            Overlay::VoicePrompt { input } => {
                let message = format!(
                    "{}\n\n> {}█\n\n[Enter] submit  [Esc] cancel",
                    self.t(TranslationKey::Listening),
                    input
                );
                render_modal(
                    f,
                    size,
                    self.t(TranslationKey::VoiceCommand),
                    &message,
                    self.high_contrast,
                );
            }
            Overlay::None => {}
        }

        if let Some(modal) = self.modal_stack.last() {
            render_modal(f, size, &modal.title, &modal.message, self.high_contrast);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let accent = accent(self.high_contrast);
        let mut spans = vec![
            Span::styled(
                " KANASU ಕನಸು ",
                Style::default()
                    .fg(Color::Black)
                    .bg(accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                self.t(self.route.title_key()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", self.language.locale().native_name()), dim()),
        ];

        if let Some(user) = self.auth.current_user() {
            spans.push(Span::styled(format!("  {}", user.email), dim()));
        }

        // no mic control without recognition
        if self.recognizer.is_some() {
            if self.voice.is_listening() {
                spans.push(Span::styled(
                    format!("  ● {}", self.t(TranslationKey::Listening)),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    format!("  [v] {}", self.t(TranslationKey::TapToSpeak)),
                    dim(),
                ));
            }
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let line = if let Some(toast) = &self.toast {
            let color = if toast.is_error() {
                Color::Red
            } else {
                Color::Green
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", toast.title),
                    Style::default()
                        .fg(Color::Black)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {}", toast.description)),
            ])
        } else if let Some(utterance) = self.synthesizer.current() {
            Line::from(Span::styled(
                format!(" ♪ {}", utterance.text),
                Style::default().fg(accent(self.high_contrast)),
            ))
        } else {
            let voice = if self.recognizer.is_some() { "  [v] voice" } else { "" };
            Line::from(Span::styled(
                format!(" [?] help{}  [L] language  [q] back", voice),
                dim(),
            ))
        };

        f.render_widget(Paragraph::new(line), area);
    }
}

impl<'a> VoiceSink for App<'a> {
    fn navigate(&mut self, route: Route) {
        self.go_to(route);
    }

    fn speak(&mut self, text: &str, locale: Locale) {
        self.say(text, locale);
    }

    fn notify(&mut self, notification: Notification) {
        self.push_notification(notification);
    }
}

pub fn run_tui(store: &KeyValueStore, providers: &Providers, options: AppOptions) -> Result<()> {
    let mut app = App::new(store, providers, options)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| app.render(f))?;

        // Handle pending provider calls behind the loading modal
        if let Some(pending) = app.take_pending() {
            let title = app.t(TranslationKey::Loading);
            app.push_modal(Modal::new(title, pending.message()));
            terminal.draw(|f| app.render(f))?;

            app.run(pending);

            app.pop_modal();
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }
    }

    Ok(())
}

fn render_help(f: &mut Frame, area: Rect, high_contrast: bool, voice: bool) {
    let accent = accent(high_contrast);

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(high_contrast))
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "KANASU ಕನಸು - Career Guidance",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (key, desc) in KeyMap::help_text(voice) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:10}", key),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw(desc),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press any key to close", dim())));

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}

fn render_modal(f: &mut Frame, area: Rect, title: &str, message: &str, high_contrast: bool) {
    let accent = accent(high_contrast);

    // Center the modal
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical[1]);

    let modal_area = horizontal[1];
    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let text = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);
    f.render_widget(text, inner);
}
