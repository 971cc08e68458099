/// Smoke tests for the TUI: key flows through App and ratatui buffer renders

use crossterm::event::{KeyCode, KeyModifiers};
use kanasu_cli::screens::{
    ScholarshipsScreen, ScholarshipsState, SettingsScreen, SettingsState, ViewContext,
};
use kanasu_cli::ui::{App, AppOptions};
use kanasu_core::i18n::{translate, TranslationKey};
use kanasu_core::provider::Providers;
use kanasu_core::session::LanguageSession;
use kanasu_core::store::KeyValueStore;
use kanasu_core::types::ChatRole;
use kanasu_core::voice::Route;
use kanasu_core::Locale;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(code, KeyModifiers::NONE);
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn buffer_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect::<String>()
}

fn draw(app: &App) -> Buffer {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    terminal.backend().buffer().clone()
}

/// Fills the login form and submits it.
fn login(app: &mut App) {
    press(app, KeyCode::Enter);
    type_text(app, "asha@example.com");
    press(app, KeyCode::Enter);
    press(app, KeyCode::Tab);
    press(app, KeyCode::Enter);
    type_text(app, "secret");
    press(app, KeyCode::Enter);
    press(app, KeyCode::Tab);
    press(app, KeyCode::Enter);
}

fn voice(app: &mut App, transcript: &str) {
    press(app, KeyCode::Char('v'));
    type_text(app, transcript);
    press(app, KeyCode::Enter);
}

#[test]
fn test_starts_on_login_when_signed_out() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let app = App::new(&store, &providers, AppOptions::default()).unwrap();

    assert_eq!(app.route(), Route::Login);
    let text = buffer_text(&draw(&app));
    assert!(text.contains("Login"));
    assert!(text.contains("Tap to speak"));
}

#[test]
fn test_login_opens_home() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();

    login(&mut app);

    assert_eq!(app.route(), Route::Home);
    let user = app.current_user().unwrap();
    assert_eq!(user.email, "asha@example.com");
    assert_eq!(user.name, "Demo User");
    assert!(buffer_text(&draw(&app)).contains("Demo User"));
}

#[test]
fn test_shortcuts_redirect_to_login_when_signed_out() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();

    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.route(), Route::Login);

    voice(&mut app, "scholarship");
    assert_eq!(app.route(), Route::Login);
}

#[test]
fn test_voice_roadmap_without_career_goes_to_recommender() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();
    login(&mut app);

    voice(&mut app, "Career Roadmap");

    assert_eq!(app.route(), Route::Recommender);
    assert!(app.last_notification().unwrap().is_error());
    assert!(app.utterance().is_some());
    assert!(!app.is_listening());
}

#[test]
fn test_unrecognized_voice_command_stays_put() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();
    login(&mut app);

    voice(&mut app, "xyz");

    assert_eq!(app.route(), Route::Home);
    assert!(app.last_notification().unwrap().is_error());
}

#[test]
fn test_empty_voice_prompt_reports_error() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();
    login(&mut app);

    voice(&mut app, "");

    let notice = app.last_notification().unwrap();
    assert!(notice.is_error());
    assert_eq!(notice.description, "No speech was detected");
}

#[test]
fn test_voice_unsupported_hides_mic() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let options = AppOptions {
        voice_input: false,
        ..AppOptions::default()
    };
    let mut app = App::new(&store, &providers, options).unwrap();

    let text = buffer_text(&draw(&app));
    assert!(!text.contains("[v]"));
    assert!(text.contains("[?] help"));

    press(&mut app, KeyCode::Char('v'));
    let notice = app.last_notification().unwrap();
    assert_eq!(
        notice.title,
        translate(Locale::En, TranslationKey::VoiceNotSupported)
    );
    assert_eq!(app.route(), Route::Login);

    // no hint anywhere once signed in either, help overlay included
    login(&mut app);
    assert_eq!(app.route(), Route::Home);
    press(&mut app, KeyCode::Char('x'));
    assert!(!buffer_text(&draw(&app)).contains("[v]"));
    press(&mut app, KeyCode::Char('?'));
    assert!(!buffer_text(&draw(&app)).contains("Voice command"));
}

#[test]
fn test_notification_history_drops_oldest() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let options = AppOptions {
        voice_input: false,
        ..AppOptions::default()
    };
    let mut app = App::new(&store, &providers, options).unwrap();

    for _ in 0..60 {
        press(&mut app, KeyCode::Char('v'));
    }

    let history = app.notifications();
    assert_eq!(history.len(), 50);
    assert!(history.iter().all(|n| n.title
        == translate(Locale::En, TranslationKey::VoiceNotSupported)));
}

#[test]
fn test_status_line_offers_voice_when_supported() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let app = App::new(&store, &providers, AppOptions::default()).unwrap();

    assert!(buffer_text(&draw(&app)).contains("[v] voice"));
}

#[test]
fn test_recommend_then_roadmap() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();
    login(&mut app);

    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.route(), Route::Recommender);

    // Age -> ... -> Interests, pick the first tag, then Skills -> Submit
    for _ in 0..4 {
        press(&mut app, KeyCode::Tab);
    }
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    assert!(app.pending().is_some());
    app.run_pending();

    assert_eq!(app.recommendations().len(), 3);
    assert_eq!(
        app.last_notification().unwrap().description,
        "Found 3 career matches!"
    );
    assert!(app.utterance().unwrap().text.contains("Software Engineer"));

    // results hold focus; Enter opens the roadmap for the top match
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.route(), Route::Roadmap);
    app.run_pending();

    let roadmap = app.roadmap().unwrap();
    assert_eq!(roadmap.steps.len(), 3);
    assert_eq!(roadmap.locale, Locale::En);
    assert!(buffer_text(&draw(&app)).contains("ABC Institute"));

    // revisiting reuses the plan
    press(&mut app, KeyCode::Char('1'));
    press(&mut app, KeyCode::Char('3'));
    assert!(app.pending().is_none());
}

#[test]
fn test_empty_form_is_rejected() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();
    login(&mut app);

    press(&mut app, KeyCode::Char('2'));
    for _ in 0..6 {
        press(&mut app, KeyCode::Tab);
    }
    press(&mut app, KeyCode::Enter);
    app.run_pending();

    assert!(app.recommendations().is_empty());
    assert!(app.last_notification().unwrap().is_error());
}

#[test]
fn test_language_toggle_persists() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();
    login(&mut app);

    press(&mut app, KeyCode::Char('L'));

    assert_eq!(app.locale(), Locale::Kn);
    assert_eq!(app.current_user().unwrap().preferred_language, "kn");
    assert_eq!(LanguageSession::restore(&store).unwrap().locale(), Locale::Kn);
}

#[test]
fn test_chat_send_and_clear() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();
    login(&mut app);

    press(&mut app, KeyCode::Char('7'));
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "hello");
    press(&mut app, KeyCode::Enter);
    app.run_pending();

    let messages = app.chat_messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);
    assert!(messages[1].content.contains("You said: \"hello\""));

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('x'));
    assert!(app.chat_messages().is_empty());
}

#[test]
fn test_voice_logout_returns_to_login() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();
    login(&mut app);

    voice(&mut app, "please log out");

    assert_eq!(app.route(), Route::Login);
    assert!(app.current_user().is_none());
}

#[test]
fn test_quit_from_home() {
    let store = KeyValueStore::in_memory().unwrap();
    let providers = Providers::instant();
    let mut app = App::new(&store, &providers, AppOptions::default()).unwrap();
    login(&mut app);

    press(&mut app, KeyCode::Char('4'));
    press(&mut app, KeyCode::Char('q'));
    assert_eq!(app.route(), Route::Home);
    assert!(!app.should_quit());
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[test]
fn test_scholarships_render() {
    let state = ScholarshipsState::default();
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|f| {
            let screen = ScholarshipsScreen::new(&state, ViewContext::default());
            f.render_widget(screen, f.area());
        })
        .unwrap();

    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("Karnataka State Scholarship"));
    assert!(text.contains("Eligibility"));
}

#[test]
fn test_settings_render_shows_version() {
    let state = SettingsState::default();
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|f| {
            let screen = SettingsScreen::new(&state, true, ViewContext::default());
            f.render_widget(screen, f.area());
        })
        .unwrap();

    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("English"));
    assert!(text.contains(env!("CARGO_PKG_VERSION")));
}
