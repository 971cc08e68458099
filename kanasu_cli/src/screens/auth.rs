/// Login, sign-up and password reset forms
use kanasu_core::i18n::TranslationKey;
use kanasu_core::session::SignUpProfile;
use kanasu_core::types::GeoLocation;
use kanasu_core::voice::Route;
use kanasu_core::Locale;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{button_line, field_line, TextField, ViewContext};
use crate::components::{dim, titled_block};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    SignUp,
    ForgotPassword,
}

impl AuthMode {
    pub fn route(&self) -> Route {
        match self {
            AuthMode::Login => Route::Login,
            AuthMode::SignUp => Route::SignUp,
            AuthMode::ForgotPassword => Route::ForgotPassword,
        }
    }

    pub fn from_route(route: Route) -> Option<Self> {
        match route {
            Route::Login => Some(AuthMode::Login),
            Route::SignUp => Some(AuthMode::SignUp),
            Route::ForgotPassword => Some(AuthMode::ForgotPassword),
            _ => None,
        }
    }

    fn title_key(&self) -> TranslationKey {
        self.route().title_key()
    }

    fn fields(&self) -> Vec<TextField> {
        use TranslationKey::*;
        match self {
            AuthMode::Login => vec![TextField::new(Email), TextField::secret(Password)],
            AuthMode::SignUp => vec![
                TextField::new(Name),
                TextField::new(Email),
                TextField::new(Age),
                TextField::new(Location),
                TextField::secret(Password),
                TextField::secret(ConfirmPassword),
            ],
            AuthMode::ForgotPassword => vec![TextField::new(Email)],
        }
    }
}

/// Field values and focus for the current auth form. Focus index
/// `fields.len()` is the submit button.
#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub fields: Vec<TextField>,
    pub focus: usize,
    pub editing: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            fields: mode.fields(),
            focus: 0,
            editing: false,
            error: None,
            notice: None,
        }
    }

    pub fn value(&self, key: TranslationKey) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn set(&mut self, key: TranslationKey, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            field.value = value.to_string();
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        self.fields.get_mut(self.focus)
    }

    pub fn on_submit(&self) -> bool {
        self.focus == self.fields.len()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % (self.fields.len() + 1);
    }

    pub fn focus_prev(&mut self) {
        self.focus = if self.focus == 0 {
            self.fields.len()
        } else {
            self.focus - 1
        };
    }

    /// Sign-up profile from the form; the age is left unset when not a
    /// number and the city is pinned to default coordinates.
    pub fn sign_up_profile(&self, language: Locale) -> SignUpProfile {
        let name = self.value(TranslationKey::Name).trim();
        let city = self.value(TranslationKey::Location).trim();
        SignUpProfile {
            name: (!name.is_empty()).then(|| name.to_string()),
            age: self.value(TranslationKey::Age).trim().parse().ok(),
            location: (!city.is_empty()).then(|| GeoLocation::city_only(city)),
            preferred_language: Some(language),
        }
    }
}

pub struct AuthScreen<'a> {
    form: &'a AuthForm,
    ctx: ViewContext,
}

impl<'a> AuthScreen<'a> {
    pub fn new(form: &'a AuthForm, ctx: ViewContext) -> Self {
        Self { form, ctx }
    }
}

impl<'a> Widget for AuthScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(area);

        let block = titled_block(ctx.t(self.form.mode.title_key()), ctx.high_contrast);
        let inner = block.inner(columns[1]);
        block.render(columns[1], buf);

        let mut lines = vec![
            Line::from(Span::styled(
                "KANASU · ಕನಸು",
                Style::default().fg(ctx.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, field) in self.form.fields.iter().enumerate() {
            let focused = i == self.form.focus;
            lines.push(field_line(
                &ctx,
                ctx.t(field.key),
                &field.shown(),
                focused,
                focused && self.form.editing,
            ));
        }

        let submit = match self.form.mode {
            AuthMode::ForgotPassword => ctx.t(TranslationKey::ResetPassword),
            mode => ctx.t(mode.title_key()),
        };
        lines.push(Line::from(""));
        lines.push(button_line(&ctx, submit, self.form.on_submit()));
        lines.push(Line::from(""));

        if let Some(error) = &self.form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        if let Some(notice) = &self.form.notice {
            lines.push(Line::from(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Green),
            )));
        }

        lines.push(Line::from(Span::styled(
            format!(
                "[l] {}  [s] {}  [f] {}",
                ctx.t(TranslationKey::Login),
                ctx.t(TranslationKey::SignUp),
                ctx.t(TranslationKey::ForgotPassword)
            ),
            dim(),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_through_submit() {
        let mut form = AuthForm::new(AuthMode::Login);
        assert!(!form.on_submit());
        form.focus_next();
        form.focus_next();
        assert!(form.on_submit());
        form.focus_next();
        assert_eq!(form.focus, 0);
        form.focus_prev();
        assert!(form.on_submit());
    }

    #[test]
    fn sign_up_profile_parses_fields() {
        let mut form = AuthForm::new(AuthMode::SignUp);
        form.set(TranslationKey::Name, "Asha");
        form.set(TranslationKey::Age, "nineteen");
        form.set(TranslationKey::Location, "Mysuru");

        let profile = form.sign_up_profile(Locale::Kn);
        assert_eq!(profile.name.as_deref(), Some("Asha"));
        assert_eq!(profile.age, None);
        assert_eq!(profile.location.unwrap().city, "Mysuru");
        assert_eq!(profile.preferred_language, Some(Locale::Kn));
    }

    #[test]
    fn modes_round_trip_through_routes() {
        for mode in [AuthMode::Login, AuthMode::SignUp, AuthMode::ForgotPassword] {
            assert_eq!(AuthMode::from_route(mode.route()), Some(mode));
        }
        assert_eq!(AuthMode::from_route(Route::Home), None);
    }
}
