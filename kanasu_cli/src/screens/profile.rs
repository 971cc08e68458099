/// Profile screen - edit name, age, location and language; log out
use crossterm::event::KeyCode;
use kanasu_core::i18n::TranslationKey;
use kanasu_core::types::{GeoLocation, User, UserPatch};
use kanasu_core::Locale;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{button_line, edit_text, field_line, ViewContext};
use crate::components::{dim, titled_block};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFocus {
    Name,
    Age,
    Location,
    Language,
    Save,
    Logout,
}

const FOCUS_ORDER: &[ProfileFocus] = &[
    ProfileFocus::Name,
    ProfileFocus::Age,
    ProfileFocus::Location,
    ProfileFocus::Language,
    ProfileFocus::Save,
    ProfileFocus::Logout,
];

#[derive(Debug, Clone)]
pub struct ProfileState {
    pub email: String,
    pub name: String,
    pub age: String,
    pub city: String,
    pub language: Locale,
    pub focus: ProfileFocus,
    pub editing: bool,
    location: Option<GeoLocation>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            email: String::new(),
            name: String::new(),
            age: String::new(),
            city: String::new(),
            language: Locale::default(),
            focus: ProfileFocus::Name,
            editing: false,
            location: None,
        }
    }
}

impl ProfileState {
    pub fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            age: user.age.to_string(),
            city: user.location.city.clone(),
            language: user.locale(),
            location: Some(user.location.clone()),
            ..Self::default()
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self.focus,
            ProfileFocus::Name | ProfileFocus::Age | ProfileFocus::Location
        )
    }

    pub fn focus_next(&mut self) {
        let i = FOCUS_ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = FOCUS_ORDER[(i + 1) % FOCUS_ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let i = FOCUS_ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = FOCUS_ORDER[(i + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len()];
    }

    pub fn edit(&mut self, code: KeyCode) {
        let buffer = match self.focus {
            ProfileFocus::Name => &mut self.name,
            ProfileFocus::Age => &mut self.age,
            ProfileFocus::Location => &mut self.city,
            _ => return,
        };
        edit_text(buffer, code);
    }

    /// Patch for the current user. Stored coordinates survive while the
    /// city is unchanged; a new city gets the default coordinates.
    pub fn to_patch(&self) -> UserPatch {
        let city = self.city.trim();
        let location = match &self.location {
            Some(loc) if loc.city == city => loc.clone(),
            _ => GeoLocation::city_only(city),
        };

        UserPatch {
            name: Some(self.name.trim().to_string()),
            age: self.age.trim().parse().ok(),
            location: Some(location),
            preferred_language: Some(self.language.code().to_string()),
        }
    }
}

pub struct ProfileScreen<'a> {
    state: &'a ProfileState,
    ctx: ViewContext,
}

impl<'a> ProfileScreen<'a> {
    pub fn new(state: &'a ProfileState, ctx: ViewContext) -> Self {
        Self { state, ctx }
    }
}

impl<'a> Widget for ProfileScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let s = self.state;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(15),
                Constraint::Percentage(70),
                Constraint::Percentage(15),
            ])
            .split(area);

        let block = titled_block(ctx.t(TranslationKey::Profile), ctx.high_contrast);
        let inner = block.inner(columns[1]);
        block.render(columns[1], buf);

        let focused = |f: ProfileFocus| s.focus == f;
        let editing = |f: ProfileFocus| s.focus == f && s.editing;

        let lines = vec![
            Line::from(Span::styled(
                format!("{}: {}", ctx.t(TranslationKey::Email), s.email),
                dim(),
            )),
            Line::from(""),
            field_line(&ctx, ctx.t(TranslationKey::Name), &s.name, focused(ProfileFocus::Name), editing(ProfileFocus::Name)),
            field_line(&ctx, ctx.t(TranslationKey::Age), &s.age, focused(ProfileFocus::Age), editing(ProfileFocus::Age)),
            field_line(&ctx, ctx.t(TranslationKey::Location), &s.city, focused(ProfileFocus::Location), editing(ProfileFocus::Location)),
            field_line(
                &ctx,
                ctx.t(TranslationKey::PreferredLanguage),
                s.language.native_name(),
                focused(ProfileFocus::Language),
                false,
            ),
            Line::from(""),
            button_line(&ctx, ctx.t(TranslationKey::Save), focused(ProfileFocus::Save)),
            button_line(&ctx, ctx.t(TranslationKey::Logout), focused(ProfileFocus::Logout)),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}
