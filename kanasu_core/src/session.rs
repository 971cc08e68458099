//! Store-backed client sessions: auth, language, and the selected-career
//! handoff between the recommender and roadmap screens.
//!
//! Each session borrows the [`KeyValueStore`] for its lifetime; nothing here
//! is global.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{KanasuError, Result};
use crate::i18n::{translate, TranslationKey};
use crate::locale::Locale;
use crate::store::{KeyValueStore, LANGUAGE_KEY, SELECTED_CAREER_KEY, USER_KEY};
use crate::types::{CareerRecommendation, GeoLocation, User, UserPatch};

const UID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const UID_LEN: usize = 9;

/// Nine random base-36 characters.
pub fn mock_uid() -> String {
    let mut rng = rand::thread_rng();
    (0..UID_LEN)
        .map(|_| UID_ALPHABET[rng.gen_range(0..UID_ALPHABET.len())] as char)
        .collect()
}

// ============================================================
// AUTH SESSION
// ============================================================

/// Profile fields supplied at sign-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignUpProfile {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub location: Option<GeoLocation>,
    pub preferred_language: Option<Locale>,
}

pub struct AuthSession<'a> {
    store: &'a KeyValueStore,
    user: Option<User>,
}

impl<'a> AuthSession<'a> {
    pub fn new(store: &'a KeyValueStore) -> Self {
        Self { store, user: None }
    }

    /// Opens a session and restores the persisted user, if any.
    pub fn restore(store: &'a KeyValueStore) -> Result<Self> {
        let user = store.get_json::<User>(USER_KEY)?;
        if let Some(u) = &user {
            log::info!("[AUTH] Restored session for {}", u.email);
        }
        Ok(Self { store, user })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    fn persist(&mut self, user: User) -> Result<&User> {
        self.store.set_json(USER_KEY, &user)?;
        let stored: &User = self.user.insert(user);
        Ok(stored)
    }

    pub fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
        profile: SignUpProfile,
    ) -> Result<&User> {
        if email.trim().is_empty() {
            return Err(KanasuError::InvalidInput("Email is required".to_string()));
        }
        if password != confirm_password {
            return Err(KanasuError::PasswordMismatch);
        }

        let language = profile.preferred_language.unwrap_or_default();
        let user = User {
            uid: mock_uid(),
            email: email.trim().to_string(),
            name: profile.name.unwrap_or_default(),
            age: profile.age.unwrap_or(18),
            location: profile.location.unwrap_or_default(),
            preferred_language: language.code().to_string(),
        };

        self.store.set_raw(LANGUAGE_KEY, language.code())?;
        log::info!("[AUTH] Signed up {} ({})", user.email, user.uid);
        self.persist(user)
    }

    /// Accepts any credentials and signs in a demo user.
    pub fn login(&mut self, email: &str, _password: &str) -> Result<&User> {
        if email.trim().is_empty() {
            return Err(KanasuError::InvalidInput("Email is required".to_string()));
        }

        let language = self
            .store
            .get_raw(LANGUAGE_KEY)?
            .unwrap_or_else(|| Locale::En.code().to_string());

        let user = User {
            uid: mock_uid(),
            email: email.trim().to_string(),
            name: "Demo User".to_string(),
            age: 20,
            location: GeoLocation::city_only("Bengaluru"),
            preferred_language: language,
        };

        log::info!("[AUTH] Logged in {}", user.email);
        self.persist(user)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(USER_KEY)?;
        if let Some(user) = self.user.take() {
            log::info!("[AUTH] Logged out {}", user.email);
        }
        Ok(())
    }

    /// Merges `patch` into the current user. Does nothing when signed out.
    pub fn update_user(&mut self, patch: UserPatch) -> Result<Option<&User>> {
        let Some(mut user) = self.user.clone() else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(age) = patch.age {
            user.age = age;
        }
        if let Some(location) = patch.location {
            user.location = location;
        }
        if let Some(language) = patch.preferred_language {
            self.store.set_raw(LANGUAGE_KEY, &language)?;
            user.preferred_language = language;
        }

        self.persist(user).map(Some)
    }

    /// Route guard: the user, or `NotAuthenticated`.
    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(KanasuError::NotAuthenticated)
    }
}

// ============================================================
// LANGUAGE SESSION
// ============================================================

pub struct LanguageSession<'a> {
    store: &'a KeyValueStore,
    locale: Locale,
}

impl<'a> LanguageSession<'a> {
    pub fn new(store: &'a KeyValueStore) -> Self {
        Self {
            store,
            locale: Locale::default(),
        }
    }

    /// Loads the saved locale. Anything other than `en`/`kn` is ignored.
    pub fn restore(store: &'a KeyValueStore) -> Result<Self> {
        let locale = store
            .get_raw(LANGUAGE_KEY)?
            .and_then(|code| Locale::from_code(&code))
            .unwrap_or_default();
        Ok(Self { store, locale })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) -> Result<()> {
        self.store.set_raw(LANGUAGE_KEY, locale.code())?;
        self.locale = locale;
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<Locale> {
        let next = self.locale.toggled();
        self.set_locale(next)?;
        Ok(next)
    }

    pub fn t(&self, key: TranslationKey) -> &'static str {
        translate(self.locale, key)
    }
}

// ============================================================
// SELECTED CAREER HANDOFF
// ============================================================

pub fn select_career(store: &KeyValueStore, career: &CareerRecommendation) -> Result<()> {
    log::info!("[ROADMAP] Selected {}", career.title_code);
    store.set_json(SELECTED_CAREER_KEY, career)
}

pub fn selected_career(store: &KeyValueStore) -> Result<Option<CareerRecommendation>> {
    store.get_json(SELECTED_CAREER_KEY)
}
