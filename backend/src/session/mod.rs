//! Client-side session state.
//!
//! Mirrors what the dashboard keeps between page reloads: the signed-in user,
//! their bearer token and the page they were on. Every change is written
//! through a [`SessionStore`] so the session survives restarts.

pub mod pages;
pub mod store;

use crate::database::models::UserProfile;
use pages::{Page, available_pages};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored session is unreadable: {0}")]
    Format(#[from] serde_json::Error),
    #[error("session store lock poisoned")]
    Poisoned,
    #[error("no user is signed in")]
    NotAuthenticated,
    #[error("page '{0}' is not available to this user")]
    PageNotAvailable(Page),
}

/// Persisted session contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    #[serde(default)]
    pub current_page: Page,
}

pub struct SessionHolder<S: SessionStore> {
    store: S,
    session: Session,
}

impl<S: SessionStore> SessionHolder<S> {
    /// Restores the last saved session.
    ///
    /// An unreadable session is discarded rather than surfaced, and a saved
    /// page the user can no longer reach falls back to home.
    pub fn restore(store: S) -> Self {
        let mut session = match store.load() {
            Ok(Some(session)) => session,
            Ok(None) => Session::default(),
            Err(e) => {
                warn!("Discarding stored session: {}", e);
                Session::default()
            }
        };

        if session.user.is_none() || session.token.is_none() {
            session = Session::default();
        }

        let mut holder = SessionHolder { store, session };
        if !holder.available_pages().contains(&holder.session.current_page) {
            holder.session.current_page = Page::Home;
        }
        holder
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub fn current_page(&self) -> Page {
        self.session.current_page
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.user.is_some() && self.session.token.is_some()
    }

    /// Pages the current user may open; only home when signed out.
    pub fn available_pages(&self) -> Vec<Page> {
        match &self.session.user {
            Some(user) if self.session.token.is_some() => available_pages(user.role()),
            _ => vec![Page::Home],
        }
    }

    /// Navigation entries for the current user, labelled for display.
    pub fn navigation(&self) -> Vec<(Page, &'static str)> {
        self.available_pages()
            .into_iter()
            .map(|page| (page, page.label()))
            .collect()
    }

    /// Records a successful login and lands on the home page.
    pub fn login(&mut self, user: UserProfile, token: String) -> Result<(), SessionError> {
        self.session = Session {
            user: Some(user),
            token: Some(token),
            current_page: Page::Home,
        };
        self.persist()
    }

    /// Replaces the cached user after a profile update.
    pub fn update_user(&mut self, user: UserProfile) -> Result<(), SessionError> {
        if !self.is_authenticated() {
            return Err(SessionError::NotAuthenticated);
        }
        self.session.user = Some(user);
        self.persist()
    }

    /// Switches page if the user's role allows it.
    pub fn navigate(&mut self, page: Page) -> Result<(), SessionError> {
        if !self.available_pages().contains(&page) {
            return Err(SessionError::PageNotAvailable(page));
        }
        self.session.current_page = page;
        self.persist()
    }

    /// Forgets user and token and returns to the home page.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.session = Session::default();
        self.store.clear()
    }

    fn persist(&self) -> Result<(), SessionError> {
        self.store.save(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(role: &str) -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: "u1".into(),
            name: "A".into(),
            email: "a@x.com".into(),
            role: role.into(),
            department: None,
            region: Some("Tamil Nadu".into()),
            district: None,
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_signed_out_only_reaches_home() {
        let mut holder = SessionHolder::restore(MemorySessionStore::new());

        assert!(!holder.is_authenticated());
        assert_eq!(holder.current_page(), Page::Home);
        assert_eq!(holder.available_pages(), vec![Page::Home]);
        assert!(matches!(
            holder.navigate(Page::Weather),
            Err(SessionError::PageNotAvailable(Page::Weather))
        ));
        assert!(matches!(
            holder.update_user(profile("farmer")),
            Err(SessionError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_login_navigate_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut holder = SessionHolder::restore(FileSessionStore::new(&path));
        holder.login(profile("farmer"), "tok".into()).unwrap();
        holder.navigate(Page::Agriculture).unwrap();
        assert!(matches!(
            holder.navigate(Page::Reports),
            Err(SessionError::PageNotAvailable(Page::Reports))
        ));
        assert_eq!(holder.current_page(), Page::Agriculture);

        let restored = SessionHolder::restore(FileSessionStore::new(&path));
        assert!(restored.is_authenticated());
        assert_eq!(restored.token(), Some("tok"));
        assert_eq!(restored.current_page(), Page::Agriculture);
        assert_eq!(restored.user().map(|u| u.role.as_str()), Some("farmer"));
    }

    #[test]
    fn test_logout_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut holder = SessionHolder::restore(FileSessionStore::new(&path));
        holder.login(profile("admin"), "tok".into()).unwrap();
        holder.navigate(Page::Reports).unwrap();
        holder.logout().unwrap();

        assert!(!holder.is_authenticated());
        assert_eq!(holder.user(), None);
        assert_eq!(holder.token(), None);
        assert_eq!(holder.current_page(), Page::Home);
        assert!(!path.exists());

        let restored = SessionHolder::restore(FileSessionStore::new(&path));
        assert!(!restored.is_authenticated());
    }

    #[test]
    fn test_unknown_role_falls_back_to_default_pages() {
        let mut holder = SessionHolder::restore(MemorySessionStore::new());
        holder.login(profile("visitor"), "tok".into()).unwrap();

        assert_eq!(
            holder.available_pages(),
            vec![Page::Home, Page::Weather, Page::SolarMonitoring, Page::Profile]
        );
        assert!(holder.navigate(Page::Profile).is_ok());
        assert!(holder.navigate(Page::Alerts).is_err());
    }

    #[test]
    fn test_navigation_is_labelled() {
        let mut holder = SessionHolder::restore(MemorySessionStore::new());
        assert_eq!(holder.navigation(), vec![(Page::Home, "Home")]);

        holder.login(profile("farmer"), "tok".into()).unwrap();
        let labels: Vec<&str> = holder.navigation().into_iter().map(|(_, l)| l).collect();
        assert_eq!(
            labels,
            vec![
                "Home",
                "Weather Reports",
                "Smart Recommendations",
                "Agriculture",
                "Solar Monitoring",
                "Profile",
            ]
        );
    }

    #[test]
    fn test_restore_resets_unreachable_page() {
        let store = MemorySessionStore::new();
        store
            .save(&Session {
                user: Some(profile("farmer")),
                token: Some("tok".into()),
                current_page: Page::Reports,
            })
            .unwrap();

        let holder = SessionHolder::restore(store);
        assert!(holder.is_authenticated());
        assert_eq!(holder.current_page(), Page::Home);
    }

    #[test]
    fn test_restore_discards_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"garbage").unwrap();

        let holder = SessionHolder::restore(FileSessionStore::new(&path));
        assert!(!holder.is_authenticated());
        assert_eq!(holder.current_page(), Page::Home);
    }
}
