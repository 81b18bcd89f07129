use crate::Credentials;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    /// A login or status request is in flight.
    Pending,
    Authorized,
}

/// Who is logged in, plus whatever the login surface has typed so far.
///
/// `Authorized` always carries an identity. The reverse does not hold while a
/// request is pending.
#[derive(Debug, Default)]
pub struct SessionState {
    state: AuthState,
    identity: Option<String>,
    pending: Option<Credentials>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn is_authorized(&self) -> bool {
        self.state == AuthState::Authorized
    }

    pub fn set_credentials(&mut self, username: &str, password: &str) {
        let credentials = Credentials::new(username, password);
        self.pending = if credentials.is_empty() {
            None
        } else {
            Some(credentials)
        };
    }

    pub fn has_pending_credentials(&self) -> bool {
        self.pending.is_some()
    }

    /// Moves to `Pending` and hands out the staged credentials, leaving none
    /// behind.
    pub fn begin_login(&mut self) -> Credentials {
        self.state = AuthState::Pending;
        self.pending.take().unwrap_or_default()
    }

    pub fn begin_query(&mut self) {
        if self.state != AuthState::Authorized {
            self.state = AuthState::Pending;
        }
    }

    pub fn authorize(&mut self, name: String) {
        self.identity = Some(name);
        self.state = AuthState::Authorized;
    }

    pub fn reject(&mut self) {
        self.identity = None;
        self.state = AuthState::Anonymous;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_takes_staged_credentials() {
        let mut session = SessionState::new();
        session.set_credentials("bob", "pw");
        assert!(session.has_pending_credentials());

        let credentials = session.begin_login();
        assert_eq!(credentials.username, "bob");
        assert_eq!(session.state(), AuthState::Pending);
        assert!(!session.has_pending_credentials());
    }

    #[test]
    fn authorized_implies_identity() {
        let mut session = SessionState::new();
        session.begin_query();
        assert_eq!(session.state(), AuthState::Pending);
        assert_eq!(session.identity(), None);

        session.authorize("bob".to_string());
        assert!(session.is_authorized());
        assert_eq!(session.identity(), Some("bob"));

        session.begin_query();
        assert!(session.is_authorized());
    }

    #[test]
    fn clear_forgets_everything() {
        let mut session = SessionState::new();
        session.set_credentials("bob", "pw");
        session.authorize("bob".to_string());
        session.clear();
        assert_eq!(session.state(), AuthState::Anonymous);
        assert_eq!(session.identity(), None);
        assert!(!session.has_pending_credentials());
    }
}
