// Session-scoped credential store
use crate::domain::credentials::Credentials;
use tokio::sync::watch;

/// Holds the operator's credentials for the lifetime of the process.
///
/// Only operator input writes here; components take snapshots with
/// [`CredentialHolder::current`] and pass them explicitly into each call.
pub struct CredentialHolder {
    tx: watch::Sender<Credentials>,
}

impl CredentialHolder {
    pub fn new(initial: Credentials) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> Credentials {
        self.tx.borrow().clone()
    }

    /// Replace the credentials; subscribers are only woken on an actual change.
    pub fn set(&self, credentials: Credentials) -> bool {
        self.tx.send_if_modified(|held| {
            if *held == credentials {
                return false;
            }
            *held = credentials;
            true
        })
    }

    pub fn set_username(&self, username: impl Into<String>) -> bool {
        let mut next = self.current();
        next.username = username.into();
        self.set(next)
    }

    pub fn set_password(&self, password: impl Into<String>) -> bool {
        let mut next = self.current();
        next.password = password.into();
        self.set(next)
    }

    pub fn clear(&self) -> bool {
        self.set(Credentials::default())
    }

    pub fn subscribe(&self) -> watch::Receiver<Credentials> {
        self.tx.subscribe()
    }
}

impl Default for CredentialHolder {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_only_notifies_on_change() {
        let holder = CredentialHolder::default();
        let rx = holder.subscribe();

        assert!(holder.set(Credentials::new("op", "pw")));
        assert!(rx.has_changed().unwrap());
        assert!(!holder.set(Credentials::new("op", "pw")));
        assert_eq!(holder.current(), Credentials::new("op", "pw"));
    }

    #[test]
    fn test_field_updates() {
        let holder = CredentialHolder::default();
        holder.set_username("op");
        assert!(!holder.current().is_complete());
        holder.set_password("pw");
        assert!(holder.current().is_complete());
        assert!(holder.clear());
        assert_eq!(holder.current(), Credentials::default());
    }
}
