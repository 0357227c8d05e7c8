//! Session registry: live sessions by key.

use crate::session::Session;
use core_runtime::SessionKey;
use std::collections::HashMap;

/// A key is present iff its session has not been released.
#[derive(Default)]
pub(crate) struct SessionRegistry {
    sessions: HashMap<SessionKey, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `session`, returning whatever it displaced.
    pub fn insert(&mut self, session: Session) -> Option<Session> {
        self.sessions.insert(session.key, session)
    }

    pub fn get(&self, key: SessionKey) -> Option<&Session> {
        self.sessions.get(&key)
    }

    pub fn get_mut(&mut self, key: SessionKey) -> Option<&mut Session> {
        self.sessions.get_mut(&key)
    }

    pub fn remove(&mut self, key: SessionKey) -> Option<Session> {
        self.sessions.remove(&key)
    }

    pub fn contains(&self, key: SessionKey) -> bool {
        self.sessions.contains_key(&key)
    }

    /// Live keys in ascending order.
    pub fn keys(&self) -> Vec<SessionKey> {
        let mut keys: Vec<_> = self.sessions.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn drain(&mut self) -> Vec<Session> {
        self.sessions.drain().map(|(_, session)| session).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryPolicy;
    use crate::preparation::PreparationRequest;
    use bridge_traits::EngineHandle;

    fn session(key: i64, handle: u64) -> Session {
        let key = SessionKey::new(key);
        let (request, _rx) = PreparationRequest::new(key);
        Session::new(key, EngineHandle::new(handle), CategoryPolicy::default(), request)
    }

    #[test]
    fn test_insert_returns_displaced_session() {
        let mut registry = SessionRegistry::new();
        assert!(registry.insert(session(1, 10)).is_none());

        let displaced = registry.insert(session(1, 11)).unwrap();
        assert_eq!(displaced.handle, EngineHandle::new(10));
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(SessionKey::new(1)).unwrap().handle,
            EngineHandle::new(11)
        );
    }

    #[test]
    fn test_keys_are_sorted() {
        let mut registry = SessionRegistry::new();
        for key in [5, -2, 3] {
            registry.insert(session(key, key as u64 + 100));
        }
        assert_eq!(
            registry.keys(),
            vec![SessionKey::new(-2), SessionKey::new(3), SessionKey::new(5)]
        );
    }

    #[test]
    fn test_remove_and_drain() {
        let mut registry = SessionRegistry::new();
        registry.insert(session(1, 1));
        registry.insert(session(2, 2));

        assert!(registry.remove(SessionKey::new(1)).is_some());
        assert!(registry.remove(SessionKey::new(1)).is_none());
        assert!(!registry.contains(SessionKey::new(1)));

        let drained = registry.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(registry.len(), 0);
    }
}
