//! View-model holding which sessions the client knows and which one is current.

/// Client-side session bookkeeping.
///
/// `known` is kept in sidebar order, newest first. Once the controller has
/// initialized, `current` is always an element of `known`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    current: String,
    known: Vec<String>,
}

impl SessionState {
    /// Start with `current` as the only session. The backend's list replaces
    /// it during initialization.
    pub fn new(current: impl Into<String>) -> Self {
        let current = current.into();
        Self {
            known: vec![current.clone()],
            current,
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Known session ids, newest first.
    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn is_current(&self, session_id: &str) -> bool {
        self.current == session_id
    }

    pub fn is_known(&self, session_id: &str) -> bool {
        self.known.iter().any(|id| id == session_id)
    }

    /// Replace the known ids with the backend's list (oldest first).
    ///
    /// Duplicates are dropped and the current session is added in front if
    /// the backend does not list it yet.
    pub fn replace_known(&mut self, oldest_first: Vec<String>) {
        let mut known: Vec<String> = Vec::with_capacity(oldest_first.len() + 1);
        for id in oldest_first.into_iter().rev() {
            if !known.contains(&id) {
                known.push(id);
            }
        }
        if !known.contains(&self.current) {
            known.insert(0, self.current.clone());
        }
        self.known = known;
    }

    /// Move a session to the front, adding it if unknown.
    pub fn track(&mut self, session_id: &str) {
        self.known.retain(|id| id != session_id);
        self.known.insert(0, session_id.to_string());
    }

    /// Make a session current and track it.
    pub fn adopt(&mut self, session_id: &str) {
        self.track(session_id);
        self.current = session_id.to_string();
    }

    /// Switch to an already known session without reordering.
    /// Returns false if the session is unknown.
    pub fn select(&mut self, session_id: &str) -> bool {
        if !self.is_known(session_id) {
            return false;
        }
        self.current = session_id.to_string();
        true
    }

    /// Drop a session from the known list. Returns whether it was known.
    ///
    /// Forgetting the current session leaves it current until the caller
    /// adopts a replacement.
    pub fn forget(&mut self, session_id: &str) -> bool {
        let before = self.known.len();
        self.known.retain(|id| id != session_id);
        self.known.len() != before
    }

    /// Resolve a user-supplied reference to a known session.
    ///
    /// Accepts a 1-based position in the known list, an exact id, or an
    /// unambiguous id prefix.
    pub fn resolve(&self, reference: &str) -> Option<&str> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        if let Ok(position) = reference.parse::<usize>() {
            if let Some(id) = position.checked_sub(1).and_then(|i| self.known.get(i)) {
                return Some(id.as_str());
            }
        }

        if let Some(id) = self.known.iter().find(|id| id.as_str() == reference) {
            return Some(id.as_str());
        }

        let mut matches = self.known.iter().filter(|id| id.starts_with(reference));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Some(id.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(state: &SessionState) -> Vec<&str> {
        state.known().iter().map(String::as_str).collect()
    }

    #[test]
    fn new_state_knows_its_current_session() {
        let state = SessionState::new("s-0");
        assert_eq!(state.current(), "s-0");
        assert_eq!(ids(&state), vec!["s-0"]);
    }

    #[test]
    fn replace_known_reverses_and_keeps_current() {
        let mut state = SessionState::new("s-0");
        state.replace_known(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(ids(&state), vec!["s-0", "a", "b"]);

        let mut state = SessionState::new("a");
        state.replace_known(vec!["a".into(), "b".into()]);
        assert_eq!(ids(&state), vec!["b", "a"]);

        state.replace_known(Vec::new());
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn track_moves_to_front() {
        let mut state = SessionState::new("a");
        state.track("b");
        state.track("a");
        assert_eq!(ids(&state), vec!["a", "b"]);
    }

    #[test]
    fn adopt_sets_current() {
        let mut state = SessionState::new("a");
        state.adopt("b");
        assert!(state.is_current("b"));
        assert_eq!(ids(&state), vec!["b", "a"]);
    }

    #[test]
    fn select_requires_known_session() {
        let mut state = SessionState::new("a");
        state.track("b");
        assert!(!state.select("c"));
        assert!(state.is_current("a"));
        assert!(state.select("b"));
        assert!(state.is_current("b"));
        assert_eq!(ids(&state), vec!["b", "a"]);
    }

    #[test]
    fn forget_keeps_current_until_replaced() {
        let mut state = SessionState::new("a");
        assert!(state.forget("a"));
        assert!(!state.forget("a"));
        assert!(state.is_current("a"));
        assert!(!state.is_known("a"));
    }

    #[test]
    fn resolve_by_position_id_and_prefix() {
        let mut state = SessionState::new("0195a2c4-aaaa");
        state.track("0195b7e1-bbbb");
        state.track("42");

        assert_eq!(state.resolve("2"), Some("0195b7e1-bbbb"));
        assert_eq!(state.resolve("42"), Some("42"));
        assert_eq!(state.resolve("0195a"), Some("0195a2c4-aaaa"));
        assert_eq!(state.resolve("0195"), None);
        assert_eq!(state.resolve("9"), None);
        assert_eq!(state.resolve("  "), None);
    }
}
