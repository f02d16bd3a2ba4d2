/// Stand-in for the browser's session history: a list of location queries
/// and the index of the one being shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<String>,
    position: usize,
}

impl NavigationStack {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            position: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.position]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Like `history.replaceState`.
    pub fn replace(&mut self, query: impl Into<String>) {
        self.entries[self.position] = query.into();
    }

    /// Like `history.pushState`: forward entries are dropped.
    pub fn push(&mut self, query: impl Into<String>) {
        self.entries.truncate(self.position + 1);
        self.entries.push(query.into());
        self.position += 1;
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.position + 1 >= self.entries.len() {
            return None;
        }
        self.position += 1;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_and_forward_walk_entries() {
        let mut nav = NavigationStack::new("a");
        nav.push("b");
        nav.push("c");

        assert_eq!(nav.back(), Some("b"));
        assert_eq!(nav.back(), Some("a"));
        assert_eq!(nav.back(), None);
        assert_eq!(nav.forward(), Some("b"));
        assert_eq!(nav.current(), "b");
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let mut nav = NavigationStack::new("a");
        nav.push("b");
        nav.push("c");
        nav.back();
        nav.push("d");

        assert_eq!(nav.len(), 3);
        assert_eq!(nav.forward(), None);
        assert_eq!(nav.back(), Some("b"));
    }

    #[test]
    fn replace_keeps_position() {
        let mut nav = NavigationStack::new("a");
        nav.replace("normalized");
        assert_eq!(nav.current(), "normalized");
        assert_eq!((nav.len(), nav.position()), (1, 0));
    }
}
