//! Search/filter input model.
//!
//! Models the search box placed above a filterable collection: a value,
//! a clear action (the close icon), key-press/focus events that re-apply
//! the filter, and an optional suggestion list matched by prefix.

/// Events the input reacts to by re-applying its filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    KeyPress,
    Focus,
}

/// A filter input with an optional suggestion list.
#[derive(Debug, Clone, Default)]
pub struct FilterBox {
    value: String,
    placeholder: String,
    suggestions: Vec<String>,
}

impl FilterBox {
    pub fn new() -> Self {
        FilterBox {
            value: String::new(),
            placeholder: "type to filter".to_string(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(suggestions: Vec<String>) -> Self {
        FilterBox {
            suggestions,
            ..Self::new()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    /// The close icon: reset the value.
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Handle an event by applying `filter` to the current value.
    pub fn on_event(&self, _event: SearchEvent, filter: &mut dyn FnMut(&str)) {
        filter(&self.value);
    }

    /// Filter `items` with a custom matcher against the current value.
    pub fn apply<'a, T>(
        &self,
        items: &'a [T],
        matches: impl Fn(&T, &str) -> bool,
    ) -> Vec<&'a T> {
        items.iter().filter(|item| matches(item, &self.value)).collect()
    }

    /// Case-insensitive substring filter over strings.
    pub fn apply_contains<'a, S: AsRef<str>>(&self, items: &'a [S]) -> Vec<&'a S> {
        let needle = self.value.to_lowercase();
        items
            .iter()
            .filter(|item| item.as_ref().to_lowercase().contains(&needle))
            .collect()
    }

    /// Suggestions that start with the current value, case-insensitively.
    pub fn suggest(&self) -> Vec<&str> {
        let prefix = self.value.to_lowercase();
        self.suggestions
            .iter()
            .filter(|s| s.to_lowercase().starts_with(&prefix))
            .map(|s| s.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_contains_is_case_insensitive() {
        let mut input = FilterBox::new();
        input.set_value("Motor");
        let items = vec!["sys/motor/1", "sys/pump/1", "SYS/MOTOR/2"];
        let hits = input.apply_contains(&items);
        assert_eq!(hits, vec![&"sys/motor/1", &"SYS/MOTOR/2"]);
    }

    #[test]
    fn test_empty_value_matches_everything() {
        let input = FilterBox::new();
        let items = vec!["a", "b"];
        assert_eq!(input.apply_contains(&items).len(), 2);
    }

    #[test]
    fn test_clear_resets_value() {
        let mut input = FilterBox::new();
        input.set_value("x");
        input.clear();
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_events_reapply_filter() {
        let mut input = FilterBox::new();
        input.set_value("abc");
        let mut seen = Vec::new();
        input.on_event(SearchEvent::KeyPress, &mut |v| seen.push(v.to_string()));
        input.on_event(SearchEvent::Focus, &mut |v| seen.push(v.to_string()));
        assert_eq!(seen, vec!["abc", "abc"]);
    }

    #[test]
    fn test_suggestions_by_prefix() {
        let mut input = FilterBox::with_suggestions(vec![
            "state".to_string(),
            "status".to_string(),
            "position".to_string(),
        ]);
        input.set_value("sta");
        assert_eq!(input.suggest(), vec!["state", "status"]);
    }

    #[test]
    fn test_custom_matcher() {
        let mut input = FilterBox::new();
        input.set_value("2");
        let items = vec![1, 2, 12];
        let hits = input.apply(&items, |item, value| item.to_string().contains(value));
        assert_eq!(hits, vec![&2, &12]);
    }
}
