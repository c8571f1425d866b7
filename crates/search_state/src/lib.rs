//! Shared text-input state synchronized across storefront pages.
//!
//! This crate intentionally holds only the three cross-page input buffers
//! (header search box, results-page search box, chat composer) and the
//! navigation-driven clearing rules. It excludes query execution, routing,
//! and any rendering concerns. The host composes exactly one `SearchFields`
//! value and passes it by reference to each consumer.

/// Navigation destinations whose prefixes keep the input buffers alive.
pub const SEARCH_RELATED_PATHS: [&str; 2] = ["/search", "/chat"];

/// One of the three shared input buffers, or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Header,
    SearchBar,
    Chat,
    All,
}

/// Process-wide input buffers shared by the header search box, the results
/// page, and the chat composer. Buffers start empty and are never persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchFields {
    search_bar_query: String,
    search_query: String,
    chat_input: String,
}

impl SearchFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the header search box buffer.
    #[must_use]
    pub fn search_bar_query(&self) -> &str {
        &self.search_bar_query
    }

    pub fn set_search_bar_query(&mut self, value: impl Into<String>) {
        self.search_bar_query = value.into();
    }

    /// Returns the results-page search buffer.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search_query(&mut self, value: impl Into<String>) {
        self.search_query = value.into();
    }

    /// Returns the chat composer buffer.
    #[must_use]
    pub fn chat_input(&self) -> &str {
        &self.chat_input
    }

    pub fn set_chat_input(&mut self, value: impl Into<String>) {
        self.chat_input = value.into();
    }

    /// Applies the navigation clearing rule: any destination outside the
    /// search-related prefix set resets all three buffers at once.
    ///
    /// Returns true when the buffers were cleared so hosts can re-render.
    pub fn on_navigate(&mut self, new_path: &str) -> bool {
        if is_search_related_path(new_path) {
            return false;
        }

        self.clear_all_fields();
        true
    }

    /// Resets exactly the named buffer, or every buffer for
    /// [`SearchField::All`].
    pub fn clear_field(&mut self, field: SearchField) {
        match field {
            SearchField::Header => self.search_bar_query.clear(),
            SearchField::SearchBar => self.search_query.clear(),
            SearchField::Chat => self.chat_input.clear(),
            SearchField::All => self.clear_all_fields(),
        }
    }

    pub fn clear_all_fields(&mut self) {
        self.search_bar_query.clear();
        self.search_query.clear();
        self.chat_input.clear();
    }
}

/// Returns true when `path` starts with one of [`SEARCH_RELATED_PATHS`].
#[must_use]
pub fn is_search_related_path(path: &str) -> bool {
    SEARCH_RELATED_PATHS
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::{is_search_related_path, SearchField, SearchFields};

    fn populated_fields() -> SearchFields {
        let mut fields = SearchFields::new();
        fields.set_search_bar_query("hoodie");
        fields.set_search_query("t-shirt");
        fields.set_chat_input("show my orders");
        fields
    }

    #[test]
    fn buffers_start_empty() {
        let fields = SearchFields::new();
        assert_eq!(fields.search_bar_query(), "");
        assert_eq!(fields.search_query(), "");
        assert_eq!(fields.chat_input(), "");
    }

    #[test]
    fn setters_target_independent_buffers() {
        let fields = populated_fields();
        assert_eq!(fields.search_bar_query(), "hoodie");
        assert_eq!(fields.search_query(), "t-shirt");
        assert_eq!(fields.chat_input(), "show my orders");
    }

    #[test]
    fn navigation_outside_allow_list_clears_every_buffer() {
        for path in ["/", "/products/3", "/cart", "/orders", "/login"] {
            let mut fields = populated_fields();
            assert!(fields.on_navigate(path), "path {path} must clear");
            assert_eq!(fields.search_bar_query(), "");
            assert_eq!(fields.search_query(), "");
            assert_eq!(fields.chat_input(), "");
        }
    }

    #[test]
    fn navigation_to_search_related_paths_preserves_buffers() {
        for path in ["/search", "/search?q=shirt", "/chat", "/chat/history"] {
            let mut fields = populated_fields();
            assert!(!fields.on_navigate(path), "path {path} must preserve");
            assert_eq!(fields, populated_fields());
        }
    }

    #[test]
    fn clear_field_resets_exactly_the_named_buffer() {
        let mut fields = populated_fields();
        fields.clear_field(SearchField::Header);
        assert_eq!(fields.search_bar_query(), "");
        assert_eq!(fields.search_query(), "t-shirt");
        assert_eq!(fields.chat_input(), "show my orders");

        let mut fields = populated_fields();
        fields.clear_field(SearchField::SearchBar);
        assert_eq!(fields.search_bar_query(), "hoodie");
        assert_eq!(fields.search_query(), "");
        assert_eq!(fields.chat_input(), "show my orders");

        let mut fields = populated_fields();
        fields.clear_field(SearchField::Chat);
        assert_eq!(fields.search_bar_query(), "hoodie");
        assert_eq!(fields.search_query(), "t-shirt");
        assert_eq!(fields.chat_input(), "");
    }

    #[test]
    fn clear_field_all_matches_clear_all_fields() {
        let mut cleared_by_kind = populated_fields();
        cleared_by_kind.clear_field(SearchField::All);

        let mut cleared_directly = populated_fields();
        cleared_directly.clear_all_fields();

        assert_eq!(cleared_by_kind, cleared_directly);
        assert_eq!(cleared_by_kind, SearchFields::new());
    }

    #[test]
    fn search_related_prefix_matching_is_prefix_based() {
        assert!(is_search_related_path("/search"));
        assert!(is_search_related_path("/searching"));
        assert!(is_search_related_path("/chat"));
        assert!(!is_search_related_path("/"));
        assert!(!is_search_related_path("/products"));
        assert!(!is_search_related_path("search"));
    }
}
