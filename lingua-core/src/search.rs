//! Free-text filtering for list screens
//!
//! Every management screen supports filtering its fetched collection by a
//! search term: a case-insensitive substring match over a fixed set of
//! display fields. The fields are fixed per entity, so each record type
//! declares them once through [`Searchable`].

/// A record that exposes its searchable display fields.
pub trait Searchable {
    /// The display fields the search term is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match of `term` against any of `fields`.
pub fn matches_term<'a>(fields: impl IntoIterator<Item = &'a str>, term: &str) -> bool {
    let needle = term.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter a fetched collection by an optional search term.
///
/// `None` and whitespace-only terms leave the collection unchanged.
pub fn filter_by_term<T: Searchable>(items: Vec<T>, term: Option<&str>) -> Vec<T> {
    match term.map(str::trim) {
        Some(term) if !term.is_empty() => items
            .into_iter()
            .filter(|item| matches_term(item.search_fields(), term))
            .collect(),
        _ => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Language {
        name: String,
        native_name: String,
    }

    impl Searchable for Language {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name, &self.native_name]
        }
    }

    fn sample() -> Vec<Language> {
        vec![
            Language {
                name: "Spanish".to_string(),
                native_name: "Español".to_string(),
            },
            Language {
                name: "French".to_string(),
                native_name: "Français".to_string(),
            },
        ]
    }

    #[test]
    fn term_matches_case_insensitively() {
        let found = filter_by_term(sample(), Some("span"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Spanish");
    }

    #[test]
    fn term_matches_any_display_field() {
        let found = filter_by_term(sample(), Some("fran"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "French");
    }

    #[test]
    fn empty_term_returns_everything() {
        assert_eq!(filter_by_term(sample(), None).len(), 2);
        assert_eq!(filter_by_term(sample(), Some("   ")).len(), 2);
    }

    #[test]
    fn unmatched_term_returns_nothing() {
        assert!(filter_by_term(sample(), Some("klingon")).is_empty());
    }
}
