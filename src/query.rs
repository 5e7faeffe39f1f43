/// Active filter values. Empty strings from the UI are normalized to `None`
/// before they get here, so `None` always means "filter off".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub cohort: Option<String>,
    pub class: Option<String>,
    pub search: Option<String>,
}

pub fn normalize(value: &str) -> Option<String> {
    let t = value.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq { field: &'static str, value: String },
    ILike { field: &'static str, pattern: String },
}

/// Compile filter state into the conjunctive predicate list the store
/// applies. No active filters means the unfiltered collection.
pub fn build_predicates(filters: &Filters) -> Vec<Predicate> {
    let mut predicates = Vec::new();
    if let Some(cohort) = &filters.cohort {
        predicates.push(Predicate::Eq {
            field: "cohort",
            value: cohort.clone(),
        });
    }
    if let Some(class) = &filters.class {
        predicates.push(Predicate::Eq {
            field: "student_class",
            value: class.clone(),
        });
    }
    if let Some(search) = &filters.search {
        predicates.push(Predicate::ILike {
            field: "name",
            pattern: format!("%{search}%"),
        });
    }
    predicates
}

/// Case-insensitive LIKE with `%` wildcards, matching the store's `ilike`
/// operator. The in-memory store uses this so filter semantics are the same
/// on both backends.
pub fn ilike_matches(pattern: &str, value: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let value = value.to_lowercase();
    let segments: Vec<&str> = pattern.split('%').collect();

    if segments.len() == 1 {
        return pattern == value;
    }

    let last = segments.len() - 1;
    let mut pos = 0usize;
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        if i == 0 {
            if !value.starts_with(segment) {
                return false;
            }
            pos = segment.len();
        } else if i == last {
            let tail = &value[pos..];
            if !tail.ends_with(segment) {
                return false;
            }
        } else {
            match value[pos..].find(segment) {
                Some(found) => pos += found + segment.len(),
                None => return false,
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_compile_to_no_predicates() {
        assert!(build_predicates(&Filters::default()).is_empty());
    }

    #[test]
    fn each_filter_compiles_to_its_predicate() {
        let filters = Filters {
            cohort: Some("AY 2024-2025".into()),
            class: Some("9".into()),
            search: Some("ali".into()),
        };
        assert_eq!(
            build_predicates(&filters),
            vec![
                Predicate::Eq {
                    field: "cohort",
                    value: "AY 2024-2025".into()
                },
                Predicate::Eq {
                    field: "student_class",
                    value: "9".into()
                },
                Predicate::ILike {
                    field: "name",
                    pattern: "%ali%".into()
                },
            ]
        );
    }

    #[test]
    fn single_filter_compiles_alone() {
        let filters = Filters {
            search: Some("bo".into()),
            ..Filters::default()
        };
        assert_eq!(
            build_predicates(&filters),
            vec![Predicate::ILike {
                field: "name",
                pattern: "%bo%".into()
            }]
        );
    }

    #[test]
    fn normalize_clears_blank_values() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize(" 9 "), Some("9".to_string()));
    }

    #[test]
    fn ilike_substring_is_case_insensitive() {
        assert!(ilike_matches("%ali%", "Alice"));
        assert!(ilike_matches("%ALI%", "alice"));
        assert!(!ilike_matches("%ali%", "Bob"));
    }

    #[test]
    fn ilike_without_wildcards_is_exact() {
        assert!(ilike_matches("alice", "Alice"));
        assert!(!ilike_matches("alice", "Alice B"));
    }

    #[test]
    fn ilike_anchors_without_leading_or_trailing_wildcard() {
        assert!(ilike_matches("ali%", "Alice"));
        assert!(!ilike_matches("ali%", "Malice"));
        assert!(ilike_matches("%ice", "Alice"));
        assert!(!ilike_matches("%ice", "Iceberg"));
    }

    #[test]
    fn ilike_matches_ordered_segments() {
        assert!(ilike_matches("%a%c%", "abc"));
        assert!(!ilike_matches("%c%a%", "abc"));
    }

    #[test]
    fn ilike_empty_pattern_matches_only_empty() {
        assert!(ilike_matches("", ""));
        assert!(!ilike_matches("", "x"));
        assert!(ilike_matches("%", "anything"));
    }
}
