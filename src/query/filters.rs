//! Search filters and the predicate builder that turns them into SQL.
//!
//! Every predicate is a fixed SQL fragment with `?` placeholders; user input
//! only ever travels as a bound [`Value`].

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::model::PersonRole;

pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Optional narrowing criteria shared by episode and performance search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub playwright_id: Option<i64>,
    pub director_id: Option<i64>,
    pub actor_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

impl SearchFilters {
    /// The free-text term as a `LIKE` pattern. Blank queries do not filter.
    pub fn like_term(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(like_pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.like_term().is_none()
            && self.year_from.is_none()
            && self.year_to.is_none()
            && self.playwright_id.is_none()
            && self.director_id.is_none()
            && self.actor_id.is_none()
            && self.tag_ids.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Page {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }
}

pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

/// Accumulated `WHERE` conditions and the values bound to them, in order.
#[derive(Debug, Default)]
pub(crate) struct Predicates {
    conditions: Vec<String>,
    params: Vec<Value>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: impl Into<String>, values: impl IntoIterator<Item = Value>) {
        self.conditions.push(condition.into());
        self.params.extend(values);
    }

    /// `" WHERE a AND b"`, or nothing when no condition was pushed.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Appends the value for a trailing `LIMIT ?`; the caller appends the SQL.
    pub fn push_limit(&mut self, limit: u32) {
        self.params.push(Value::Integer(limit.into()));
    }

    /// Appends `LIMIT ? OFFSET ?` values.
    pub fn bind_page(&mut self, page: Page) {
        self.push_limit(page.limit);
        self.params.push(Value::Integer(page.offset.into()));
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

pub(crate) fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

/// Matches the stored label in `column` against `role`. Labels are kept
/// verbatim, so `Other` means any label outside the fixed set that is not a
/// creator credit.
pub(crate) fn role_condition(column: &str, role: PersonRole) -> (String, Vec<Value>) {
    if role != PersonRole::Other {
        return (format!("{column} = ?"), vec![text(role.as_str())]);
    }

    let known: Vec<Value> = PersonRole::ALL
        .iter()
        .filter(|r| **r != PersonRole::Other)
        .map(|r| r.as_str())
        .chain(PersonRole::CREATOR_LABELS)
        .map(text)
        .collect();
    (
        format!("{column} NOT IN ({})", placeholders(known.len())),
        known,
    )
}

/// Labels excluded from a person's performing roles.
pub(crate) fn creator_condition(column: &str) -> (String, Vec<Value>) {
    (
        format!("{column} NOT IN ({})", placeholders(PersonRole::CREATOR_LABELS.len())),
        PersonRole::CREATOR_LABELS.into_iter().map(text).collect(),
    )
}

fn credit_exists(credit_table: &str, owner_column: &str, owner_key: &str) -> String {
    format!(
        "EXISTS (SELECT 1 FROM {credit_table} c WHERE c.{owner_column} = {owner_key} \
         AND c.person_id = ? AND c.role = ?)"
    )
}

fn push_credit(predicates: &mut Predicates, condition: &str, person_id: Option<i64>, role: PersonRole) {
    if let Some(id) = person_id {
        predicates.push(condition, [Value::Integer(id), text(role.as_str())]);
    }
}

/// Predicates over `episodes e LEFT JOIN plays p`.
pub(crate) fn episode_predicates(filters: &SearchFilters) -> Predicates {
    let mut predicates = Predicates::new();

    if let Some(term) = filters.like_term() {
        predicates.push(
            "(e.title LIKE ? OR e.description LIKE ?)",
            [text(&term), text(&term)],
        );
    }
    if let Some(year) = filters.year_from {
        predicates.push("e.year >= ?", [Value::Integer(year.into())]);
    }
    if let Some(year) = filters.year_to {
        predicates.push("e.year <= ?", [Value::Integer(year.into())]);
    }
    if let Some(id) = filters.playwright_id {
        predicates.push("p.playwright_id = ?", [Value::Integer(id)]);
    }

    let credit = credit_exists("episode_persons", "episode_id", "e.prf_id");
    push_credit(&mut predicates, &credit, filters.director_id, PersonRole::Director);
    push_credit(&mut predicates, &credit, filters.actor_id, PersonRole::Actor);

    if !filters.tag_ids.is_empty() {
        predicates.push(
            format!(
                "EXISTS (SELECT 1 FROM episode_tags et WHERE et.episode_id = e.prf_id \
                 AND et.tag_id IN ({}))",
                placeholders(filters.tag_ids.len())
            ),
            filters.tag_ids.iter().map(|id| Value::Integer(*id)),
        );
    }

    predicates
}

/// Predicates over `performances perf LEFT JOIN plays w`.
pub(crate) fn performance_predicates(filters: &SearchFilters) -> Predicates {
    let mut predicates = Predicates::new();

    if let Some(term) = filters.like_term() {
        predicates.push(
            "(perf.title LIKE ? OR perf.description LIKE ? OR w.title LIKE ?)",
            [text(&term), text(&term), text(&term)],
        );
    }
    if let Some(year) = filters.year_from {
        predicates.push("perf.year >= ?", [Value::Integer(year.into())]);
    }
    if let Some(year) = filters.year_to {
        predicates.push("perf.year <= ?", [Value::Integer(year.into())]);
    }
    if let Some(id) = filters.playwright_id {
        predicates.push("w.playwright_id = ?", [Value::Integer(id)]);
    }

    let credit = credit_exists("performance_persons", "performance_id", "perf.id");
    push_credit(&mut predicates, &credit, filters.director_id, PersonRole::Director);
    push_credit(&mut predicates, &credit, filters.actor_id, PersonRole::Actor);

    if !filters.tag_ids.is_empty() {
        predicates.push(
            format!(
                "EXISTS (SELECT 1 FROM play_tags pt WHERE pt.play_id = perf.work_id \
                 AND pt.tag_id IN ({}))",
                placeholders(filters.tag_ids.len())
            ),
            filters.tag_ids.iter().map(|id| Value::Integer(*id)),
        );
    }

    predicates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_filters() -> SearchFilters {
        SearchFilters {
            query: Some("Peer".into()),
            year_from: Some(1960),
            year_to: Some(1990),
            playwright_id: Some(1),
            director_id: Some(2),
            actor_id: Some(3),
            tag_ids: vec![10, 11, 12],
        }
    }

    #[test]
    fn test_empty_filters_produce_no_where_clause() {
        let predicates = episode_predicates(&SearchFilters::default());
        assert_eq!(predicates.where_clause(), "");
        assert!(predicates.params().is_empty());
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let filters = SearchFilters {
            query: Some("   ".into()),
            ..Default::default()
        };
        assert!(filters.is_empty());
        assert_eq!(episode_predicates(&filters).where_clause(), "");
    }

    #[test]
    fn test_placeholders_match_bound_values() {
        for predicates in [
            episode_predicates(&full_filters()),
            performance_predicates(&full_filters()),
        ] {
            let clause = predicates.where_clause();
            assert_eq!(clause.matches('?').count(), predicates.params().len());
        }
    }

    #[test]
    fn test_query_term_is_bound_not_spliced() {
        let filters = SearchFilters {
            query: Some("'; DROP TABLE episodes; --".into()),
            ..Default::default()
        };
        let predicates = episode_predicates(&filters);
        assert!(!predicates.where_clause().contains("DROP"));
        assert_eq!(
            predicates.params()[0],
            Value::Text("%'; DROP TABLE episodes; --%".into())
        );
    }

    #[test]
    fn test_conditions_are_joined_with_and() {
        let filters = SearchFilters {
            year_from: Some(1970),
            year_to: Some(1980),
            ..Default::default()
        };
        assert_eq!(
            episode_predicates(&filters).where_clause(),
            " WHERE e.year >= ? AND e.year <= ?"
        );
    }

    #[test]
    fn test_credit_filters_bind_role_labels() {
        let filters = SearchFilters {
            director_id: Some(5),
            ..Default::default()
        };
        let predicates = performance_predicates(&filters);
        assert_eq!(
            predicates.params(),
            &[Value::Integer(5), Value::Text("director".into())]
        );
    }

    #[test]
    fn test_other_role_excludes_every_known_label() {
        let (condition, values) = role_condition("pp.role", PersonRole::Other);
        assert!(condition.starts_with("pp.role NOT IN ("));
        assert_eq!(condition.matches('?').count(), values.len());
        assert!(values.contains(&text("director")));
        assert!(values.contains(&text("forfatter")));
        assert!(!values.contains(&text("other")));

        let (condition, values) = role_condition("pp.role", PersonRole::Actor);
        assert_eq!(condition, "pp.role = ?");
        assert_eq!(values, vec![text("actor")]);
    }

    #[test]
    fn test_bind_page_appends_limit_and_offset() {
        let mut predicates = episode_predicates(&SearchFilters::default());
        predicates.bind_page(Page::new(20, 40));
        assert_eq!(predicates.params(), &[Value::Integer(20), Value::Integer(40)]);
    }
}
