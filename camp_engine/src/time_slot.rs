//! Morning/evening classification of time-slot labels.
//!
//! Time slots are named by hand, in English or Dari, so classification
//! is a substring search over a fixed keyword list.  English keywords
//! match case-insensitively; Dari keywords match as-is since the script
//! has no case.
//!
//! The same keyword list is exposed as a declarative predicate so that
//! a query layer can filter stored labels with an equivalent `LIKE`
//! condition.  [`evaluate`] interprets that predicate with SQL
//! `LOWER(..) LIKE '%kw%'` semantics and must agree with
//! [`is_morning_evening`] on every label.

use serde::Serialize;

pub const ENGLISH_KEYWORDS: [&str; 2] = ["morning", "evening"];

pub const DARI_KEYWORDS: [&str; 5] = ["صبح", "صبحانه", "شب", "شام", "عصر"];

/// One `LIKE '%keyword%'` term of the query-level predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordCondition {
    pub keyword: &'static str,
    /// Whether the column is wrapped in `LOWER(..)` before matching.
    pub lowercase: bool,
}

/// Disjunction of keyword conditions, English terms first.
pub const MORNING_EVENING_PREDICATE: [KeywordCondition; 7] = [
    KeywordCondition { keyword: ENGLISH_KEYWORDS[0], lowercase: true },
    KeywordCondition { keyword: ENGLISH_KEYWORDS[1], lowercase: true },
    KeywordCondition { keyword: DARI_KEYWORDS[0], lowercase: false },
    KeywordCondition { keyword: DARI_KEYWORDS[1], lowercase: false },
    KeywordCondition { keyword: DARI_KEYWORDS[2], lowercase: false },
    KeywordCondition { keyword: DARI_KEYWORDS[3], lowercase: false },
    KeywordCondition { keyword: DARI_KEYWORDS[4], lowercase: false },
];

pub fn is_morning_evening(label: &str) -> bool {
    let folded = label.to_lowercase();
    ENGLISH_KEYWORDS.iter().any(|kw| folded.contains(kw))
        || DARI_KEYWORDS.iter().any(|kw| label.contains(kw))
}

/// Interprets `conditions` the way a database would evaluate the
/// rendered `WHERE` fragment against `label`.
pub fn evaluate(conditions: &[KeywordCondition], label: &str) -> bool {
    conditions.iter().any(|condition| {
        if condition.lowercase {
            label.to_lowercase().contains(condition.keyword)
        } else {
            label.contains(condition.keyword)
        }
    })
}

/// Renders the predicate as a SQL boolean expression over `column`,
/// e.g. `LOWER(ts.name) LIKE '%morning%' OR ts.name LIKE '%صبح%'`.
pub fn sql_condition(column: &str) -> String {
    MORNING_EVENING_PREDICATE
        .iter()
        .map(|condition| {
            let keyword = condition.keyword.replace('\'', "''");
            if condition.lowercase {
                format!("LOWER({column}) LIKE '%{keyword}%'")
            } else {
                format!("{column} LIKE '%{keyword}%'")
            }
        })
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// `CASE` expression summing `amount_column` only for morning/evening
/// slots, as used by per-coach fee aggregation queries.
pub fn sql_case_expression(label_column: &str, amount_column: &str) -> String {
    format!(
        "CASE WHEN {} THEN {amount_column} ELSE 0 END",
        sql_condition(label_column)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [(&str, bool); 16] = [
        ("Morning Class", true),
        ("evening session", true),
        ("MORNING", true),
        ("Early-Morning Swim", true),
        ("صبح", true),
        ("وقت صبح", true),
        ("شام", true),
        ("عصر", true),
        ("صبحانه", true),
        ("شب", true),
        ("کلاس شب ۸ بجه", true),
        ("Afternoon", false),
        ("چاشت", false),
        ("Special Class", false),
        ("ظهر", false),
        ("", false),
    ];

    #[test]
    fn test_classification() {
        for (label, expected) in LABELS {
            assert_eq!(is_morning_evening(label), expected, "label {label:?}");
        }
    }

    #[test]
    fn test_predicate_agrees_with_classifier() {
        let extra = ["mOrNiNg yoga", "EVENINGS", "Noon", "Morn", "eve", "صب", "شــب", "night"];
        for label in LABELS.iter().map(|(label, _)| *label).chain(extra) {
            assert_eq!(
                evaluate(&MORNING_EVENING_PREDICATE, label),
                is_morning_evening(label),
                "label {label:?}"
            );
        }
    }

    /// Reads `sql_condition` output back as `(keyword, lowercase)` terms.
    fn parse_sql_terms(sql: &str, column: &str) -> Vec<(String, bool)> {
        let lowered = format!("LOWER({column}) LIKE '%");
        let plain = format!("{column} LIKE '%");
        sql.split(" OR ")
            .map(|term| {
                let (rest, lowercase) = match term.strip_prefix(lowered.as_str()) {
                    Some(rest) => (rest, true),
                    None => (term.strip_prefix(plain.as_str()).expect(term), false),
                };
                let keyword = rest.strip_suffix("%'").expect(term);
                (keyword.replace("''", "'"), lowercase)
            })
            .collect()
    }

    #[test]
    fn test_rendered_sql_agrees_with_classifier() {
        let terms = parse_sql_terms(&sql_condition("ts.name"), "ts.name");
        let english: Vec<&str> = terms.iter().filter(|t| t.1).map(|t| t.0.as_str()).collect();
        let dari: Vec<&str> = terms.iter().filter(|t| !t.1).map(|t| t.0.as_str()).collect();
        assert_eq!(english, ENGLISH_KEYWORDS);
        assert_eq!(dari, DARI_KEYWORDS);

        // LIKE '%kw%' is a substring test; LOWER applies to the column only.
        let matches_sql = |label: &str| {
            terms.iter().any(|(keyword, lowercase)| {
                if *lowercase {
                    label.to_lowercase().contains(keyword.as_str())
                } else {
                    label.contains(keyword.as_str())
                }
            })
        };
        let extra = ["Evening Yoga", "EVENINGS", "Noon", "eve", "صب", "شــب", "نماز شام"];
        for label in LABELS.iter().map(|(label, _)| *label).chain(extra) {
            assert_eq!(matches_sql(label), is_morning_evening(label), "label {label:?}");
        }
        for (label, expected) in LABELS {
            assert_eq!(matches_sql(label), expected, "label {label:?}");
        }
    }

    #[test]
    fn test_predicate_covers_every_keyword() {
        let keywords: Vec<&str> = MORNING_EVENING_PREDICATE.iter().map(|c| c.keyword).collect();
        for keyword in ENGLISH_KEYWORDS.iter().chain(DARI_KEYWORDS.iter()) {
            assert!(keywords.contains(keyword), "missing {keyword}");
        }
        assert_eq!(keywords.len(), ENGLISH_KEYWORDS.len() + DARI_KEYWORDS.len());
    }

    #[test]
    fn test_sql_rendering() {
        let sql = sql_condition("ts.name");
        assert!(sql.starts_with("LOWER(ts.name) LIKE '%morning%' OR LOWER(ts.name) LIKE '%evening%'"));
        assert!(sql.contains("ts.name LIKE '%صبح%'"));
        assert!(sql.contains("ts.name LIKE '%عصر%'"));
        assert_eq!(sql.matches(" OR ").count(), 6);

        let case = sql_case_expression("ts.name", "r.fee_amount");
        assert!(case.starts_with("CASE WHEN LOWER(ts.name)"));
        assert!(case.ends_with("THEN r.fee_amount ELSE 0 END"));
    }
}
