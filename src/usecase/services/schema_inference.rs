use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::entities::row::Row;
use crate::domain::entities::schema::{Role, Schema};

static SYMPTOM_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^s-\d+").expect("symptom id pattern is valid"));

pub fn looks_like_symptom_id(value: &str) -> bool {
    SYMPTOM_ID.is_match(value)
}

/// Guesses the role of each column from a single sample row.
///
/// Keyword roles take the first column whose lower-cased name contains the
/// keyword. The symptom id column is the first whose sample value starts
/// with `S-<digits>`; the description column is the first other non-empty
/// column whose value does not look like a symptom id. Runs once per load,
/// so an atypical first row mis-detects the whole dataset.
pub fn infer_schema(sample: &Row) -> Schema {
    let mut schema = Schema::default();

    for role in Role::ALL {
        if let Some(keyword) = role.keyword() {
            let column = sample
                .columns()
                .find(|column| column.to_lowercase().contains(keyword))
                .map(str::to_string);
            schema.set_column(role, column);
        }
    }

    schema.symptom_id = sample
        .cells()
        .find(|(_, value)| looks_like_symptom_id(value))
        .map(|(column, _)| column.to_string());

    schema.symptom_desc = sample
        .cells()
        .find(|(column, value)| {
            !value.is_empty()
                && Some(*column) != schema.symptom_id.as_deref()
                && !looks_like_symptom_id(value)
        })
        .map(|(column, _)| column.to_string());

    debug!(?schema, missing = ?schema.missing_roles(), "inferred dataset schema");
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        Row::from_pairs([
            ("Symptom", "S-12"),
            ("Symptom description", "Fan is noisy"),
            ("Category", "HVAC"),
            ("Sub issue", "Fan"),
            ("Action support", "Check belt"),
            ("Actions for field", "1_Inspect belt"),
            ("Spare parts", "Belt-X"),
            ("SOP", "http://x"),
        ])
    }

    #[test]
    fn detects_every_role_of_a_typical_row() {
        let schema = infer_schema(&sample());

        assert_eq!(schema.category.as_deref(), Some("Category"));
        assert_eq!(schema.sub_issue.as_deref(), Some("Sub issue"));
        assert_eq!(schema.symptom_id.as_deref(), Some("Symptom"));
        assert_eq!(schema.symptom_desc.as_deref(), Some("Symptom description"));
        assert_eq!(schema.action_support.as_deref(), Some("Action support"));
        assert_eq!(schema.action_field.as_deref(), Some("Actions for field"));
        assert_eq!(schema.spare_part.as_deref(), Some("Spare parts"));
        assert_eq!(schema.sop_link.as_deref(), Some("SOP"));
        assert!(schema.missing_roles().is_empty());
    }

    #[test]
    fn keyword_match_is_case_insensitive_and_first_column_wins() {
        let row = Row::from_pairs([
            ("SUBSYSTEM", "Cooling"),
            ("Sub issue", "Fan"),
            ("MAIN CATEGORY", "HVAC"),
        ]);

        let schema = infer_schema(&row);

        assert_eq!(schema.sub_issue.as_deref(), Some("SUBSYSTEM"));
        assert_eq!(schema.category.as_deref(), Some("MAIN CATEGORY"));
    }

    #[test]
    fn symptom_id_pattern_is_anchored_and_case_insensitive() {
        assert!(looks_like_symptom_id("S-1"));
        assert!(looks_like_symptom_id("s-042 extra"));
        assert!(!looks_like_symptom_id("XS-1"));
        assert!(!looks_like_symptom_id("S-"));
        assert!(!looks_like_symptom_id(""));
    }

    #[test]
    fn description_skips_empty_values_and_symptom_like_values() {
        let row = Row::from_pairs([
            ("Notes", ""),
            ("Code", "S-7"),
            ("Alt code", "s-8"),
            ("Text", "Leaking valve"),
        ]);

        let schema = infer_schema(&row);

        assert_eq!(schema.symptom_id.as_deref(), Some("Code"));
        assert_eq!(schema.symptom_desc.as_deref(), Some("Text"));
    }

    #[test]
    fn unmatched_roles_stay_undefined() {
        let row = Row::from_pairs([("Text", "hello")]);

        let schema = infer_schema(&row);

        assert_eq!(schema.symptom_id, None);
        assert_eq!(schema.symptom_desc.as_deref(), Some("Text"));
        assert_eq!(schema.category, None);
        assert_eq!(schema.sop_link, None);
        assert_eq!(schema.missing_roles().len(), 7);
    }

    #[test]
    fn empty_sample_yields_empty_schema() {
        assert_eq!(infer_schema(&Row::default()), Schema::default());
    }
}
