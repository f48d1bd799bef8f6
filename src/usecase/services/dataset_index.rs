use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::row::Row;
use crate::domain::entities::schema::{Role, Schema};
use crate::usecase::services::schema_inference::infer_schema;

/// Support value meaning "not applicable" in the source sheets.
pub const NOT_APPLICABLE: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomEntry {
    pub id: String,
    pub description: String,
}

/// Read-only view over the loaded rows. Every query is recomputed from the
/// full row set; the tables are small and never change after load.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndex {
    rows: Vec<Row>,
    schema: Schema,
}

impl DatasetIndex {
    pub fn new(rows: Vec<Row>, schema: Schema) -> Self {
        Self { rows, schema }
    }

    /// Infers the schema from the first row. An empty table gets an empty
    /// schema and answers every query with nothing.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let schema = rows.first().map(infer_schema).unwrap_or_default();
        Self::new(rows, schema)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A filter on an undetected role lets every row through.
    fn matches(&self, row: &Row, role: Role, wanted: Option<&str>) -> bool {
        match (wanted, self.schema.column(role)) {
            (Some(wanted), Some(_)) => self.schema.value(row, role) == wanted,
            _ => true,
        }
    }

    fn filtered<'a>(
        &'a self,
        category: Option<&'a str>,
        sub_issue: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows.iter().filter(move |row| {
            self.matches(row, Role::Category, category)
                && self.matches(row, Role::SubIssue, sub_issue)
        })
    }

    fn distinct<'a>(rows: impl Iterator<Item = &'a str>) -> Vec<String> {
        rows.filter(|value| !value.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn distinct_categories(&self) -> Vec<String> {
        Self::distinct(
            self.rows
                .iter()
                .map(|row| self.schema.value(row, Role::Category)),
        )
    }

    pub fn distinct_sub_issues(&self, category: Option<&str>) -> Vec<String> {
        Self::distinct(
            self.filtered(category, None)
                .map(|row| self.schema.value(row, Role::SubIssue)),
        )
    }

    /// Symptoms visible under the given filters, sorted by id. The first
    /// description seen for an id wins. `text_filter` is matched
    /// case-insensitively against "{id} {description}".
    pub fn distinct_symptoms(
        &self,
        category: Option<&str>,
        sub_issue: Option<&str>,
        text_filter: &str,
    ) -> Vec<SymptomEntry> {
        let mut by_id: BTreeMap<&str, &str> = BTreeMap::new();
        for row in self.filtered(category, sub_issue) {
            let id = self.schema.value(row, Role::SymptomId);
            if id.is_empty() {
                continue;
            }
            by_id
                .entry(id)
                .or_insert_with(|| self.schema.value(row, Role::SymptomDesc));
        }

        let needle = text_filter.to_lowercase();
        by_id
            .into_iter()
            .filter(|(id, description)| {
                format!("{id} {description}")
                    .to_lowercase()
                    .contains(&needle)
            })
            .map(|(id, description)| SymptomEntry {
                id: id.to_string(),
                description: description.to_string(),
            })
            .collect()
    }

    /// Rows carrying actions for one symptom, minus the "/" support rows.
    pub fn action_rows_for_symptom(
        &self,
        symptom_id: &str,
        category: Option<&str>,
        sub_issue: Option<&str>,
    ) -> Vec<Row> {
        self.filtered(category, sub_issue)
            .filter(|row| self.schema.value(row, Role::SymptomId) == symptom_id)
            .filter(|row| self.schema.value(row, Role::ActionSupport).trim() != NOT_APPLICABLE)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, sub: &str, id: &str, desc: &str, support: &str) -> Row {
        Row::from_pairs([
            ("Symptom", id),
            ("Description", desc),
            ("Category", category),
            ("Sub issue", sub),
            ("Support", support),
        ])
    }

    fn index() -> DatasetIndex {
        DatasetIndex::from_rows(vec![
            row("HVAC", "Fan", "S-2", "Quiet hum", "Check motor"),
            row("HVAC", "Fan", "S-1", "Noisy fan", "Check belt"),
            row("Plumbing", "Valve", "S-3", "Leak", "Tighten"),
            row("HVAC", "Filter", "S-1", "Loud fan", " / "),
            row("", "", "S-4", "Orphan", "Reset"),
            row("HVAC", "Fan", "S-1", "Noisy fan", "/"),
        ])
    }

    #[test]
    fn categories_are_sorted_unique_and_non_empty() {
        assert_eq!(index().distinct_categories(), vec!["HVAC", "Plumbing"]);
    }

    #[test]
    fn sub_issues_follow_category_filter() {
        let index = index();

        assert_eq!(index.distinct_sub_issues(Some("HVAC")), vec!["Fan", "Filter"]);
        assert_eq!(
            index.distinct_sub_issues(None),
            vec!["Fan", "Filter", "Valve"]
        );
        assert!(index.distinct_sub_issues(Some("Electrical")).is_empty());
    }

    #[test]
    fn symptoms_keep_first_description_and_sort_by_id() {
        let symptoms = index().distinct_symptoms(Some("HVAC"), None, "");

        assert_eq!(
            symptoms,
            vec![
                SymptomEntry {
                    id: "S-1".to_string(),
                    description: "Noisy fan".to_string(),
                },
                SymptomEntry {
                    id: "S-2".to_string(),
                    description: "Quiet hum".to_string(),
                },
            ]
        );
    }

    #[test]
    fn symptom_text_filter_matches_id_or_description() {
        let index = index();

        let by_text: Vec<String> = index
            .distinct_symptoms(None, None, "NOISY")
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(by_text, vec!["S-1"]);

        let by_id: Vec<String> = index
            .distinct_symptoms(None, None, "s-3")
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(by_id, vec!["S-3"]);
    }

    #[test]
    fn action_rows_exclude_not_applicable_support() {
        let index = index();

        let rows = index.action_rows_for_symptom("S-1", None, None);

        assert_eq!(rows.len(), 1);
        assert_eq!(index.schema().value(&rows[0], Role::ActionSupport), "Check belt");
    }

    #[test]
    fn missing_roles_turn_filters_into_no_ops() {
        let rows = vec![
            Row::from_pairs([("Code", "S-1"), ("Text", "Noisy")]),
            Row::from_pairs([("Code", "S-2"), ("Text", "Hum")]),
        ];
        let index = DatasetIndex::from_rows(rows);

        assert!(index.distinct_categories().is_empty());
        assert_eq!(index.distinct_symptoms(Some("HVAC"), None, "").len(), 2);
        assert_eq!(index.distinct_symptoms(None, None, "").len(), 2);
        assert_eq!(index.action_rows_for_symptom("S-2", None, None).len(), 1);
    }

    #[test]
    fn empty_dataset_answers_with_nothing() {
        let index = DatasetIndex::from_rows(Vec::new());

        assert!(index.is_empty());
        assert!(index.distinct_categories().is_empty());
        assert!(index.distinct_symptoms(None, None, "").is_empty());
    }
}
