use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::row::Row;
use crate::domain::entities::schema::{Role, Schema};
use crate::domain::entities::selection::ActionGroup;
use crate::usecase::services::dataset_index::NOT_APPLICABLE;

/// Order given to action rows without a `<digits>_` prefix.
pub const UNORDERED: u32 = 999;

/// SOP value marking an informational action without a document.
const INFO_ONLY: &str = "I";

static FIELD_ORDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)_").expect("field order pattern is valid"));

pub fn field_order(schema: &Schema, row: &Row) -> u32 {
    FIELD_ORDER
        .captures(schema.value(row, Role::ActionField))
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(UNORDERED)
}

/// Action text with its order prefix removed: "2_Replace belt" -> "Replace belt".
pub fn step_label(schema: &Schema, row: &Row) -> String {
    let text = schema.value(row, Role::ActionField);
    match FIELD_ORDER.find(text) {
        Some(prefix) => text[prefix.end()..].to_string(),
        None => text.to_string(),
    }
}

/// Partitions rows by exact support text and orders the groups by the
/// smallest field order among their rows. Equal keys keep first-seen order.
pub fn group_actions(schema: &Schema, rows: Vec<Row>) -> Vec<ActionGroup> {
    let mut groups: Vec<ActionGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let support = schema.value(&row, Role::ActionSupport).to_string();
        match positions.get(&support) {
            Some(&idx) => groups[idx].rows.push(row),
            None => {
                positions.insert(support.clone(), groups.len());
                groups.push(ActionGroup {
                    support,
                    rows: vec![row],
                });
            }
        }
    }

    groups.sort_by_key(|group| min_field_order(schema, group));
    groups
}

pub fn min_field_order(schema: &Schema, group: &ActionGroup) -> u32 {
    group
        .rows
        .iter()
        .map(|row| field_order(schema, row))
        .min()
        .unwrap_or(UNORDERED)
}

/// The SOP link of a group, when its first row carries a real document.
pub fn how_to_link<'g>(schema: &Schema, group: &'g ActionGroup) -> Option<&'g str> {
    let raw = schema.value(group.first()?, Role::SopLink);
    let marker = raw.trim().to_uppercase();
    if marker.is_empty() || marker == NOT_APPLICABLE || marker == INFO_ONLY {
        return None;
    }
    Some(raw)
}

/// Rows of a confirmed group in maintenance order.
pub fn ordered_steps(schema: &Schema, group: &ActionGroup) -> Vec<String> {
    let mut rows: Vec<&Row> = group.rows.iter().collect();
    rows.sort_by_key(|row| field_order(schema, row));
    rows.into_iter().map(|row| step_label(schema, row)).collect()
}

pub fn spare_part(schema: &Schema, group: &ActionGroup) -> Option<String> {
    let spare = schema.value(group.first()?, Role::SparePart).trim();
    if spare.is_empty() || spare == NOT_APPLICABLE {
        None
    } else {
        Some(spare.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema {
            action_support: Some("support".to_string()),
            action_field: Some("field".to_string()),
            spare_part: Some("spare".to_string()),
            sop_link: Some("sop".to_string()),
            ..Schema::default()
        }
    }

    fn action(support: &str, field: &str) -> Row {
        Row::from_pairs([("support", support), ("field", field)])
    }

    fn supports(groups: &[ActionGroup]) -> Vec<&str> {
        groups.iter().map(|group| group.support.as_str()).collect()
    }

    #[test]
    fn field_order_reads_leading_digits_before_underscore() {
        let schema = schema();

        assert_eq!(field_order(&schema, &action("a", "12_Do it")), 12);
        assert_eq!(field_order(&schema, &action("a", "007_Agent")), 7);
        assert_eq!(field_order(&schema, &action("a", "Do it")), UNORDERED);
        assert_eq!(field_order(&schema, &action("a", "3 Do it")), UNORDERED);
        assert_eq!(field_order(&schema, &action("a", " 3_Do it")), UNORDERED);
        assert_eq!(
            field_order(&schema, &action("a", "99999999999999999999_Huge")),
            UNORDERED
        );
    }

    #[test]
    fn step_label_strips_only_the_order_prefix() {
        let schema = schema();

        assert_eq!(step_label(&schema, &action("a", "2_Replace_belt")), "Replace_belt");
        assert_eq!(step_label(&schema, &action("a", "Replace belt")), "Replace belt");
    }

    #[test]
    fn groups_are_ordered_by_smallest_field_order() {
        let schema = schema();
        let rows = vec![
            action("Late", "5_x"),
            action("Early", "3_y"),
            action("Late", "1_z"),
            action("Unordered", "no prefix"),
            action("Middle", "2_w"),
        ];

        let groups = group_actions(&schema, rows);

        assert_eq!(supports(&groups), vec!["Late", "Middle", "Early", "Unordered"]);
        assert_eq!(groups[0].rows.len(), 2);
        assert_eq!(schema.value(&groups[0].rows[0], Role::ActionField), "5_x");
    }

    #[test]
    fn equal_keys_keep_first_seen_group_first() {
        let schema = schema();
        let rows = vec![
            action("B", "plain"),
            action("A", "1_x"),
            action("C", "also plain"),
            action("D", "1_y"),
        ];

        let groups = group_actions(&schema, rows);

        assert_eq!(supports(&groups), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn how_to_ignores_sentinel_links() {
        let schema = schema();
        let group_with = |sop: &str| ActionGroup {
            support: "a".to_string(),
            rows: vec![Row::from_pairs([("support", "a"), ("sop", sop)])],
        };

        assert_eq!(how_to_link(&schema, &group_with("http://x")), Some("http://x"));
        assert_eq!(how_to_link(&schema, &group_with(" i ")), None);
        assert_eq!(how_to_link(&schema, &group_with("/")), None);
        assert_eq!(how_to_link(&schema, &group_with("  ")), None);
    }

    #[test]
    fn maintenance_steps_and_spare_part_come_from_the_group() {
        let schema = schema();
        let group = ActionGroup {
            support: "Check belt".to_string(),
            rows: vec![
                Row::from_pairs([("field", "2_Replace belt"), ("spare", " Belt-X ")]),
                Row::from_pairs([("field", "Clean up"), ("spare", "/")]),
                Row::from_pairs([("field", "1_Inspect belt"), ("spare", "/")]),
            ],
        };

        assert_eq!(
            ordered_steps(&schema, &group),
            vec!["Inspect belt", "Replace belt", "Clean up"]
        );
        assert_eq!(spare_part(&schema, &group), Some("Belt-X".to_string()));
    }

    #[test]
    fn spare_part_sentinel_is_hidden() {
        let schema = schema();
        let group = ActionGroup {
            support: "a".to_string(),
            rows: vec![Row::from_pairs([("spare", " / ")])],
        };

        assert_eq!(spare_part(&schema, &group), None);
    }
}
