use crate::domain::entities::schema::{Role, Schema};
use crate::domain::entities::selection::{ActionGroup, Selection};
use crate::usecase::services::action_groups::{how_to_link, ordered_steps, spare_part};
use crate::usecase::services::dataset_index::{DatasetIndex, SymptomEntry};

pub const CATEGORY_PLACEHOLDER: &str = "-- Choose category --";
pub const SUB_ISSUE_PLACEHOLDER: &str = "-- Choose sub-issue --";
pub const SYMPTOM_PLACEHOLDER: &str = "-- Choose symptom --";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    pub placeholder: &'static str,
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
}

impl SelectView {
    #[allow(dead_code)]
    pub fn values(&self) -> Vec<&str> {
        self.options.iter().map(|opt| opt.value.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCard {
    pub support: String,
    pub how_to: Option<String>,
}

impl ActionCard {
    #[allow(dead_code)]
    pub fn how_to_eligible(&self) -> bool {
        self.how_to.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceView {
    pub sub_issue: String,
    pub symptom_label: String,
    pub steps: Vec<String>,
    pub spare_part: Option<String>,
}

impl MaintenanceView {
    /// Every checkbox line: the steps, then the spare part when one is needed.
    #[allow(dead_code)]
    pub fn checklist(&self) -> Vec<&str> {
        self.steps
            .iter()
            .map(String::as_str)
            .chain(self.spare_part.as_deref())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub categories: SelectView,
    pub sub_issues: SelectView,
    pub symptoms: SelectView,
    pub search_text: String,
    /// `None` until a symptom is chosen.
    pub actions: Option<Vec<ActionCard>>,
    pub maintenance: Option<MaintenanceView>,
}

fn plain_options(values: Vec<String>) -> Vec<SelectOption> {
    values
        .into_iter()
        .map(|value| SelectOption {
            label: value.clone(),
            value,
        })
        .collect()
}

pub fn symptom_label(id: &str, description: &str) -> String {
    format!("{id} — {description}")
}

pub fn build_category_select(index: &DatasetIndex, selection: &Selection) -> SelectView {
    SelectView {
        placeholder: CATEGORY_PLACEHOLDER,
        options: plain_options(index.distinct_categories()),
        selected: selection.category.clone(),
    }
}

pub fn build_sub_issue_select(index: &DatasetIndex, selection: &Selection) -> SelectView {
    SelectView {
        placeholder: SUB_ISSUE_PLACEHOLDER,
        options: plain_options(index.distinct_sub_issues(selection.category.as_deref())),
        selected: selection.sub_issue.clone(),
    }
}

pub fn build_symptom_select(
    index: &DatasetIndex,
    selection: &Selection,
    search_text: &str,
) -> SelectView {
    let options = index
        .distinct_symptoms(
            selection.category.as_deref(),
            selection.sub_issue.as_deref(),
            search_text,
        )
        .into_iter()
        .map(|SymptomEntry { id, description }| SelectOption {
            label: symptom_label(&id, &description),
            value: id,
        })
        .collect();

    SelectView {
        placeholder: SYMPTOM_PLACEHOLDER,
        options,
        selected: selection.symptom_id.clone(),
    }
}

pub fn build_action_cards(schema: &Schema, groups: &[ActionGroup]) -> Vec<ActionCard> {
    groups
        .iter()
        .map(|group| ActionCard {
            support: group.support.clone(),
            how_to: how_to_link(schema, group).map(str::to_string),
        })
        .collect()
}

/// Checklist for a confirmed group. The symptom label comes from the
/// group's first row rather than from the selection.
pub fn build_maintenance(schema: &Schema, group: &ActionGroup) -> Option<MaintenanceView> {
    let base = group.first()?;
    Some(MaintenanceView {
        sub_issue: schema.value(base, Role::SubIssue).to_string(),
        symptom_label: symptom_label(
            schema.value(base, Role::SymptomId),
            schema.value(base, Role::SymptomDesc),
        ),
        steps: ordered_steps(schema, group),
        spare_part: spare_part(schema, group),
    })
}
