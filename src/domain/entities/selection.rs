use thiserror::Error;

use crate::domain::entities::row::Row;

/// Rows of one symptom that share the same support action text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionGroup {
    pub support: String,
    pub rows: Vec<Row>,
}

impl ActionGroup {
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub category: Option<String>,
    pub sub_issue: Option<String>,
    pub symptom_id: Option<String>,
    pub confirmed_group: Option<ActionGroup>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStage {
    NoCategory,
    CategoryOnly,
    CategoryAndSubIssue,
    SymptomChosen,
    ActionConfirmed,
}

impl Selection {
    #[allow(dead_code)]
    pub fn stage(&self) -> SelectionStage {
        if self.confirmed_group.is_some() {
            SelectionStage::ActionConfirmed
        } else if self.symptom_id.is_some() {
            SelectionStage::SymptomChosen
        } else if self.sub_issue.is_some() {
            SelectionStage::CategoryAndSubIssue
        } else if self.category.is_some() {
            SelectionStage::CategoryOnly
        } else {
            SelectionStage::NoCategory
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("no symptom is selected")]
    NoSymptom,

    #[error("support action `{0}` is not offered for the selected symptom")]
    UnknownGroup(String),
}
