use tracing::{debug, warn};

use crate::domain::entities::selection::{
    ActionGroup, Selection, SelectionStage, TransitionError,
};
use crate::usecase::services::action_groups::group_actions;
use crate::usecase::services::dataset_index::DatasetIndex;
use crate::usecase::services::view_model::{
    build_action_cards, build_category_select, build_maintenance, build_sub_issue_select,
    build_symptom_select, SessionView,
};

/// Select value that stands for "no category filter".
const ALL_CATEGORIES: &str = "all";

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// One user's walk through the decision tree over a loaded dataset.
///
/// Owns the selection exclusively; every transition replaces the downstream
/// choices so a changed category or sub-issue never leaves a stale symptom
/// or confirmed group behind.
#[derive(Debug, Clone)]
pub struct Session {
    index: DatasetIndex,
    selection: Selection,
    search_text: String,
    groups: Vec<ActionGroup>,
}

impl Session {
    pub fn new(index: DatasetIndex) -> Self {
        Self {
            index,
            selection: Selection::default(),
            search_text: String::new(),
            groups: Vec::new(),
        }
    }

    pub fn index(&self) -> &DatasetIndex {
        &self.index
    }

    #[allow(dead_code)]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[allow(dead_code)]
    pub fn stage(&self) -> SelectionStage {
        self.selection.stage()
    }

    #[allow(dead_code)]
    pub fn groups(&self) -> &[ActionGroup] {
        &self.groups
    }

    #[allow(dead_code)]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn choose_category(&mut self, category: &str) -> SessionView {
        let category = non_empty(category).filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES));
        debug!(?category, "category chosen");
        self.selection = Selection {
            category,
            ..Selection::default()
        };
        self.groups.clear();
        self.view()
    }

    pub fn choose_sub_issue(&mut self, sub_issue: &str) -> SessionView {
        let sub_issue = non_empty(sub_issue);
        debug!(?sub_issue, "sub-issue chosen");
        self.selection = Selection {
            category: self.selection.category.take(),
            sub_issue,
            ..Selection::default()
        };
        self.groups.clear();
        self.view()
    }

    pub fn skip_sub_issue(&mut self) -> SessionView {
        self.choose_sub_issue("")
    }

    /// Re-filters the symptom list; the current symptom stays selected.
    pub fn search_symptoms(&mut self, text: &str) -> SessionView {
        self.search_text = text.to_string();
        self.view()
    }

    pub fn choose_symptom(&mut self, symptom_id: &str) -> SessionView {
        self.selection.confirmed_group = None;
        self.selection.symptom_id = non_empty(symptom_id);
        self.groups = match self.selection.symptom_id.as_deref() {
            Some(id) => {
                let rows = self.index.action_rows_for_symptom(
                    id,
                    self.selection.category.as_deref(),
                    self.selection.sub_issue.as_deref(),
                );
                group_actions(self.index.schema(), rows)
            }
            None => Vec::new(),
        };
        debug!(
            symptom = ?self.selection.symptom_id,
            groups = self.groups.len(),
            "symptom chosen"
        );
        self.view()
    }

    /// Confirms the group whose support text is `support`. Only groups
    /// offered for the current symptom are accepted; confirming another
    /// offered group replaces the previous confirmation.
    pub fn confirm_group(&mut self, support: &str) -> Result<SessionView, TransitionError> {
        if self.selection.symptom_id.is_none() {
            warn!(support, "confirmation without a selected symptom");
            return Err(TransitionError::NoSymptom);
        }
        let Some(group) = self.groups.iter().find(|group| group.support == support) else {
            warn!(support, "confirmation of an unknown support action");
            return Err(TransitionError::UnknownGroup(support.to_string()));
        };
        debug!(support, rows = group.rows.len(), "support action confirmed");
        self.selection.confirmed_group = Some(group.clone());
        Ok(self.view())
    }

    pub fn view(&self) -> SessionView {
        let schema = self.index.schema();
        SessionView {
            categories: build_category_select(&self.index, &self.selection),
            sub_issues: build_sub_issue_select(&self.index, &self.selection),
            symptoms: build_symptom_select(&self.index, &self.selection, &self.search_text),
            search_text: self.search_text.clone(),
            actions: self
                .selection
                .symptom_id
                .as_ref()
                .map(|_| build_action_cards(schema, &self.groups)),
            maintenance: self
                .selection
                .confirmed_group
                .as_ref()
                .and_then(|group| build_maintenance(schema, group)),
        }
    }
}
