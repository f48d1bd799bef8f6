use crate::domain::entities::row::Row;

/// Semantic role a column can play in the diagnostic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Category,
    SubIssue,
    SymptomId,
    SymptomDesc,
    ActionSupport,
    ActionField,
    SparePart,
    SopLink,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Category,
        Role::SubIssue,
        Role::SymptomId,
        Role::SymptomDesc,
        Role::ActionSupport,
        Role::ActionField,
        Role::SparePart,
        Role::SopLink,
    ];

    /// Lower-case substring that marks a column for this role. Symptom roles
    /// are detected from sample values instead and have no keyword.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Role::Category => Some("category"),
            Role::SubIssue => Some("sub"),
            Role::ActionSupport => Some("support"),
            Role::ActionField => Some("actions for field"),
            Role::SparePart => Some("spare"),
            Role::SopLink => Some("sop"),
            Role::SymptomId | Role::SymptomDesc => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub category: Option<String>,
    pub sub_issue: Option<String>,
    pub symptom_id: Option<String>,
    pub symptom_desc: Option<String>,
    pub action_support: Option<String>,
    pub action_field: Option<String>,
    pub spare_part: Option<String>,
    pub sop_link: Option<String>,
}

impl Schema {
    pub fn column(&self, role: Role) -> Option<&str> {
        let column = match role {
            Role::Category => &self.category,
            Role::SubIssue => &self.sub_issue,
            Role::SymptomId => &self.symptom_id,
            Role::SymptomDesc => &self.symptom_desc,
            Role::ActionSupport => &self.action_support,
            Role::ActionField => &self.action_field,
            Role::SparePart => &self.spare_part,
            Role::SopLink => &self.sop_link,
        };
        column.as_deref()
    }

    pub fn set_column(&mut self, role: Role, column: Option<String>) {
        let slot = match role {
            Role::Category => &mut self.category,
            Role::SubIssue => &mut self.sub_issue,
            Role::SymptomId => &mut self.symptom_id,
            Role::SymptomDesc => &mut self.symptom_desc,
            Role::ActionSupport => &mut self.action_support,
            Role::ActionField => &mut self.action_field,
            Role::SparePart => &mut self.spare_part,
            Role::SopLink => &mut self.sop_link,
        };
        *slot = column;
    }

    /// Cell for `role`, or "" when the role was not detected or the row
    /// lacks the column.
    pub fn value<'r>(&self, row: &'r Row, role: Role) -> &'r str {
        self.column(role)
            .and_then(|column| row.get(column))
            .unwrap_or("")
    }

    pub fn missing_roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| self.column(*role).is_none())
            .collect()
    }
}
