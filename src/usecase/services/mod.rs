pub mod action_groups;
pub mod dataset_index;
pub mod import_service;
pub mod schema_inference;
pub mod session;
pub mod view_model;
