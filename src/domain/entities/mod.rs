pub mod row;
pub mod schema;
pub mod selection;
