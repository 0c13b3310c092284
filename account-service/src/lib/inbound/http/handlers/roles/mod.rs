use serde::Serialize;

use crate::domain::role::models::Role;

pub mod create_role;
pub mod delete_role;
pub mod get_role;
pub mod update_role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleResponseData {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Role> for RoleResponseData {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.as_str().to_string(),
            description: role.description.clone(),
        }
    }
}
