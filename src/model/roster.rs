use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::punch::parse_employee_id;

/// A user record as stored on the terminal.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawUser {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
}

/// Known employees, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeRoster {
    names: BTreeMap<u32, String>,
}

impl EmployeeRoster {
    pub fn from_users(users: &[RawUser]) -> Self {
        let mut names = BTreeMap::new();
        for user in users {
            match parse_employee_id(&user.user_id) {
                Some(id) => {
                    names.insert(id, user.name.trim().to_string());
                }
                None => {
                    tracing::warn!(user_id = %user.user_id, "Skipping terminal user with non-numeric id");
                }
            }
        }
        Self { names }
    }

    pub fn name(&self, employee_id: u32) -> Option<&str> {
        self.names.get(&employee_id).map(String::as_str)
    }

    pub fn ids(&self) -> Vec<u32> {
        self.names.keys().copied().collect()
    }
}

impl FromIterator<(u32, String)> for EmployeeRoster {
    fn from_iter<T: IntoIterator<Item = (u32, String)>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
