use serde::{Deserialize, Serialize};

use super::distinct;

/// Identity returned at login: the user and the groups granting access.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationData {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Permission bundle: enabled modules, analysis profiles and termbases.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_check_term_module_enabled: Option<bool>,
    #[serde(default)]
    pub analysis_profile_ids: Option<Vec<i32>>,
    #[serde(default)]
    pub termbases: Vec<GroupTermbase>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupTermbase {
    pub termbase_id: i32,
    #[serde(default)]
    pub is_enabled: Option<bool>,
}

impl AuthenticationData {
    /// Ids of termbases enabled in any group, without duplicates, in the
    /// order they first appear. A missing `isEnabled` counts as disabled.
    pub fn enabled_termbase_ids(&self) -> Vec<i32> {
        distinct(
            self.groups
                .iter()
                .flat_map(|g| g.termbases.iter())
                .filter(|tb| tb.is_enabled == Some(true))
                .map(|tb| tb.termbase_id),
        )
    }

    /// Ids of analysis profiles available through any group.
    pub fn analysis_profile_ids(&self) -> Vec<i32> {
        distinct(
            self.groups
                .iter()
                .flat_map(|g| g.analysis_profile_ids.iter().flatten().copied()),
        )
    }

    /// True if at least one group enables the CheckTerm module.
    pub fn is_check_term_enabled(&self) -> bool {
        self.groups
            .iter()
            .any(|g| g.is_check_term_module_enabled == Some(true))
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub authentication_data: AuthenticationData,
}
