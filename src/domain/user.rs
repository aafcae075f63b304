//! The authenticated caller. Credential management (registration, login,
//! password storage) lives outside this service; callers present an API token
//! that is resolved against the user store.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Opaque bearer token identifying this user on API calls.
    #[serde(skip_serializing)]
    pub api_token: String,
}

impl User {
    /// Donor display name used for the gateway snapshot; blank names fall
    /// back the same way the public donation wall does.
    pub fn donor_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            "Anonymous"
        } else {
            &self.full_name
        }
    }
}
