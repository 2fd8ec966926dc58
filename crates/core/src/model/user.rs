use serde::{Deserialize, Serialize};

use crate::model::UserId;

/// Role attached to a user profile.
///
/// `Admin` unlocks the moderation surface; everyone else is a `Member`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    #[serde(rename = "user")]
    Member,
    Admin,
}

/// Profile of an authenticated user, cached from the auth provider.
///
/// The record is read-only on this side: it is created at signup by the
/// provider and replaced wholesale whenever the session is refreshed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub role: UserRole,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            profile_photo: None,
            role: UserRole::Member,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
