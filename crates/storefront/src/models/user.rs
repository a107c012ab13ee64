//! User account records.

use serde::{Deserialize, Serialize};

use clementine_core::{Email, UserId};

/// A user account.
///
/// The storefront only stores the account record; credential verification
/// is an external collaborator. The password field holds whatever opaque
/// value that collaborator writes (the seed data uses plain fixtures).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Unique across all users.
    pub username: String,
    pub password: String,
    /// Unique across all users.
    pub email: Email,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Fields for creating a [`User`]; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Email,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl NewUser {
    /// Attach a freshly assigned id, producing the stored record.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            city: self.city,
            country: self.country,
            zip_code: self.zip_code,
            is_admin: self.is_admin,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_names_are_camel_case() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "user1",
            "password": "password123",
            "email": "user1@example.com",
            "firstName": "John",
            "lastName": "Doe",
            "zipCode": "12345",
            "isAdmin": false
        }))
        .unwrap();

        assert_eq!(user.first_name.as_deref(), Some("John"));
        assert_eq!(user.zip_code.as_deref(), Some("12345"));
        assert!(!user.is_admin);
        assert_eq!(user.country, None);
    }
}
