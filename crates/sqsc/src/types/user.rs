//! Account records

use serde::{Deserialize, Serialize};

/// The account a token belongs to, as returned by `GET /me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account UUID
    #[serde(rename = "uid", default)]
    pub uuid: String,
    /// Login email
    #[serde(default)]
    pub email: String,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    /// Display name
    #[serde(rename = "name", default)]
    pub full_name: String,
    /// Whether the account has admin rights
    #[serde(default)]
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_me() {
        let user: User = serde_json::from_str(
            r#"{"uid":"f2d4","email":"jane@example.com","first_name":"Jane","last_name":"Doe","name":"Jane Doe","is_admin":false}"#,
        )
        .unwrap();

        assert_eq!(user.uuid, "f2d4");
        assert_eq!(user.full_name, "Jane Doe");
        assert!(!user.is_admin);
    }
}
