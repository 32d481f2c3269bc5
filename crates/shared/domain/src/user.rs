//! User domain entity and related types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    user_key, FIELD_AGE, FIELD_CITY, FIELD_ID, FIELD_NAME, MSG_INVALID_USER_ID, MSG_NO_USER_FOUND,
};
use crate::error::{DomainError, DomainResult};

/// User domain entity.
///
/// A user with `id <= 0` has not been persisted yet; the store assigns ids
/// starting at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub city: String,
}

impl User {
    /// Create an unpersisted user
    pub fn new(name: impl Into<String>, age: i64, city: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            age,
            city: city.into(),
        }
    }

    /// Check if the user carries a store-assigned id
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    /// Store key of this user
    pub fn key(&self) -> String {
        user_key(self.id)
    }

    /// Encode as the hash fields written to the store.
    pub fn to_fields(&self) -> HashMap<String, String> {
        HashMap::from([
            (FIELD_ID.to_string(), self.id.to_string()),
            (FIELD_NAME.to_string(), self.name.clone()),
            (FIELD_AGE.to_string(), self.age.to_string()),
            (FIELD_CITY.to_string(), self.city.clone()),
        ])
    }

    /// Decode a stored hash.
    ///
    /// An empty hash is an absent record (`NotFound`). Otherwise all four
    /// fields must be present and `id`/`age` must be integers. Unknown fields
    /// are ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> DomainResult<Self> {
        if fields.is_empty() {
            return Err(DomainError::not_found(MSG_NO_USER_FOUND));
        }
        Ok(Self {
            id: int_field(fields, FIELD_ID)?,
            name: str_field(fields, FIELD_NAME)?.to_string(),
            age: int_field(fields, FIELD_AGE)?,
            city: str_field(fields, FIELD_CITY)?.to_string(),
        })
    }
}

fn str_field<'a>(fields: &'a HashMap<String, String>, name: &str) -> DomainResult<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| DomainError::decoding(format!("missing field `{}`", name)))
}

fn int_field(fields: &HashMap<String, String>, name: &str) -> DomainResult<i64> {
    let raw = str_field(fields, name)?;
    raw.parse().map_err(|_| {
        DomainError::decoding(format!("field `{}` is not an integer: {:?}", name, raw))
    })
}

/// Parse a client-supplied user id.
pub fn parse_user_id(raw: &str) -> DomainResult<i64> {
    raw.parse()
        .map_err(|_| DomainError::validation(MSG_INVALID_USER_ID))
}

/// Create-or-update request body.
///
/// Every field is optional; missing fields take their zero value. An absent
/// or non-positive `id` asks for a new record.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserPayload {
    /// Existing user id (omit to create)
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: Option<i64>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "John"))]
    pub name: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = 31))]
    pub age: i64,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "New York"))]
    pub city: String,
}

impl UserPayload {
    /// Whether the request targets an existing record
    pub fn is_update(&self) -> bool {
        self.id.is_some_and(|id| id > 0)
    }
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        Self {
            id: payload.id.unwrap_or_default(),
            name: payload.name,
            age: payload.age,
            city: payload.city,
        }
    }
}

/// Single user response (`GET /user/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub city: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            city: user.city,
        }
    }
}

/// User list entry (`GET /users`), serialized with capitalized keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct UserSummary {
    #[serde(rename = "ID")]
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub city: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            city: user.city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_fields_round_trip() {
        let user = User {
            id: 7,
            name: "John".to_string(),
            age: 31,
            city: "New York".to_string(),
        };

        let fields = user.to_fields();
        assert_eq!(fields.get("age").map(String::as_str), Some("31"));
        assert_eq!(User::from_fields(&fields).unwrap(), user);
    }

    #[test]
    fn test_from_fields_missing_field() {
        let fields = stored(&[("id", "1"), ("name", "John"), ("age", "31")]);
        let err = User::from_fields(&fields).unwrap_err();
        assert_eq!(err, DomainError::decoding("missing field `city`"));
    }

    #[test]
    fn test_from_fields_empty_hash_is_not_found() {
        let err = User::from_fields(&HashMap::new()).unwrap_err();
        assert_eq!(err, DomainError::not_found("no user found"));
    }

    #[test]
    fn test_from_fields_malformed_integer() {
        let fields = stored(&[("id", "1"), ("name", "John"), ("age", "old"), ("city", "Oslo")]);
        assert!(matches!(
            User::from_fields(&fields),
            Err(DomainError::Decoding(_))
        ));
    }

    #[test]
    fn test_from_fields_ignores_unknown_fields() {
        let fields = stored(&[
            ("id", "2"),
            ("name", "Doe"),
            ("age", "22"),
            ("city", "Vancouver"),
            ("nickname", "D"),
        ]);
        let user = User::from_fields(&fields).unwrap();
        assert_eq!(user.name, "Doe");
    }

    #[test]
    fn test_key_and_persisted() {
        let mut user = User::new("John", 31, "New York");
        assert!(!user.is_persisted());
        user.id = 12;
        assert!(user.is_persisted());
        assert_eq!(user.key(), "user:12");
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("124"), Ok(124));
        assert_eq!(
            parse_user_id("abc"),
            Err(DomainError::validation("invalid userID"))
        );
        assert!(parse_user_id("99999999999999999999").is_err());
    }

    #[test]
    fn test_payload_defaults_and_update_flag() {
        let payload: UserPayload =
            serde_json::from_str(r#"{"name":"John","age":31,"city":"New York"}"#).unwrap();
        assert!(!payload.is_update());
        assert_eq!(User::from(payload).id, 0);

        let payload: UserPayload = serde_json::from_str(r#"{"id":3}"#).unwrap();
        assert!(payload.is_update());
        assert_eq!(payload.name, "");

        let payload: UserPayload = serde_json::from_str(r#"{"id":-4}"#).unwrap();
        assert!(!payload.is_update());
    }

    #[test]
    fn test_response_shapes() {
        let user = User {
            id: 1,
            name: "John".to_string(),
            age: 31,
            city: "New York".to_string(),
        };

        let single = serde_json::to_string(&UserResponse::from(user.clone())).unwrap();
        assert_eq!(single, r#"{"id":1,"name":"John","age":31,"city":"New York"}"#);

        let summary = serde_json::to_string(&UserSummary::from(user)).unwrap();
        assert_eq!(summary, r#"{"ID":1,"Name":"John","Age":31,"City":"New York"}"#);
    }
}
