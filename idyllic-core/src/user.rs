use std::{fmt, num::ParseIntError, str::FromStr};

use serde::Serialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::{CoreError, FieldErrors};

/// Identifier assigned to a user by the store.
///
/// Store-assigned IDs start at 1 and only grow. The inner type is signed so
/// that lookups for `0` or negative IDs are representable; they never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[non_exhaustive]
pub struct UserId(pub i64);

impl UserId {
    /// Returns the inner integer.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

/// A user record held by the [`UserStore`](crate::store::UserStore).
///
/// Records are immutable once created and live for as long as the store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name, never empty.
    pub name: String,
    /// Contact address. Not checked for uniqueness.
    pub email: String,
}

impl User {
    pub(crate) fn new(id: UserId, name: String, email: String) -> Self {
        Self { id, name, email }
    }
}

/// Body of `POST /users` as received on the wire.
///
/// Both fields are optional so that a missing field surfaces as a
/// field-level validation error instead of a parse error.
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "email is required"),
        email(message = "email must be a valid email address")
    )]
    pub email: Option<String>,
}

/// User input that has passed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Parse and validate a `POST /users` body.
    ///
    /// # Errors
    /// Returns [`CoreError::Validation`] listing every failing field. A field
    /// with the wrong JSON type reports only its type error.
    pub fn from_json_object(object: &Map<String, Value>) -> Result<Self, CoreError> {
        let (request, mut errors) = CreateUserRequest::from_json_object(object);
        match request.into_new_user() {
            Ok(new_user) if errors.is_empty() => Ok(new_user),
            Ok(_) => Err(CoreError::Validation(errors)),
            Err(CoreError::Validation(rule_errors)) => {
                errors.merge_absent(rule_errors);
                Err(CoreError::Validation(errors))
            }
            Err(other) => Err(other),
        }
    }
}

fn string_field(object: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.add(field, format!("{field} must be a string"));
            None
        }
    }
}

impl CreateUserRequest {
    /// Read `name` and `email` out of a JSON object.
    ///
    /// Absent and `null` fields stay `None` so that validation reports them
    /// as required. A field holding any other non-string value is left `None`
    /// and recorded in the returned [`FieldErrors`]. Unknown keys are ignored.
    #[must_use]
    pub fn from_json_object(object: &Map<String, Value>) -> (Self, FieldErrors) {
        let mut errors = FieldErrors::new();
        let request = Self {
            name: string_field(object, "name", &mut errors),
            email: string_field(object, "email", &mut errors),
        };
        (request, errors)
    }

    /// Run schema validation and produce a [`NewUser`].
    ///
    /// # Errors
    /// Returns [`CoreError::Validation`] listing every failing field.
    pub fn into_new_user(self) -> Result<NewUser, CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(errors.into()))?;

        match (self.name, self.email) {
            (Some(name), Some(email)) => Ok(NewUser { name, email }),
            (name, email) => {
                let mut errors = FieldErrors::new();
                if name.is_none() {
                    errors.add("name", "name is required");
                }
                if email.is_none() {
                    errors.add("email", "email is required");
                }
                Err(CoreError::Validation(errors))
            }
        }
    }
}
