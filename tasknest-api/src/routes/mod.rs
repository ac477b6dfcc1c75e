/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `info`: Route map for the API surface
/// - `auth`: Login and logout
/// - `profiles`: Profile registration and CRUD
/// - `tasks`: Task CRUD under a profile

pub mod auth;
pub mod health;
pub mod info;
pub mod profiles;
pub mod tasks;

/// Validation error for a request missing required fields
pub(crate) const MSG_FIELDS_MISSING: &str = "Some fields are missing";

/// Validation error for mismatched password/password2
pub(crate) const MSG_PASSWORDS_DONT_MATCH: &str = "Passwords don't match";

/// Login failure; deliberately does not say which half was wrong
pub(crate) const MSG_BAD_CREDENTIALS: &str = "Incorrect username/password combination.";

/// Not-found error for an unknown profile
pub(crate) const MSG_NO_PROFILE: &str = "The profile does not exist";

/// Not-found error for an unknown task or a task owned by someone else
pub(crate) const MSG_NO_TASK: &str = "The task does not exist";

/// Owner-check failure on task routes
pub(crate) const MSG_NO_ACCESS_DATA: &str = "You do not have permission to access this data.";

/// Owner-check failure on profile routes
pub(crate) const MSG_NO_ACCESS_PROFILE: &str =
    "You do not have permission to access this profile.";
