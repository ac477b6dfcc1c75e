/// Profile model and database operations
///
/// This module provides the Profile model representing a user account.
/// Each profile owns zero or more tasks; deleting a profile cascades to
/// its tasks at the schema level.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE profiles (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     email VARCHAR(255) NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     date_joined TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Username uniqueness is checked by the register handler before insert;
/// the UNIQUE constraint is a backstop against concurrent registrations.
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::profile::{Profile, CreateProfile};
/// use tasknest_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let profile = Profile::create(&pool, CreateProfile {
///     username: "nhuntwalker".to_string(),
///     email: "nhunt@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let found = Profile::find_by_username(&pool, "nhuntwalker").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::format_timestamp;

/// Profile model representing a user account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    /// Surrogate key
    pub id: i64,

    /// Unique login name; also the identity carried by the session cookie
    pub username: String,

    /// Contact email address
    pub email: String,

    /// Argon2id password hash
    ///
    /// Never store plaintext passwords!
    pub password_hash: String,

    /// When the account was created (set server-side)
    pub date_joined: DateTime<Utc>,
}

/// Input for creating a new profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfile {
    /// Login name (must not already exist)
    pub username: String,

    /// Contact email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,
}

/// Input for updating an existing profile
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New login name
    pub username: Option<String>,

    /// New email address
    pub email: Option<String>,

    /// New password hash
    pub password_hash: Option<String>,
}

/// Profile attributes as serialized in API responses
///
/// The password hash is deliberately absent, and timestamps are rendered
/// in the API's wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub date_joined: String,
    pub tasks: Vec<crate::models::task::TaskView>,
}

impl Profile {
    /// Creates a new profile in the database
    ///
    /// # Returns
    ///
    /// The newly created profile with generated ID and join timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username already exists (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateProfile) -> Result<Self, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, date_joined
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by its login name
    ///
    /// # Returns
    ///
    /// The profile if found, None otherwise
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, username, email, password_hash, date_joined
            FROM profiles
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Finds a profile by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, username, email, password_hash, date_joined
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Updates an existing profile
    ///
    /// Only non-None fields in `data` will be updated.
    ///
    /// # Returns
    ///
    /// The updated profile if found, None if the profile doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The new username already exists for another profile
    /// - Database connection fails
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateProfile,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE profiles SET id = id");
        let mut bind_count = 1;

        if data.username.is_some() {
            bind_count += 1;
            query.push_str(&format!(", username = ${}", bind_count));
        }
        if data.email.is_some() {
            bind_count += 1;
            query.push_str(&format!(", email = ${}", bind_count));
        }
        if data.password_hash.is_some() {
            bind_count += 1;
            query.push_str(&format!(", password_hash = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, username, email, password_hash, date_joined",
        );

        let mut q = sqlx::query_as::<_, Profile>(&query).bind(id);

        if let Some(username) = data.username {
            q = q.bind(username);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(password_hash) = data.password_hash {
            q = q.bind(password_hash);
        }

        let profile = q.fetch_optional(pool).await?;

        Ok(profile)
    }

    /// Deletes a profile by ID
    ///
    /// The profile's tasks are removed with it via `ON DELETE CASCADE`.
    ///
    /// # Returns
    ///
    /// True if the profile was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Builds the response representation of this profile
    ///
    /// Callers supply the task list so the model layer stays free of
    /// relationship back-references; tasks are looked up by foreign key.
    pub fn to_view(&self, tasks: Vec<crate::models::task::TaskView>) -> ProfileView {
        ProfileView {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            date_joined: format_timestamp(self.date_joined),
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_profile() -> Profile {
        Profile {
            id: 7,
            username: "nhuntwalker".to_string(),
            email: "nhunt@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=65536,t=3,p=4$abc$def".to_string(),
            date_joined: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    #[test]
    fn test_view_excludes_password_hash() {
        let view = sample_profile().to_view(vec![]);
        let json = serde_json::to_value(&view).expect("Should serialize");

        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "nhuntwalker");
        assert_eq!(json["email"], "nhunt@example.com");
        assert_eq!(json["date_joined"], "14/03/2025 09:26:53");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_view_includes_task_list() {
        let view = sample_profile().to_view(vec![]);
        let json = serde_json::to_value(&view).expect("Should serialize");
        assert!(json["tasks"].as_array().expect("tasks array").is_empty());
    }

    #[test]
    fn test_update_profile_default_is_empty() {
        let update = UpdateProfile::default();
        assert!(update.username.is_none());
        assert!(update.email.is_none());
        assert!(update.password_hash.is_none());
    }
}
