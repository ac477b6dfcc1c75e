/// Task model and database operations
///
/// This module provides the Task model representing a to-do item owned by
/// a profile. A task belongs to exactly one profile for its entire
/// lifetime; there is no reassignment.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     note TEXT,
///     creation_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     due_date TIMESTAMPTZ,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     profile_id BIGINT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasknest_shared::models::task::{Task, CreateTask};
/// use tasknest_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     name: "Water the plants".to_string(),
///     note: Some("The ficus looks thirsty".to_string()),
///     due_date: None,
///     completed: false,
///     profile_id: 1,
/// }).await?;
///
/// let mine = Task::list_by_profile(&pool, task.profile_id).await?;
/// assert_eq!(mine.len(), 1);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::format_timestamp;

/// Task model representing one to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Surrogate key
    pub id: i64,

    /// Short description of the task (non-empty)
    pub name: String,

    /// Optional free-text note
    pub note: Option<String>,

    /// When the task was created (set server-side, immutable)
    pub creation_date: DateTime<Utc>,

    /// Optional deadline
    pub due_date: Option<DateTime<Utc>>,

    /// Whether the task has been completed
    pub completed: bool,

    /// Owning profile
    pub profile_id: i64,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Short description of the task
    pub name: String,

    /// Optional free-text note
    pub note: Option<String>,

    /// Optional deadline
    pub due_date: Option<DateTime<Utc>>,

    /// Initial completion state
    pub completed: bool,

    /// Owning profile
    pub profile_id: i64,
}

/// Patch for updating an existing task
///
/// Each field is independently absent or present:
/// - `None` leaves the column untouched
/// - `due_date: Some(None)` clears the deadline
///
/// `creation_date` and `profile_id` are immutable and have no patch field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New name
    pub name: Option<String>,

    /// New note
    pub note: Option<String>,

    /// New deadline (Some(None) clears it)
    pub due_date: Option<Option<DateTime<Utc>>>,

    /// New completion state
    pub completed: Option<bool>,
}

/// Task attributes as serialized in API responses
///
/// Timestamps are rendered in the API's wire format; an absent due date
/// serializes as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskView {
    pub id: i64,
    pub name: String,
    pub note: Option<String>,
    pub creation_date: String,
    pub due_date: Option<String>,
    pub completed: bool,
    pub profile_id: i64,
}

impl Task {
    /// Creates a new task in the database
    ///
    /// `creation_date` is set by the database at insert time.
    ///
    /// # Errors
    ///
    /// Returns an error if the owning profile does not exist (foreign key
    /// violation) or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (name, note, due_date, completed, profile_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, note, creation_date, due_date, completed, profile_id
            "#,
        )
        .bind(data.name)
        .bind(data.note)
        .bind(data.due_date)
        .bind(data.completed)
        .bind(data.profile_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, note, creation_date, due_date, completed, profile_id
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a profile, oldest first
    pub async fn list_by_profile(
        pool: &PgPool,
        profile_id: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, name, note, creation_date, due_date, completed, profile_id
            FROM tasks
            WHERE profile_id = $1
            ORDER BY id
            "#,
        )
        .bind(profile_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Applies a patch to an existing task
    ///
    /// Only fields present in the patch are written; `creation_date` and
    /// `profile_id` never change.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        patch: TaskPatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tasks SET id = id");
        let mut bind_count = 1;

        if patch.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if patch.note.is_some() {
            bind_count += 1;
            query.push_str(&format!(", note = ${}", bind_count));
        }
        if patch.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }
        if patch.completed.is_some() {
            bind_count += 1;
            query.push_str(&format!(", completed = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, name, note, creation_date, due_date, completed, profile_id",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(name) = patch.name {
            q = q.bind(name);
        }
        if let Some(note) = patch.note {
            q = q.bind(note);
        }
        if let Some(due_date) = patch.due_date {
            q = q.bind(due_date);
        }
        if let Some(completed) = patch.completed {
            q = q.bind(completed);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task by ID
    ///
    /// # Returns
    ///
    /// True if the task was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Builds the response representation of this task
    pub fn to_view(&self) -> TaskView {
        TaskView {
            id: self.id,
            name: self.name.clone(),
            note: self.note.clone(),
            creation_date: format_timestamp(self.creation_date),
            due_date: self.due_date.map(format_timestamp),
            completed: self.completed,
            profile_id: self.profile_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_task() -> Task {
        Task {
            id: 42,
            name: "Feed the cat".to_string(),
            note: Some("Wet food only".to_string()),
            creation_date: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
            due_date: Some(Utc.with_ymd_and_hms(2025, 6, 2, 18, 0, 0).unwrap()),
            completed: false,
            profile_id: 7,
        }
    }

    #[test]
    fn test_view_formats_dates() {
        let json = serde_json::to_value(sample_task().to_view()).expect("Should serialize");

        assert_eq!(json["id"], 42);
        assert_eq!(json["name"], "Feed the cat");
        assert_eq!(json["note"], "Wet food only");
        assert_eq!(json["creation_date"], "01/06/2025 08:00:00");
        assert_eq!(json["due_date"], "02/06/2025 18:00:00");
        assert_eq!(json["completed"], false);
        assert_eq!(json["profile_id"], 7);
    }

    #[test]
    fn test_view_null_due_date() {
        let mut task = sample_task();
        task.due_date = None;
        task.note = None;

        let json = serde_json::to_value(task.to_view()).expect("Should serialize");
        assert!(json["due_date"].is_null());
        assert!(json["note"].is_null());
    }

    #[test]
    fn test_patch_default_touches_nothing() {
        let patch = TaskPatch::default();
        assert!(patch.name.is_none());
        assert!(patch.note.is_none());
        assert!(patch.due_date.is_none());
        assert!(patch.completed.is_none());
    }

    #[test]
    fn test_patch_can_clear_due_date() {
        let patch = TaskPatch {
            due_date: Some(None),
            ..Default::default()
        };
        assert_eq!(patch.due_date, Some(None));
    }
}
