//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{
    activity_logs, breathing_categories, breathing_sessions, breathing_techniques, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
}

// ---------------------------------------------------------------------------
// Catalog models
// ---------------------------------------------------------------------------

/// Row struct for reading from the breathing_categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = breathing_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub name: Option<String>,
    pub display_name: String,
    pub description: Option<String>,
    pub position: Option<i32>,
}

/// Row struct for reading from the breathing_techniques table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = breathing_techniques)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TechniqueRow {
    pub id: i32,
    pub category_id: i32,
    pub display_name: String,
    pub inhale_seconds: i32,
    pub hold_after_inhale_seconds: i32,
    pub exhale_seconds: i32,
    pub hold_after_exhale_seconds: i32,
    pub recommended_minutes: i32,
    pub posture: String,
    pub breath_origin: String,
    pub instructions: String,
    pub sound_cue_default: bool,
    pub haptic_cue_default: bool,
}

// ---------------------------------------------------------------------------
// Breathing session models
// ---------------------------------------------------------------------------

/// Row struct for reading from the breathing_sessions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = breathing_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BreathingSessionRow {
    pub id: i32,
    pub user_id: Uuid,
    pub technique_id: i32,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    #[expect(dead_code, reason = "derived column; the domain recomputes it")]
    pub duration_seconds: Option<i32>,
    pub completed: bool,
    pub cycles_completed: Option<i32>,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
}

/// Insertable struct for creating new session records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = breathing_sessions)]
pub(crate) struct NewBreathingSessionRow {
    pub user_id: Uuid,
    pub technique_id: i32,
    pub started_at: DateTime<Utc>,
    pub completed: bool,
    pub cycles_completed: Option<i32>,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
}

/// Changeset struct for saving session state.
///
/// `duration_seconds` always carries the freshly derived value so the stored
/// column never drifts from the timestamps.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = breathing_sessions)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BreathingSessionUpdate {
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i32>,
    pub completed: bool,
    pub cycles_completed: Option<i32>,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
}

// ---------------------------------------------------------------------------
// Activity log models
// ---------------------------------------------------------------------------

/// Insertable struct for appending activity log records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activity_logs)]
pub(crate) struct NewActivityLogRow<'a> {
    pub user_id: Uuid,
    pub activity_type: &'a str,
    pub logged_at: DateTime<Utc>,
}
