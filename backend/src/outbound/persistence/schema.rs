//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// User accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique display name chosen at first login (max 32 characters).
        display_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Breathing technique categories (reference data).
    breathing_categories (id) {
        id -> Int4,
        /// Internal English name.
        name -> Nullable<Varchar>,
        /// Localized name shown to users.
        display_name -> Varchar,
        description -> Nullable<Text>,
        /// Present in the reference data; listings order by `id`.
        position -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Breathing techniques (reference data).
    breathing_techniques (id) {
        id -> Int4,
        category_id -> Int4,
        display_name -> Varchar,
        inhale_seconds -> Int4,
        hold_after_inhale_seconds -> Int4,
        exhale_seconds -> Int4,
        hold_after_exhale_seconds -> Int4,
        recommended_minutes -> Int4,
        posture -> Varchar,
        /// Wire code of the breath origin enum.
        breath_origin -> Varchar,
        instructions -> Text,
        sound_cue_default -> Bool,
        haptic_cue_default -> Bool,
    }
}

diesel::table! {
    /// Per-user breathing session records.
    breathing_sessions (id) {
        id -> Int4,
        user_id -> Uuid,
        technique_id -> Int4,
        started_at -> Timestamptz,
        completed_at -> Nullable<Timestamptz>,
        /// Derived from the two timestamps; rewritten on every save.
        duration_seconds -> Nullable<Int4>,
        completed -> Bool,
        cycles_completed -> Nullable<Int4>,
        sound_enabled -> Bool,
        vibration_enabled -> Bool,
    }
}

diesel::table! {
    /// Append-only habit tap log.
    activity_logs (id) {
        id -> Int4,
        user_id -> Uuid,
        /// Wire code of the activity kind enum.
        activity_type -> Varchar,
        logged_at -> Timestamptz,
    }
}

diesel::joinable!(breathing_techniques -> breathing_categories (category_id));
diesel::joinable!(breathing_sessions -> breathing_techniques (technique_id));
diesel::joinable!(breathing_sessions -> users (user_id));
diesel::joinable!(activity_logs -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    breathing_categories,
    breathing_techniques,
    breathing_sessions,
    activity_logs,
);
