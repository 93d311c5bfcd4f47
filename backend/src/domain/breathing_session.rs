//! Breathing session entity.
//!
//! A session records one user's timed execution of a technique. It starts in
//! a "started" state and ends either completed or cancelled; both terminal
//! states set the completion timestamp.
//!
//! `duration_seconds` is a derived value, never stored independently in the
//! domain: it is recomputed from the two timestamps on every read, and the
//! persistence adapter writes the derived value on every save. Editing either
//! timestamp therefore silently recomputes the duration; the completion
//! transition is not special-cased.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Fields for inserting a freshly started session.
///
/// New sessions always begin not-completed with zero cycles; the preference
/// flags snapshot the toggles used for this particular run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBreathingSession {
    pub user_id: UserId,
    pub technique_id: i32,
    pub started_at: DateTime<Utc>,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
}

impl NewBreathingSession {
    /// Build the insert payload for a session starting now.
    pub fn new(
        user_id: UserId,
        technique_id: i32,
        started_at: DateTime<Utc>,
        sound_enabled: bool,
        vibration_enabled: bool,
    ) -> Self {
        Self {
            user_id,
            technique_id,
            started_at,
            sound_enabled,
            vibration_enabled,
        }
    }
}

/// One user's timed execution of a breathing technique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingSession {
    id: i32,
    user_id: UserId,
    technique_id: i32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    completed: bool,
    cycles_completed: Option<i32>,
    sound_enabled: bool,
    vibration_enabled: bool,
}

impl BreathingSession {
    /// Reconstruct a session from persisted fields.
    #[expect(clippy::too_many_arguments, reason = "row hydration mirrors the table")]
    pub fn from_parts(
        id: i32,
        user_id: UserId,
        technique_id: i32,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
        completed: bool,
        cycles_completed: Option<i32>,
        sound_enabled: bool,
        vibration_enabled: bool,
    ) -> Self {
        Self {
            id,
            user_id,
            technique_id,
            started_at,
            completed_at,
            completed,
            cycles_completed,
            sound_enabled,
            vibration_enabled,
        }
    }

    /// Surrogate key.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Technique this session executed.
    pub fn technique_id(&self) -> i32 {
        self.technique_id
    }

    /// When the session started (server clock at creation).
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the session ended, if it has.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Whether the session finished as completed (vs cancelled or running).
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Number of breathing cycles the client reported.
    pub fn cycles_completed(&self) -> Option<i32> {
        self.cycles_completed
    }

    /// Whether sound cues were enabled for this run.
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Whether vibration cues were enabled for this run.
    pub fn vibration_enabled(&self) -> bool {
        self.vibration_enabled
    }

    /// Whether the session reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Derived session duration in whole seconds.
    ///
    /// `None` until the completion timestamp is set. Clamped at zero; under
    /// normal clocks completion is always at or after the start.
    pub fn duration_seconds(&self) -> Option<i32> {
        self.completed_at.map(|ended| {
            let seconds = (ended - self.started_at).num_seconds().max(0);
            i32::try_from(seconds).unwrap_or(i32::MAX)
        })
    }

    /// Overwrite the reported cycle count without touching timestamps.
    ///
    /// Repeated calls with the same value are idempotent.
    pub fn record_progress(&mut self, cycles_completed: i32) {
        self.cycles_completed = Some(cycles_completed);
    }

    /// Move the session to a terminal state.
    ///
    /// `completed` distinguishes a completed run from a cancelled one; both
    /// set the completion timestamp, after which [`Self::duration_seconds`]
    /// yields the elapsed whole seconds.
    pub fn finish(&mut self, completed: bool, ended_at: DateTime<Utc>, cycles_completed: i32) {
        self.completed_at = Some(ended_at);
        self.completed = completed;
        self.cycles_completed = Some(cycles_completed);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn running_session() -> BreathingSession {
        BreathingSession::from_parts(
            42,
            UserId::random(),
            5,
            Utc::now(),
            None,
            false,
            Some(0),
            true,
            true,
        )
    }

    #[rstest]
    fn duration_is_unset_while_running(running_session: BreathingSession) {
        assert!(running_session.duration_seconds().is_none());
        assert!(!running_session.is_finished());
    }

    #[rstest]
    fn complete_yields_whole_second_duration(mut running_session: BreathingSession) {
        let ended = running_session.started_at() + Duration::seconds(185);
        running_session.finish(true, ended, 7);

        assert!(running_session.completed());
        assert_eq!(running_session.cycles_completed(), Some(7));
        assert_eq!(running_session.duration_seconds(), Some(185));
    }

    #[rstest]
    fn cancel_sets_timestamp_but_not_completed(mut running_session: BreathingSession) {
        let ended = running_session.started_at() + Duration::seconds(30);
        running_session.finish(false, ended, 2);

        assert!(!running_session.completed());
        assert!(running_session.is_finished());
        assert_eq!(running_session.duration_seconds(), Some(30));
    }

    #[rstest]
    fn duration_tracks_later_timestamp_edits(mut running_session: BreathingSession) {
        let ended = running_session.started_at() + Duration::seconds(60);
        running_session.finish(true, ended, 4);
        assert_eq!(running_session.duration_seconds(), Some(60));

        // A second terminal write with a different timestamp recomputes the
        // derived duration rather than keeping the first value.
        running_session.finish(true, ended + Duration::seconds(30), 4);
        assert_eq!(running_session.duration_seconds(), Some(90));
    }

    #[rstest]
    fn duration_floors_to_whole_seconds(mut running_session: BreathingSession) {
        let ended = running_session.started_at() + Duration::milliseconds(185_900);
        running_session.finish(true, ended, 7);
        assert_eq!(running_session.duration_seconds(), Some(185));
    }

    #[rstest]
    fn record_progress_is_idempotent(mut running_session: BreathingSession) {
        running_session.record_progress(3);
        let snapshot = running_session.clone();
        running_session.record_progress(3);
        assert_eq!(running_session, snapshot);
        assert!(running_session.duration_seconds().is_none());
    }
}
