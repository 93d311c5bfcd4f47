//! Tests for the activity tap service.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

use super::*;
use crate::domain::ports::MockActivityLogRepository;
use crate::domain::{ActivityKind, ErrorCode};

/// In-memory log implementing the real cutoff comparison, so the window
/// boundary and per-kind scoping are exercised rather than mocked.
#[derive(Default)]
struct InMemoryActivityLog {
    taps: Mutex<Vec<(UserId, ActivityKind, DateTime<Utc>)>>,
}

#[async_trait]
impl ActivityLogRepository for InMemoryActivityLog {
    async fn has_tap_after(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        cutoff: DateTime<Utc>,
    ) -> Result<bool, ActivityLogRepositoryError> {
        let taps = self.taps.lock().expect("taps lock");
        Ok(taps
            .iter()
            .any(|(owner, logged_kind, logged_at)| {
                owner == user_id && *logged_kind == kind && *logged_at > cutoff
            }))
    }

    async fn append(
        &self,
        user_id: &UserId,
        kind: ActivityKind,
        logged_at: DateTime<Utc>,
    ) -> Result<i32, ActivityLogRepositoryError> {
        let mut taps = self.taps.lock().expect("taps lock");
        taps.push((user_id.clone(), kind, logged_at));
        Ok(taps.len() as i32)
    }

    async fn count_by_kind(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<(ActivityKind, i64)>, ActivityLogRepositoryError> {
        let taps = self.taps.lock().expect("taps lock");
        let mut counts: Vec<(ActivityKind, i64)> = Vec::new();
        for (_, kind, _) in taps.iter().filter(|(owner, _, _)| owner == user_id) {
            match counts.iter_mut().find(|(counted, _)| counted == kind) {
                Some((_, total)) => *total += 1,
                None => counts.push((*kind, 1)),
            }
        }
        Ok(counts)
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_clock(utc_now: DateTime<Utc>) -> Arc<dyn Clock> {
    Arc::new(FixtureClock { utc_now })
}

#[tokio::test]
async fn tap_checks_the_three_second_cutoff() {
    let now = fixture_timestamp();
    let expected_cutoff = now - Duration::seconds(3);

    let mut repo = MockActivityLogRepository::new();
    repo.expect_has_tap_after()
        .times(1)
        .return_once(move |_, kind, cutoff| {
            assert_eq!(kind, ActivityKind::Resist);
            assert_eq!(cutoff, expected_cutoff);
            Ok(false)
        });
    repo.expect_append()
        .times(1)
        .return_once(move |_, _, logged_at| {
            assert_eq!(logged_at, now);
            Ok(17)
        });
    repo.expect_count_by_kind()
        .times(1)
        .return_once(|_| Ok(vec![(ActivityKind::Resist, 8)]));

    let service = ActivityTapService::new(Arc::new(repo), fixture_clock(now));
    let response = service
        .tap(TapActivityRequest {
            user_id: UserId::random(),
            kind: ActivityKind::Resist,
        })
        .await
        .expect("tap succeeds");

    assert_eq!(response.activity_id, 17);
    assert_eq!(response.counts.resist, 8);
    assert_eq!(response.counts.smoked, 0);
}

#[tokio::test]
async fn tap_inside_the_window_is_rate_limited() {
    let mut repo = MockActivityLogRepository::new();
    repo.expect_has_tap_after().times(1).return_once(|_, _, _| Ok(true));
    repo.expect_append().times(0);
    repo.expect_count_by_kind().times(0);

    let service = ActivityTapService::new(Arc::new(repo), fixture_clock(fixture_timestamp()));
    let error = service
        .tap(TapActivityRequest {
            user_id: UserId::random(),
            kind: ActivityKind::Smoked,
        })
        .await
        .expect_err("rate limited");

    assert_eq!(error.code(), ErrorCode::RateLimited);
    let details = error.details().expect("retry hint");
    assert_eq!(details["retryAfterSeconds"], 3);
}

#[tokio::test]
async fn counts_fold_grouped_rows_into_fixed_buckets() {
    let mut repo = MockActivityLogRepository::new();
    repo.expect_count_by_kind()
        .times(1)
        .return_once(|_| Ok(vec![(ActivityKind::Sport, 3), (ActivityKind::Resist, 12)]));

    let service = ActivityTapService::new(Arc::new(repo), fixture_clock(fixture_timestamp()));
    let response = service
        .counts(GetActivityCountsRequest {
            user_id: UserId::random(),
        })
        .await
        .expect("counts succeed");

    assert_eq!(response.counts.resist, 12);
    assert_eq!(response.counts.smoked, 0);
    assert_eq!(response.counts.sport, 3);
}

#[tokio::test]
async fn tap_exactly_three_seconds_after_the_last_is_allowed() {
    let user_id = UserId::random();
    let first_tap = fixture_timestamp();
    let repo = Arc::new(InMemoryActivityLog::default());

    let service = ActivityTapService::new(repo.clone(), fixture_clock(first_tap));
    service
        .tap(TapActivityRequest {
            user_id: user_id.clone(),
            kind: ActivityKind::Resist,
        })
        .await
        .expect("first tap succeeds");

    let service = ActivityTapService::new(
        repo.clone(),
        fixture_clock(first_tap + Duration::milliseconds(2_999)),
    );
    let error = service
        .tap(TapActivityRequest {
            user_id: user_id.clone(),
            kind: ActivityKind::Resist,
        })
        .await
        .expect_err("tap inside the window");
    assert_eq!(error.code(), ErrorCode::RateLimited);

    let service = ActivityTapService::new(repo, fixture_clock(first_tap + Duration::seconds(3)));
    let response = service
        .tap(TapActivityRequest {
            user_id,
            kind: ActivityKind::Resist,
        })
        .await
        .expect("tap at the boundary succeeds");
    assert_eq!(response.counts.resist, 2);
}

#[tokio::test]
async fn taps_of_different_kinds_are_limited_independently() {
    let user_id = UserId::random();
    let now = fixture_timestamp();
    let service = ActivityTapService::new(
        Arc::new(InMemoryActivityLog::default()),
        fixture_clock(now),
    );

    service
        .tap(TapActivityRequest {
            user_id: user_id.clone(),
            kind: ActivityKind::Resist,
        })
        .await
        .expect("resist tap succeeds");
    service
        .tap(TapActivityRequest {
            user_id: user_id.clone(),
            kind: ActivityKind::Smoked,
        })
        .await
        .expect("smoked tap succeeds");
    let sport = service
        .tap(TapActivityRequest {
            user_id: user_id.clone(),
            kind: ActivityKind::Sport,
        })
        .await
        .expect("sport tap succeeds");

    assert_eq!(sport.counts.resist, 1);
    assert_eq!(sport.counts.smoked, 1);
    assert_eq!(sport.counts.sport, 1);

    let error = service
        .tap(TapActivityRequest {
            user_id,
            kind: ActivityKind::Resist,
        })
        .await
        .expect_err("repeat resist tap is limited");
    assert_eq!(error.code(), ErrorCode::RateLimited);
}

#[tokio::test]
async fn connection_errors_map_to_service_unavailable() {
    let mut repo = MockActivityLogRepository::new();
    repo.expect_has_tap_after()
        .times(1)
        .return_once(|_, _, _| Err(ActivityLogRepositoryError::connection("pool unavailable")));

    let service = ActivityTapService::new(Arc::new(repo), fixture_clock(fixture_timestamp()));
    let error = service
        .tap(TapActivityRequest {
            user_id: UserId::random(),
            kind: ActivityKind::Sport,
        })
        .await
        .expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
