//! Diesel-backed `LoginService` adapter.
//!
//! Login is find-or-create by display name: the first login with a name
//! creates the user, later logins return the same identity. There are no
//! credentials beyond the name.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::LoginService;
use crate::domain::{DisplayName, Error, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed login service implementing find-or-create semantics.
#[derive(Clone)]
pub struct DieselLoginService {
    pool: DbPool,
}

impl DieselLoginService {
    /// Create a new service with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> Error {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    Error::service_unavailable(format!("user store unavailable: {message}"))
}

fn map_diesel_error(error: diesel::result::Error) -> Error {
    Error::internal(format!("user store error: {error}"))
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, Error> {
    let display_name = DisplayName::new(row.display_name)
        .map_err(|err| Error::internal(format!("stored display name invalid: {err}")))?;
    Ok(User::new(UserId::from_uuid(row.id), display_name))
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn login(&self, display_name: &DisplayName) -> Result<User, Error> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let existing = users::table
            .filter(users::display_name.eq(display_name.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        if let Some(row) = existing {
            return row_to_user(row);
        }

        // Two concurrent first logins race on the unique display_name
        // constraint; do_nothing lets the loser fall through to the
        // re-select below.
        let new_row = NewUserRow {
            id: Uuid::new_v4(),
            display_name: display_name.as_ref(),
        };
        diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict(users::display_name)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let row = users::table
            .filter(users::display_name.eq(display_name.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion and error mapping.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    fn row_conversion_builds_validated_user() {
        let id = Uuid::new_v4();
        let user = row_to_user(UserRow {
            id,
            display_name: "Ada".to_owned(),
            created_at: Utc::now(),
        })
        .expect("valid row");

        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.display_name().as_ref(), "Ada");
    }

    #[rstest]
    fn row_conversion_rejects_blank_stored_name() {
        let error = row_to_user(UserRow {
            id: Uuid::new_v4(),
            display_name: "   ".to_owned(),
            created_at: Utc::now(),
        })
        .expect_err("blank name fails");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    fn pool_error_maps_to_service_unavailable() {
        let error = map_pool_error(PoolError::checkout("connection refused"));
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
