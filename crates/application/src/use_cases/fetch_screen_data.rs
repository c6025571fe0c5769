//! Fetch screen data use case.

use std::sync::Arc;

use tracing::{debug, warn};

use kiosk_domain::ScreenData;

use crate::auth::AuthSession;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, ConfigurationApi, ScreenQuery};

/// Use case for fetching the current screen design of the branch.
///
/// Every request carries a token from [`AuthSession::valid_token`]. A 401
/// answer (e.g. clock skew, server-side revocation) refreshes once and
/// retries once; the retry's answer is final.
pub struct FetchScreenData<A, C> {
    session: Arc<AuthSession<A, C>>,
    api: Arc<A>,
    query: ScreenQuery,
}

impl<A: ConfigurationApi, C: Clock> FetchScreenData<A, C> {
    /// Creates the use case for the given branch query.
    pub const fn new(session: Arc<AuthSession<A, C>>, api: Arc<A>, query: ScreenQuery) -> Self {
        Self {
            session,
            api,
            query,
        }
    }

    /// The query sent with every request.
    #[must_use]
    pub const fn query(&self) -> &ScreenQuery {
        &self.query
    }

    /// Fetches the screen data.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::Authentication`] if no valid token could be obtained
    /// - [`ApplicationError::Fetch`] if the request failed, including a 401
    ///   on the retry
    pub async fn execute(&self) -> ApplicationResult<ScreenData> {
        let token = self.session.valid_token().await?;

        match self.api.screen_design(&token, &self.query).await {
            Err(e) if e.is_unauthorized() => {
                warn!(
                    branch_id = %self.query.branch_id,
                    "screen design request unauthorized, refreshing and retrying once"
                );
                let token = self.session.refresh_rejected(&token).await?;
                self.api
                    .screen_design(&token, &self.query)
                    .await
                    .map_err(ApplicationError::Fetch)
            }
            result => {
                if let Ok(screen) = &result {
                    debug!(buttons = screen.buttons.len(), "screen design fetched");
                }
                result.map_err(ApplicationError::Fetch)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::ApiError;
    use crate::test_support::{
        ApiCall, FakeApi, ManualClock, credentials, grant, refresh_grant, screen,
    };
    use chrono::TimeDelta;
    use kiosk_domain::TokenState;
    use pretty_assertions::assert_eq;

    struct Fixture {
        api: Arc<FakeApi>,
        clock: Arc<ManualClock>,
        session: Arc<AuthSession<FakeApi, ManualClock>>,
        use_case: FetchScreenData<FakeApi, ManualClock>,
    }

    fn fixture() -> Fixture {
        let api = Arc::new(FakeApi::new());
        let clock = Arc::new(ManualClock::new());
        let session = Arc::new(AuthSession::new(
            Arc::clone(&api),
            Arc::clone(&clock),
            credentials(),
        ));
        let use_case = FetchScreenData::new(
            Arc::clone(&session),
            Arc::clone(&api),
            ScreenQuery::allocated("66"),
        );
        Fixture {
            api,
            clock,
            session,
            use_case,
        }
    }

    fn is_auth_call(call: &ApiCall) -> bool {
        matches!(call, ApiCall::Token | ApiCall::Refresh(_))
    }

    #[tokio::test]
    async fn test_valid_token_triggers_no_auth_calls() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.session.authenticate().await.unwrap();
        for _ in 0..4 {
            f.api.push_screen(Ok(screen(3)));
        }

        for _ in 0..4 {
            f.use_case.execute().await.unwrap();
            f.clock.advance(TimeDelta::seconds(45));
        }

        assert_eq!(f.api.count(is_auth_call), 1);
        assert_eq!(f.api.count(|c| *c == ApiCall::Screen("A".to_string())), 4);
    }

    #[tokio::test]
    async fn test_absent_token_authenticates_first() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.api.push_screen(Ok(screen(2)));

        let data = f.use_case.execute().await.unwrap();

        assert_eq!(data.buttons.len(), 2);
        assert_eq!(
            f.api.calls(),
            vec![ApiCall::Token, ApiCall::Screen("A".to_string())]
        );
    }

    #[tokio::test]
    async fn test_expiring_token_refreshes_once_before_request() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.session.authenticate().await.unwrap();
        f.api.push_refresh(Ok(refresh_grant("A2", 5)));
        f.api.push_screen(Ok(screen(1)));

        f.clock.advance(TimeDelta::seconds(250));
        f.use_case.execute().await.unwrap();

        assert_eq!(
            f.api.calls(),
            vec![
                ApiCall::Token,
                ApiCall::Refresh("R".to_string()),
                ApiCall::Screen("A2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_expired_token_refreshes_once_before_request() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.session.authenticate().await.unwrap();
        f.api.push_refresh(Ok(refresh_grant("A2", 5)));
        f.api.push_screen(Ok(screen(1)));

        f.clock.advance(TimeDelta::hours(2));
        f.use_case.execute().await.unwrap();

        assert_eq!(f.api.count(|c| matches!(c, ApiCall::Refresh(_))), 1);
        assert_eq!(f.api.count(|c| *c == ApiCall::Token), 1);
    }

    #[tokio::test]
    async fn test_single_401_refreshes_and_retries_once() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.api.push_screen(Err(ApiError::http(401, "token revoked")));
        f.api.push_refresh(Ok(refresh_grant("A2", 5)));
        f.api.push_screen(Ok(screen(4)));

        let data = f.use_case.execute().await.unwrap();

        assert_eq!(data.buttons.len(), 4);
        assert_eq!(
            f.api.calls(),
            vec![
                ApiCall::Token,
                ApiCall::Screen("A".to_string()),
                ApiCall::Refresh("R".to_string()),
                ApiCall::Screen("A2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_second_401_is_final() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.api.push_screen(Err(ApiError::http(401, "no")));
        f.api.push_refresh(Ok(refresh_grant("A2", 5)));
        f.api.push_screen(Err(ApiError::http(401, "still no")));

        let err = f.use_case.execute().await.unwrap_err();

        assert_eq!(err, ApplicationError::Fetch(ApiError::http(401, "still no")));
        assert_eq!(f.api.count(|c| matches!(c, ApiCall::Screen(_))), 2);
        assert_eq!(f.api.count(|c| matches!(c, ApiCall::Refresh(_))), 1);
    }

    #[tokio::test]
    async fn test_refresh_and_reauth_failure_rejects_and_clears_tokens() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.session.authenticate().await.unwrap();
        f.api.push_refresh(Err(ApiError::http(400, "refresh token expired")));
        f.api.push_token(Err(ApiError::http(401, "password changed")));

        f.clock.advance(TimeDelta::minutes(10));
        let err = f.use_case.execute().await.unwrap_err();

        assert_eq!(
            err,
            ApplicationError::Authentication(ApiError::http(401, "password changed"))
        );
        assert_eq!(f.session.store().snapshot().await, TokenState::empty());
        assert_eq!(f.api.count(|c| matches!(c, ApiCall::Screen(_))), 0);
    }

    #[tokio::test]
    async fn test_non_401_failure_is_fetch_error_without_retry() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.api.push_screen(Err(ApiError::http(500, "internal error")));

        let err = f.use_case.execute().await.unwrap_err();

        assert_eq!(err, ApplicationError::Fetch(ApiError::http(500, "internal error")));
        assert_eq!(err.status(), Some(500));
        assert_eq!(f.api.count(|c| matches!(c, ApiCall::Screen(_))), 1);
    }

    #[tokio::test]
    async fn test_network_failure_is_network_fetch_error() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.api
            .push_screen(Err(ApiError::ConnectionFailed("connection reset".to_string())));

        let err = f.use_case.execute().await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_authenticate_then_fetch_within_window_issues_no_refresh() {
        let f = fixture();
        f.api.push_token(Ok(grant("A", "R", 5)));
        f.session.authenticate().await.unwrap();

        let expires_at = f.session.store().snapshot().await.expires_at.unwrap();
        let delta = (expires_at - (f.clock.now() + TimeDelta::minutes(5)))
            .num_milliseconds()
            .abs();
        assert!(delta <= 1_000);

        f.api.push_screen(Ok(screen(1)));
        f.clock.advance(TimeDelta::minutes(1));
        f.use_case.execute().await.unwrap();
        assert_eq!(f.api.count(|c| matches!(c, ApiCall::Refresh(_))), 0);
    }
}
