//! Test doubles for the application ports.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use secrecy::Secret;

use kiosk_domain::{
    Button, ButtonAction, Credentials, LocalizedText, RefreshGrant, ScreenData, TokenGrant,
    TokenState,
};

use crate::ports::{ApiError, Clock, ConfigurationApi, ScreenQuery, TokenCache, TokenCacheError};

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// A call observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Token,
    Refresh(String),
    Screen(String),
}

/// Scripted configuration API.
///
/// Responses are consumed in order; an unscripted call fails with
/// `InvalidResponse` so tests notice unexpected traffic.
#[derive(Default)]
pub struct FakeApi {
    tokens: Mutex<VecDeque<Result<TokenGrant, ApiError>>>,
    refreshes: Mutex<VecDeque<Result<RefreshGrant, ApiError>>>,
    screens: Mutex<VecDeque<Result<ScreenData, ApiError>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_token(&self, response: Result<TokenGrant, ApiError>) -> &Self {
        self.tokens.lock().unwrap().push_back(response);
        self
    }

    pub fn push_refresh(&self, response: Result<RefreshGrant, ApiError>) -> &Self {
        self.refreshes.lock().unwrap().push_back(response);
        self
    }

    pub fn push_screen(&self, response: Result<ScreenData, ApiError>) -> &Self {
        self.screens.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, f: impl Fn(&ApiCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| f(c)).count()
    }

    fn next<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>, what: &str) -> Result<T, ApiError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::InvalidResponse(format!("unscripted {what} call"))))
    }
}

#[async_trait]
impl ConfigurationApi for FakeApi {
    async fn request_token(&self, _credentials: &Credentials) -> Result<TokenGrant, ApiError> {
        self.calls.lock().unwrap().push(ApiCall::Token);
        Self::next(&self.tokens, "token")
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshGrant, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(ApiCall::Refresh(refresh_token.to_string()));
        Self::next(&self.refreshes, "refresh")
    }

    async fn screen_design(
        &self,
        access_token: &str,
        _query: &ScreenQuery,
    ) -> Result<ScreenData, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(ApiCall::Screen(access_token.to_string()));
        Self::next(&self.screens, "screen")
    }
}

/// In-memory token cache.
#[derive(Default)]
pub struct MemoryCache {
    pub state: Mutex<Option<TokenState>>,
}

#[async_trait]
impl TokenCache for MemoryCache {
    async fn load(&self) -> Result<Option<TokenState>, TokenCacheError> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn save(&self, state: &TokenState) -> Result<(), TokenCacheError> {
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenCacheError> {
        *self.state.lock().unwrap() = None;
        Ok(())
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("kiosk", Secret::new("secret".to_string()), "Arab Bank").unwrap()
}

pub fn grant(access: &str, refresh: &str, minutes: i64) -> TokenGrant {
    TokenGrant {
        access_token: access.to_string(),
        refresh_token: Some(refresh.to_string()),
        expires_in: Some(TimeDelta::minutes(minutes)),
    }
}

pub fn refresh_grant(access: &str, minutes: i64) -> RefreshGrant {
    RefreshGrant {
        access_token: access.to_string(),
        refresh_token: None,
        expires_in: Some(TimeDelta::minutes(minutes)),
    }
}

pub fn screen(buttons: usize) -> ScreenData {
    ScreenData::new(
        LocalizedText::new("Main Branch", "الفرع الرئيسي"),
        (0..buttons)
            .map(|i| {
                Button::new(
                    LocalizedText::new(format!("Button {i}"), format!("زر {i}")),
                    ButtonAction::ShowMessage {
                        message: LocalizedText::new(format!("Message {i}"), format!("رسالة {i}")),
                    },
                )
            })
            .collect(),
    )
}
