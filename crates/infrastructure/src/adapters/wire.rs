//! JSON shapes of the configuration API.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use kiosk_domain::{Button, ButtonAction, LocalizedText, RefreshGrant, ScreenData, TokenGrant};

/// Body of `POST /api/auth/token`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
    pub bank_name: &'a str,
}

/// Body of `POST /api/auth/refresh`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Query of `GET /api/screen-design`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDesignParams<'a> {
    pub branch_id: &'a str,
    pub only_allocated: bool,
}

/// Token endpoint response. `expires_in` is in minutes.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    fn lifetime(&self) -> Option<TimeDelta> {
        self.expires_in.and_then(TimeDelta::try_minutes)
    }

    pub fn into_grant(self) -> TokenGrant {
        TokenGrant {
            expires_in: self.lifetime(),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
        }
    }

    pub fn into_refresh_grant(self) -> RefreshGrant {
        RefreshGrant {
            expires_in: self.lifetime(),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDesignResponse {
    #[serde(default)]
    pub branch_name_english: String,
    #[serde(default)]
    pub branch_name_arabic: String,
    #[serde(default)]
    pub buttons: Vec<ButtonResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonResponse {
    #[serde(default)]
    pub name_english: String,
    #[serde(default)]
    pub name_arabic: String,
    pub button_type: String,
    #[serde(default)]
    pub message_english: Option<String>,
    #[serde(default)]
    pub message_arabic: Option<String>,
    #[serde(default)]
    pub service_name_english: Option<String>,
    #[serde(default)]
    pub service_name_arabic: Option<String>,
}

impl From<ButtonResponse> for Button {
    fn from(b: ButtonResponse) -> Self {
        let message = LocalizedText::new(
            b.message_english.unwrap_or_default(),
            b.message_arabic.unwrap_or_default(),
        );
        let service_name = LocalizedText::new(
            b.service_name_english.unwrap_or_default(),
            b.service_name_arabic.unwrap_or_default(),
        );
        Self::new(
            LocalizedText::new(b.name_english, b.name_arabic),
            ButtonAction::from_wire(&b.button_type, message, service_name),
        )
    }
}

impl From<ScreenDesignResponse> for ScreenData {
    fn from(r: ScreenDesignResponse) -> Self {
        Self::new(
            LocalizedText::new(r.branch_name_english, r.branch_name_arabic),
            r.buttons.into_iter().map(Button::from).collect(),
        )
    }
}
