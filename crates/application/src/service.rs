//! Facade consumed by the presentation layer.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use kiosk_domain::{BankIdentity, ScreenData};

use crate::auth::AuthSession;
use crate::error::ApplicationResult;
use crate::ports::{Clock, ConfigurationApi, ScreenQuery};
use crate::use_cases::FetchScreenData;

/// How [`KioskService::initialize_api_service`] treats tokens restored from the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BootstrapPolicy {
    /// Authenticate only when no access token is held.
    #[default]
    ReuseCached,
    /// Authenticate on every bootstrap.
    #[serde(rename = "always")]
    AlwaysAuthenticate,
}

/// The kiosk's API service: one session plus the branch it serves.
pub struct KioskService<A, C> {
    session: Arc<AuthSession<A, C>>,
    fetch: FetchScreenData<A, C>,
    bank: BankIdentity,
    bootstrap: BootstrapPolicy,
}

impl<A: ConfigurationApi, C: Clock> KioskService<A, C> {
    /// Creates the service. Screen requests are scoped to the bank's branch.
    pub fn new(
        session: Arc<AuthSession<A, C>>,
        api: Arc<A>,
        bank: BankIdentity,
        bootstrap: BootstrapPolicy,
    ) -> Self {
        let query = ScreenQuery::allocated(bank.branch_id.clone());
        Self {
            fetch: FetchScreenData::new(Arc::clone(&session), api, query),
            session,
            bank,
            bootstrap,
        }
    }

    /// Brings the session to a usable state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::Authentication`] if authentication
    /// was needed and failed.
    pub async fn initialize_api_service(&self) -> ApplicationResult<()> {
        let restored = self.session.restore().await;
        match (self.bootstrap, restored) {
            (BootstrapPolicy::ReuseCached, true) => {
                info!("reusing cached access token");
                Ok(())
            }
            _ => {
                self.session.authenticate().await?;
                info!(branch_id = %self.bank.branch_id, "api service initialized");
                Ok(())
            }
        }
    }

    /// Fetches the branch's screen design.
    ///
    /// # Errors
    ///
    /// See [`FetchScreenData::execute`].
    pub async fn fetch_screen_data(&self) -> ApplicationResult<ScreenData> {
        self.fetch.execute().await
    }

    /// Bank and branch identity.
    #[must_use]
    pub const fn bank(&self) -> &BankIdentity {
        &self.bank
    }

    /// The authenticated session.
    #[must_use]
    pub const fn session(&self) -> &Arc<AuthSession<A, C>> {
        &self.session
    }
}
