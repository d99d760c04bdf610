//! Application composition.

use std::sync::Arc;

use tradeassoc_domain::ReviewDomain;

use crate::application::ReviewService;
use crate::infrastructure::config::ReviewConfig;
use crate::infrastructure::http_client::HttpReviewApi;
use crate::infrastructure::session::CredentialStore;
use crate::ports::outbound::{ReviewApiPort, SessionPort};

/// One review service per domain, sharing a backend client and a session.
pub struct ReviewApp {
    pub membership: ReviewService,
    pub bill: ReviewService,
    pub invoice: ReviewService,
    pub credentials: Arc<CredentialStore>,
}

impl ReviewApp {
    /// Wires the HTTP adapter and a credential store seeded from config.
    pub fn from_config(config: &ReviewConfig) -> Self {
        let api: Arc<dyn ReviewApiPort> = Arc::new(HttpReviewApi::from_config(config));
        let credentials = Arc::new(CredentialStore::from_config(config));
        Self::with_ports(config, api, credentials)
    }

    pub fn with_ports(
        config: &ReviewConfig,
        api: Arc<dyn ReviewApiPort>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        let session: Arc<dyn SessionPort> = credentials.clone();
        let build = |domain: ReviewDomain| {
            ReviewService::new(
                config.profile_for(domain),
                config.endpoints_for(domain),
                api.clone(),
                session.clone(),
            )
        };

        Self {
            membership: build(ReviewDomain::Membership),
            bill: build(ReviewDomain::Bill),
            invoice: build(ReviewDomain::Invoice),
            credentials,
        }
    }

    pub fn service(&self, domain: ReviewDomain) -> &ReviewService {
        match domain {
            ReviewDomain::Membership => &self.membership,
            ReviewDomain::Bill => &self.bill,
            ReviewDomain::Invoice => &self.invoice,
        }
    }
}
