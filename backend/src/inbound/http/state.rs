//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving port,
//! so tests can swap in a mock use-case without any store.

use std::sync::Arc;

use crate::domain::ports::RegistrationCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationCommand>,
}

impl HttpState {
    /// Wrap the registration use-case.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use registration::domain::RegistrationService;
    /// use registration::inbound::http::state::HttpState;
    /// use registration::outbound::credentials::Argon2CredentialHasher;
    /// use registration::outbound::memory::InMemoryUserRepository;
    ///
    /// let service = RegistrationService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(Argon2CredentialHasher::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(Arc::new(service));
    /// let _port = state.registration.clone();
    /// ```
    pub fn new(registration: Arc<dyn RegistrationCommand>) -> Self {
        Self { registration }
    }
}
