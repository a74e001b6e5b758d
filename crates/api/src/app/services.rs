//! Shared application services handed to every handler.

use std::time::Duration;

use standpos_advisor::Advisor;

use crate::app::sessions::SessionRegistry;

#[derive(Debug)]
pub struct AppServices {
    pub sessions: SessionRegistry,
    pub advisor: Advisor,
}

impl AppServices {
    pub fn new(advisor: Advisor, session_idle_ttl: Duration) -> Self {
        Self {
            sessions: SessionRegistry::new(session_idle_ttl),
            advisor,
        }
    }
}
