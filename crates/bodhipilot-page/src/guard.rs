//! Session guard.

use tracing::info;

use bodhipilot_core::session::SessionStore;

use crate::driver::{ChatDriver, LOGIN_PATH};

/// Allow the page only when a token is stored; otherwise navigate to login.
pub fn ensure_logged_in(store: &dyn SessionStore, driver: &dyn ChatDriver) -> bool {
    if store.token().is_some() {
        return true;
    }
    info!("No stored session, redirecting to {}", LOGIN_PATH);
    driver.navigate(LOGIN_PATH);
    false
}
