use crate::api::{ApiClient, DEFAULT_USER_ID};
use crate::models::UserPreferences;
use crate::storage::load_preferences;
use leptos::prelude::*;

// All fields are arena-allocated signal handles, so the whole state is Copy
// and can move into any number of event closures.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Loaded from localStorage; rewritten by the preferences page.
    pub preferences: RwSignal<UserPreferences>,

    /// Single-profile id sent with every backend request.
    pub user_id: RwSignal<String>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_prefs = load_preferences().unwrap_or_default();

        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            preferences: RwSignal::new(stored_prefs),
            user_id: RwSignal::new(DEFAULT_USER_ID.to_string()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
