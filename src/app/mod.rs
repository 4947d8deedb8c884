use crate::pages::{DashboardPage, JournalPage, LandingPage, PreferencesPage, QuestionnairePage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("preferences") view=PreferencesPage />
                <Route path=path!("journal") view=JournalPage />
                <Route path=path!("questionnaire") view=QuestionnairePage />
                <Route path=path!("dashboard") view=DashboardPage />
                <Route path=path!("") view=LandingPage />
            </Routes>
        </Router>
    }
}
