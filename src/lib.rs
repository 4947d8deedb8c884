mod api;
mod app;
mod components;
mod editor;
mod models;
mod pages;
mod state;
mod storage;
mod util;

use app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` +
// wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::editor::probe_caret;
    use crate::models::{JournalAnalysis, Suggestion, UserPreferences, WellnessMetrics};
    use crate::storage::{
        delete_draft, load_drafts, load_latest_journal_analysis,
        load_latest_questionnaire_analysis, load_preferences, push_draft, remove_from_storage,
        save_latest_journal_analysis, save_latest_questionnaire_analysis, save_preferences,
        DRAFTS_KEY, JOURNAL_ANALYSIS_KEY, MAX_DRAFTS, PREFERENCES_KEY, QUESTIONNAIRE_ANALYSIS_KEY,
    };
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Mount a textarea with fixed metrics plus an empty mirror div, so
    /// probe measurements are deterministic across runners.
    fn mount_probe_fixture() -> (web_sys::HtmlTextAreaElement, web_sys::HtmlElement) {
        let document = web_sys::window()
            .expect("window")
            .document()
            .expect("document");
        let body = document.body().expect("body");

        let textarea: web_sys::HtmlTextAreaElement = document
            .create_element("textarea")
            .expect("create textarea")
            .dyn_into()
            .expect("textarea element");
        let style = textarea.style();
        let _ = style.set_property("width", "160px");
        let _ = style.set_property("font-family", "monospace");
        let _ = style.set_property("font-size", "16px");
        let _ = style.set_property("line-height", "20px");
        let _ = style.set_property("padding", "8px");
        body.append_child(&textarea).expect("mount textarea");

        let mirror: web_sys::HtmlElement = document
            .create_element("div")
            .expect("create mirror")
            .dyn_into()
            .expect("mirror element");
        body.append_child(&mirror).expect("mount mirror");

        (textarea, mirror)
    }

    fn unmount_probe_fixture(
        textarea: &web_sys::HtmlTextAreaElement,
        mirror: &web_sys::HtmlElement,
    ) {
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            let _ = body.remove_child(mirror);
            let _ = body.remove_child(textarea);
        }
    }

    #[wasm_bindgen_test]
    fn test_probe_caret_measures_mounted_surface() {
        let (textarea, mirror) = mount_probe_fixture();

        textarea.set_value("Hello @Mo");
        let pos = probe_caret(&textarea, &mirror, 9).expect("mounted probe should measure");

        // The anchor sits one line-height plus the menu gap below the first
        // line's top, and to the right of the text before the caret.
        assert!(pos.top.is_finite() && pos.left.is_finite());
        assert!(pos.top >= 20.0);
        assert!(pos.left > 0.0);

        unmount_probe_fixture(&textarea, &mirror);
    }

    #[wasm_bindgen_test]
    fn test_probe_caret_tracks_wrapped_lines() {
        let (textarea, mirror) = mount_probe_fixture();

        let text = "one two three four five six seven eight nine ten";
        textarea.set_value(text);
        let end = text.encode_utf16().count() as u32;

        let first = probe_caret(&textarea, &mirror, 1).expect("probe near text start");
        let last = probe_caret(&textarea, &mirror, end).expect("probe at text end");

        // At 160px the tail has wrapped onto a later line, so the anchor
        // follows the caret down while staying on the same x scale.
        assert!(last.top > first.top);
        assert!(first.left > 0.0 && last.left > 0.0);

        unmount_probe_fixture(&textarea, &mirror);
    }

    #[wasm_bindgen_test]
    fn test_preferences_storage_roundtrip() {
        remove_from_storage(PREFERENCES_KEY);
        assert!(load_preferences().is_none());

        let prefs = UserPreferences {
            username: "Sam".to_string(),
            ..Default::default()
        };
        save_preferences(&prefs);

        let loaded = load_preferences().expect("should load preferences from localStorage");
        assert_eq!(loaded.username, "Sam");

        remove_from_storage(PREFERENCES_KEY);
    }

    #[wasm_bindgen_test]
    fn test_draft_ring_caps_at_max() {
        remove_from_storage(DRAFTS_KEY);

        for i in 0..(MAX_DRAFTS + 1) {
            push_draft(&format!("d{i}"), &format!("entry {i}"));
        }

        let drafts = load_drafts();
        assert_eq!(drafts.len(), MAX_DRAFTS);
        // Newest first; the very first draft was evicted.
        assert_eq!(drafts[0].id, format!("d{MAX_DRAFTS}"));
        assert!(drafts.iter().all(|d| d.id != "d0"));

        delete_draft(&drafts[0].id.clone());
        assert_eq!(load_drafts().len(), MAX_DRAFTS - 1);

        remove_from_storage(DRAFTS_KEY);
    }

    #[wasm_bindgen_test]
    fn test_latest_analysis_roundtrip() {
        remove_from_storage(JOURNAL_ANALYSIS_KEY);

        let analysis = JournalAnalysis {
            wellness_metrics: Some(WellnessMetrics {
                wellness_score: 4,
                mood_trend: 80,
                total_entries: 3,
            }),
            ..Default::default()
        };
        save_latest_journal_analysis(&analysis);

        let stored = load_latest_journal_analysis().expect("analysis should round-trip");
        assert_eq!(
            stored.analysis.wellness_metrics.map(|w| w.wellness_score),
            Some(4)
        );

        remove_from_storage(JOURNAL_ANALYSIS_KEY);
    }

    #[wasm_bindgen_test]
    fn test_latest_questionnaire_analysis_roundtrip() {
        remove_from_storage(QUESTIONNAIRE_ANALYSIS_KEY);
        assert!(load_latest_questionnaire_analysis().is_none());

        let analysis = JournalAnalysis {
            ai_suggestions: Some(vec![Suggestion {
                text: "Take a short walk outside".to_string(),
                icon: "🚶".to_string(),
            }]),
            ..Default::default()
        };
        save_latest_questionnaire_analysis(&analysis);

        let stored =
            load_latest_questionnaire_analysis().expect("analysis should round-trip");
        assert_eq!(stored.analysis.ai_suggestions.map(|s| s.len()), Some(1));

        remove_from_storage(QUESTIONNAIRE_ANALYSIS_KEY);
    }
}
