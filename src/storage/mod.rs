use crate::models::{JournalAnalysis, JournalDraft, StoredAnalysis, UserPreferences};
use crate::util::now_ms;
use serde::{Deserialize, Serialize};

pub(crate) const PREFERENCES_KEY: &str = "soulink_preferences";
pub(crate) const DRAFTS_KEY: &str = "soulink_journal_drafts";
pub(crate) const JOURNAL_ANALYSIS_KEY: &str = "soulink_latest_journal_analysis";
pub(crate) const QUESTIONNAIRE_ANALYSIS_KEY: &str = "soulink_latest_questionnaire_analysis";

/// Draft ring depth: newest first, oldest evicted.
pub(crate) const MAX_DRAFTS: usize = 10;

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
    let json = storage.get_item(key).ok().flatten()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(key, &json);
        }
    }
}

#[allow(dead_code)] // exercised by the wasm storage tests
pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.remove_item(key);
    }
}

/// Prepend `item` and truncate to `max`. The caller owns any dedup policy.
pub(crate) fn push_front_capped<T>(mut items: Vec<T>, item: T, max: usize) -> Vec<T> {
    items.insert(0, item);
    if items.len() > max {
        items.truncate(max);
    }
    items
}

pub(crate) fn load_drafts() -> Vec<JournalDraft> {
    load_json_from_storage::<Vec<JournalDraft>>(DRAFTS_KEY).unwrap_or_default()
}

pub(crate) fn push_draft(id: &str, content: &str) {
    if content.trim().is_empty() {
        return;
    }

    let item = JournalDraft {
        id: id.to_string(),
        content: content.to_string(),
        created_at_ms: now_ms(),
    };

    let next = push_front_capped(load_drafts(), item, MAX_DRAFTS);
    save_json_to_storage(DRAFTS_KEY, &next);
}

pub(crate) fn delete_draft(id: &str) {
    let mut drafts = load_drafts();
    let before = drafts.len();
    drafts.retain(|d| d.id != id);
    if drafts.len() != before {
        save_json_to_storage(DRAFTS_KEY, &drafts);
    }
}

pub(crate) fn load_preferences() -> Option<UserPreferences> {
    load_json_from_storage::<UserPreferences>(PREFERENCES_KEY)
}

pub(crate) fn save_preferences(prefs: &UserPreferences) {
    save_json_to_storage(PREFERENCES_KEY, prefs);
}

pub(crate) fn save_latest_journal_analysis(analysis: &JournalAnalysis) {
    save_json_to_storage(
        JOURNAL_ANALYSIS_KEY,
        &StoredAnalysis {
            saved_ms: now_ms(),
            analysis: analysis.clone(),
        },
    );
}

pub(crate) fn load_latest_journal_analysis() -> Option<StoredAnalysis> {
    load_json_from_storage::<StoredAnalysis>(JOURNAL_ANALYSIS_KEY)
}

pub(crate) fn save_latest_questionnaire_analysis(analysis: &JournalAnalysis) {
    save_json_to_storage(
        QUESTIONNAIRE_ANALYSIS_KEY,
        &StoredAnalysis {
            saved_ms: now_ms(),
            analysis: analysis.clone(),
        },
    );
}

pub(crate) fn load_latest_questionnaire_analysis() -> Option<StoredAnalysis> {
    load_json_from_storage::<StoredAnalysis>(QUESTIONNAIRE_ANALYSIS_KEY)
}

/// The more recently saved of two stored analyses.
pub(crate) fn freshest_analysis(
    a: Option<StoredAnalysis>,
    b: Option<StoredAnalysis>,
) -> Option<StoredAnalysis> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.saved_ms > a.saved_ms { b } else { a }),
        (a, b) => a.or(b),
    }
}

/// Latest locally stored analysis, whichever check-in produced it.
pub(crate) fn load_freshest_analysis() -> Option<StoredAnalysis> {
    freshest_analysis(
        load_latest_journal_analysis(),
        load_latest_questionnaire_analysis(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: &str) -> JournalDraft {
        JournalDraft {
            id: id.to_string(),
            content: format!("entry {id}"),
            created_at_ms: 0,
        }
    }

    fn stored(ms: i64) -> StoredAnalysis {
        StoredAnalysis {
            saved_ms: ms,
            analysis: JournalAnalysis::default(),
        }
    }

    #[test]
    fn test_freshest_analysis_picks_latest_side() {
        assert!(freshest_analysis(None, None).is_none());
        assert_eq!(
            freshest_analysis(Some(stored(5)), None).map(|s| s.saved_ms),
            Some(5)
        );
        assert_eq!(
            freshest_analysis(None, Some(stored(7))).map(|s| s.saved_ms),
            Some(7)
        );
        assert_eq!(
            freshest_analysis(Some(stored(5)), Some(stored(7))).map(|s| s.saved_ms),
            Some(7)
        );
        assert_eq!(
            freshest_analysis(Some(stored(9)), Some(stored(7))).map(|s| s.saved_ms),
            Some(9)
        );
    }

    #[test]
    fn test_push_front_capped_prepends() {
        let out = push_front_capped(vec![draft("a"), draft("b")], draft("c"), MAX_DRAFTS);
        assert_eq!(out[0].id, "c");
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_push_front_capped_evicts_oldest() {
        let mut items: Vec<JournalDraft> = vec![];
        for i in 0..MAX_DRAFTS {
            items = push_front_capped(items, draft(&i.to_string()), MAX_DRAFTS);
        }
        assert_eq!(items.len(), MAX_DRAFTS);
        assert_eq!(items.last().unwrap().id, "0");

        // The 11th insert drops the oldest, keeps newest-first order.
        let items = push_front_capped(items, draft("10"), MAX_DRAFTS);
        assert_eq!(items.len(), MAX_DRAFTS);
        assert_eq!(items[0].id, "10");
        assert!(items.iter().all(|d| d.id != "0"));
        assert_eq!(items.last().unwrap().id, "1");
    }
}
