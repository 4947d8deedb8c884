use crate::models::{JournalAnalysis, MoodSummary, Suggestion, WellnessMetrics};
use serde::{Deserialize, Serialize};

/// The backend keys all per-user data by an opaque id; the app ships with a
/// single-profile default (no auth flow on these pages).
pub(crate) const DEFAULT_USER_ID: &str = "default_user";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        // Keep the transport detail out of the user-facing message.
        web_sys::console::debug_1(&format!("network error: {e}").into());
        Self {
            kind: ApiErrorKind::Network,
            message: "Could not connect to server. Please try again.".to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, fallback: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: http_error_message(status.as_u16(), &body, fallback),
        }
    }
}

/// Prefer the server-provided `error` string; fall back to a generic message.
pub(crate) fn http_error_message(status: u16, body: &str, fallback: &str) -> String {
    let server_error = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|e| e.as_str())
                .map(|s| s.to_string())
        })
        .filter(|s| !s.trim().is_empty());

    match server_error {
        Some(msg) => msg,
        None => format!("{fallback} ({status})"),
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://127.0.0.1:5000/api".to_string();

        // We support BOTH `window.ENV.API_URL` (documented) and
        // `window.ENV.api_url` (legacy/implementation detail) for compatibility.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    // 1) Preferred: API_URL
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }

                    // 2) Fallback: api_url
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_api_url() -> String {
    EnvConfig::new().api_url
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SaveJournalRequest {
    pub content: String,
    pub user_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct QuestionnaireRequest {
    pub answers: Vec<String>,
    pub user_id: String,
    pub submitted_at: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct WellnessResponse {
    pub wellness_data: WellnessMetrics,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_env() -> Self {
        Self::new(get_api_url())
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
        fallback: &str,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);

        let res = client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, fallback))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        user_id: &str,
        fallback: &str,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let url = format!(
            "{}{}?user_id={}",
            self.base_url,
            path,
            urlencoding::encode(user_id)
        );

        let res = client.get(url).send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, fallback))
        }
    }

    /// Persist a journal entry; the backend answers with its analysis envelope.
    pub async fn save_journal(&self, content: &str, user_id: &str) -> ApiResult<JournalAnalysis> {
        self.post_json(
            "/journal",
            &SaveJournalRequest {
                content: content.to_string(),
                user_id: user_id.to_string(),
            },
            "Failed to save journal entry",
        )
        .await
    }

    pub async fn submit_questionnaire(
        &self,
        answers: Vec<String>,
        user_id: &str,
        submitted_at: &str,
    ) -> ApiResult<JournalAnalysis> {
        self.post_json(
            "/questionnaire",
            &QuestionnaireRequest {
                answers,
                user_id: user_id.to_string(),
                submitted_at: submitted_at.to_string(),
            },
            "Failed to save responses",
        )
        .await
    }

    pub async fn get_todays_mood(&self, user_id: &str) -> ApiResult<MoodSummary> {
        self.get_json("/dashboard/mood", user_id, "Failed to load mood")
            .await
    }

    pub async fn get_suggestions(&self, user_id: &str) -> ApiResult<Vec<Suggestion>> {
        let data: SuggestionsResponse = self
            .get_json(
                "/dashboard/suggestions",
                user_id,
                "Failed to load suggestions",
            )
            .await?;
        Ok(data.suggestions)
    }

    pub async fn get_wellness(&self, user_id: &str) -> ApiResult<WellnessMetrics> {
        let data: WellnessResponse = self
            .get_json("/dashboard/wellness", user_id, "Failed to load wellness data")
            .await?;
        Ok(data.wellness_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_analysis_contract_deserialize() {
        // Contract based on the journal save endpoint.
        let json = r#"{
            "message": "Journal entry saved successfully",
            "sentiment_analysis": {"mood": "happy", "polarity": 0.4, "sentiment_label": "positive"},
            "ai_suggestions": [{"text": "Start your day with journaling", "icon": "📝"}],
            "wellness_metrics": {"wellness_score": 4, "mood_trend": 75, "total_entries": 8}
        }"#;

        let parsed: JournalAnalysis =
            serde_json::from_str(json).expect("analysis envelope should parse");

        let sentiment = parsed.sentiment_analysis.expect("sentiment present");
        assert_eq!(sentiment.mood, "happy");
        // Unmodelled fields survive in the flattened extra.
        assert_eq!(sentiment.extra["sentiment_label"], "positive");

        let suggestions = parsed.ai_suggestions.expect("suggestions present");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].text, "Start your day with journaling");

        let wellness = parsed.wellness_metrics.expect("wellness present");
        assert_eq!(wellness.wellness_score, 4);
        assert_eq!(wellness.mood_trend, 75);
        assert_eq!(wellness.total_entries, 8);
    }

    #[test]
    fn test_questionnaire_analysis_allows_missing_fields() {
        let parsed: JournalAnalysis =
            serde_json::from_str(r#"{"message": "ok"}"#).expect("sparse envelope should parse");
        assert!(parsed.sentiment_analysis.is_none());
        assert!(parsed.ai_suggestions.is_none());
        assert!(parsed.wellness_metrics.is_none());
    }

    #[test]
    fn test_mood_summary_contract_deserialize() {
        let json = r#"{"mood": "calm", "message": "You seem peaceful", "encouragement": "Keep going!"}"#;
        let parsed: MoodSummary = serde_json::from_str(json).expect("mood should parse");
        assert_eq!(parsed.mood, "calm");
    }

    #[test]
    fn test_wellness_envelope_contract_deserialize() {
        let json = r#"{"wellness_data": {"wellness_score": 3, "mood_trend": 50, "total_entries": 0}}"#;
        let parsed: WellnessResponse = serde_json::from_str(json).expect("wellness should parse");
        assert_eq!(parsed.wellness_data, WellnessMetrics::default());
    }

    #[test]
    fn test_save_request_serialization() {
        let req = SaveJournalRequest {
            content: "Dear Diary,".to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["content"], "Dear Diary,");
        assert_eq!(v["user_id"], "default_user");
    }

    #[test]
    fn test_questionnaire_request_serialization_includes_submitted_at() {
        let req = QuestionnaireRequest {
            answers: vec!["Agree".to_string(); 15],
            user_id: DEFAULT_USER_ID.to_string(),
            submitted_at: "2026-01-05T10:00:00.000Z".to_string(),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["answers"].as_array().map(|a| a.len()), Some(15));
        assert_eq!(v["submitted_at"], "2026-01-05T10:00:00.000Z");
    }

    #[test]
    fn test_http_error_message_prefers_server_error() {
        let msg = http_error_message(400, r#"{"error": "Journal content is required"}"#, "Failed");
        assert_eq!(msg, "Journal content is required");
    }

    #[test]
    fn test_http_error_message_falls_back_on_non_json() {
        let msg = http_error_message(502, "<html>Bad Gateway</html>", "Failed to save");
        assert_eq!(msg, "Failed to save (502)");
    }

    #[test]
    fn test_api_client_new() {
        let client = ApiClient::new("http://127.0.0.1:5000/api".to_string());
        assert_eq!(client.base_url, "http://127.0.0.1:5000/api");
    }
}
