use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::{Url, form_urlencoded};

use crate::error::ExerciseGuideError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const VIDEO_SEARCH_URL: &str = "https://www.youtube.com/results";

/// Instructions for one exercise, shown in the task detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseGuide {
    pub description: String,
    pub tips: Vec<String>,
    pub search_query: String,
}

impl ExerciseGuide {
    /// Shown when no credential is configured.
    #[must_use]
    pub fn unconfigured(exercise: &str) -> Self {
        Self {
            description:
                "API key not configured. Set FITNESS_AI_API_KEY to view exercise details."
                    .to_string(),
            tips: vec!["Check your environment variables.".to_string()],
            search_query: exercise.to_string(),
        }
    }

    /// Shown when the lookup fails for any reason.
    #[must_use]
    pub fn unavailable(exercise: &str) -> Self {
        Self {
            description: "Could not retrieve AI instructions at this time.".to_string(),
            tips: vec!["Try searching manually below.".to_string()],
            search_query: tutorial_query(exercise),
        }
    }

    /// Video search link for `search_query`, with the query form-encoded.
    #[must_use]
    pub fn video_search_url(&self) -> String {
        let query: String = form_urlencoded::byte_serialize(self.search_query.as_bytes()).collect();
        format!("{VIDEO_SEARCH_URL}?search_query={query}")
    }
}

fn tutorial_query(exercise: &str) -> String {
    format!("{exercise} exercise tutorial")
}

/// Source of exercise guides.
///
/// Implementations never fail: every error becomes a fallback guide.
#[async_trait]
pub trait ExerciseGuideProvider: Send + Sync {
    async fn guide(&self, exercise: &str) -> ExerciseGuide;
}

#[derive(Clone, Debug)]
pub struct ExerciseGuideConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl ExerciseGuideConfig {
    /// # Errors
    ///
    /// Returns `ExerciseGuideError::InvalidBaseUrl` if `base_url` is not an
    /// absolute http(s) URL.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ExerciseGuideError> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url)
            .map_err(|err| ExerciseGuideError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ExerciseGuideError::InvalidBaseUrl(base_url));
        }
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Read `FITNESS_AI_API_KEY`, `FITNESS_AI_BASE_URL` and `FITNESS_AI_MODEL`.
    ///
    /// Returns `Ok(None)` when no API key is set.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseGuideError::InvalidBaseUrl` for a malformed base URL.
    pub fn from_env() -> Result<Option<Self>, ExerciseGuideError> {
        let Some(api_key) = env::var("FITNESS_AI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
        else {
            return Ok(None);
        };
        let base_url =
            env::var("FITNESS_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = env::var("FITNESS_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Self::new(base_url, api_key, model).map(Some)
    }
}

/// Exercise guides from an OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct HttpExerciseGuideService {
    client: Client,
    config: Option<ExerciseGuideConfig>,
}

impl HttpExerciseGuideService {
    #[must_use]
    pub fn new(config: Option<ExerciseGuideConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Request a guide for `exercise`.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseGuideError` when the service is disabled, the request
    /// fails, or the response is empty or not a JSON object.
    pub async fn fetch(&self, exercise: &str) -> Result<ExerciseGuide, ExerciseGuideError> {
        let config = self.config.as_ref().ok_or(ExerciseGuideError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt(exercise),
            }],
            temperature: 0.2,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExerciseGuideError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ExerciseGuideError::EmptyResponse)?;

        parse_guide(exercise, &content)
    }
}

#[async_trait]
impl ExerciseGuideProvider for HttpExerciseGuideService {
    async fn guide(&self, exercise: &str) -> ExerciseGuide {
        if !self.enabled() {
            return ExerciseGuide::unconfigured(exercise);
        }
        match self.fetch(exercise).await {
            Ok(guide) => {
                debug!(exercise, "fetched exercise guide");
                guide
            }
            Err(err) => {
                warn!(exercise, error = %err, "exercise guide lookup failed");
                ExerciseGuide::unavailable(exercise)
            }
        }
    }
}

fn prompt(exercise: &str) -> String {
    format!(
        "Provide a brief instructional guide for the exercise: \"{exercise}\".\n\
         Return the response in JSON format with the following structure:\n\
         {{\n  \
           \"description\": \"A 1-2 sentence summary of the movement.\",\n  \
           \"tips\": [\"Tip 1\", \"Tip 2\", \"Tip 3 (Common mistake to avoid)\"],\n  \
           \"searchQuery\": \"The best youtube search query for this exercise\"\n\
         }}\n\
         Keep it concise and beginner-friendly."
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGuide {
    description: Option<String>,
    tips: Option<Vec<String>>,
    #[serde(rename = "searchQuery", alias = "search_query")]
    search_query: Option<String>,
}

/// Parse a model reply, filling missing or empty fields with defaults.
fn parse_guide(exercise: &str, content: &str) -> Result<ExerciseGuide, ExerciseGuideError> {
    let raw: RawGuide = serde_json::from_str(strip_code_fence(content))?;
    let present = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    Ok(ExerciseGuide {
        description: present(raw.description)
            .unwrap_or_else(|| format!("Perform {exercise} with proper form.")),
        tips: raw.tips.unwrap_or_default(),
        search_query: present(raw.search_query).unwrap_or_else(|| tutorial_query(exercise)),
    })
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_reply_is_used_verbatim() {
        let guide = parse_guide(
            "Goblet Squat",
            r#"{"description":"Hold a weight at your chest and squat.","tips":["Chest up","Knees out"],"searchQuery":"goblet squat form"}"#,
        )
        .unwrap();
        assert_eq!(guide.description, "Hold a weight at your chest and squat.");
        assert_eq!(guide.tips, vec!["Chest up", "Knees out"]);
        assert_eq!(guide.search_query, "goblet squat form");
    }

    #[test]
    fn missing_fields_default_individually() {
        let guide = parse_guide("Plank", r#"{"description":"","tips":null}"#).unwrap();
        assert_eq!(guide.description, "Perform Plank with proper form.");
        assert!(guide.tips.is_empty());
        assert_eq!(guide.search_query, "Plank exercise tutorial");
    }

    #[test]
    fn fenced_reply_is_unwrapped() {
        let guide = parse_guide("Plank", "```json\n{\"searchQuery\":\"plank how to\"}\n```").unwrap();
        assert_eq!(guide.search_query, "plank how to");
    }

    #[test]
    fn non_json_reply_is_an_error() {
        assert!(matches!(
            parse_guide("Plank", "Sure! Here is a guide."),
            Err(ExerciseGuideError::Malformed(_))
        ));
    }

    #[test]
    fn video_search_url_encodes_query() {
        let guide = ExerciseGuide::unavailable("Squat & Press");
        assert_eq!(
            guide.video_search_url(),
            "https://www.youtube.com/results?search_query=Squat+%26+Press+exercise+tutorial"
        );
        assert!(Url::parse(&guide.video_search_url()).is_ok());
    }

    #[test]
    fn unconfigured_guide_names_the_key_variable() {
        let guide = ExerciseGuide::unconfigured("Plank");
        assert!(guide.description.contains("FITNESS_AI_API_KEY"));
        assert!(!guide.description.contains("Gemini"));
    }

    #[test]
    fn config_rejects_bad_base_urls() {
        assert!(ExerciseGuideConfig::new("https://example.test/v1", "k", "m").is_ok());
        assert!(matches!(
            ExerciseGuideConfig::new("not a url", "k", "m"),
            Err(ExerciseGuideError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ExerciseGuideConfig::new("ftp://example.test", "k", "m"),
            Err(ExerciseGuideError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn unconfigured_service_explains_itself() {
        let service = HttpExerciseGuideService::new(None);
        assert!(!service.enabled());
        let guide = service.guide("Incline Push-ups").await;
        assert_eq!(guide, ExerciseGuide::unconfigured("Incline Push-ups"));
        assert_eq!(guide.search_query, "Incline Push-ups");
    }

    #[tokio::test]
    async fn unreachable_endpoint_falls_back() {
        let config = ExerciseGuideConfig::new("http://127.0.0.1:9/v1", "k", "m").unwrap();
        let service = HttpExerciseGuideService::new(Some(config));
        let guide = service.guide("Dead Bug").await;
        assert_eq!(guide, ExerciseGuide::unavailable("Dead Bug"));
        assert_eq!(guide.search_query, "Dead Bug exercise tutorial");
    }
}
