use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::http_client;
use crate::config::Config;

pub const FALLBACK_QUOTES: [&str; 5] = [
    "You’re stronger than you think.",
    "Small progress is still progress.",
    "The only bad workout is the one you didn’t do.",
    "Discipline beats motivation every time.",
    "Be proud of every step you take.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutCategory {
    #[default]
    Push,
    Pull,
    Legs,
    Core,
}

impl WorkoutCategory {
    fn focus(self) -> &'static str {
        match self {
            Self::Push => "push (chest, shoulders, triceps)",
            Self::Pull => "pull (back, biceps)",
            Self::Legs => "legs (quads, hamstrings, glutes, calves)",
            Self::Core => "core (abs, obliques, lower back)",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub quote: String,
    pub source: String, // "gemini" or "fallback"
}

impl Quote {
    fn fallback() -> Self {
        let quote = FALLBACK_QUOTES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FALLBACK_QUOTES[0]);
        Self {
            quote: quote.to_string(),
            source: "fallback".into(),
        }
    }
}

/// Thin client for Gemini `generateContent`.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: http_client(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// One-line quote tuned to `mood`; blank mood or any failure yields a fallback.
    pub async fn motivational_quote(&self, mood: Option<&str>) -> Quote {
        let Some(mood) = mood.map(str::trim).filter(|m| !m.is_empty()) else {
            return Quote::fallback();
        };

        let prompt = format!(
            "Don't send anything else but a one line motivational quote based on this mood: \"{}\"",
            mood
        );

        match self.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => Quote {
                quote: text.trim().to_string(),
                source: "gemini".into(),
            },
            Ok(_) => {
                tracing::warn!("Gemini returned an empty quote, using fallback");
                Quote::fallback()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Gemini unavailable, using fallback quote");
                Quote::fallback()
            }
        }
    }

    /// Short "setsxreps exercise" list for `category`; empty on any failure.
    pub async fn workout_recommendation(&self, category: WorkoutCategory) -> Vec<String> {
        let prompt = format!(
            "Give me a short bullet list (4-5 lines) of exercises for a {} workout.\n\
             Each line must be in this format: \"[sets]x[reps] [exercise name]\".\n\
             Only output the bullet list, with one exercise per line, no extra text, no explanations.",
            category.focus()
        );

        match self.generate(&prompt).await {
            Ok(text) => parse_exercise_lines(&text),
            Err(e) => {
                tracing::warn!(error = %e, ?category, "Workout recommendation failed");
                Vec::new()
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, anyhow::Error> {
        if self.api_key.is_empty() {
            anyhow::bail!("GEMINI_API_KEY is not configured");
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error {}: {}", status, body);
        }

        let body: serde_json::Value = response.json().await?;
        extract_text(&body).ok_or_else(|| anyhow::anyhow!("Gemini response had no text"))
    }
}

fn extract_text(body: &serde_json::Value) -> Option<String> {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(String::from)
}

/// Keep only lines that look like `3x10 squats`, minus any bullet marker.
pub fn parse_exercise_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix(['-', '*', '•'])
                .unwrap_or(line)
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty() && has_sets_by_reps(line))
        .collect()
}

fn has_sets_by_reps(line: &str) -> bool {
    line.as_bytes()
        .windows(3)
        .any(|w| w[0].is_ascii_digit() && w[1] == b'x' && w[2].is_ascii_digit())
}
