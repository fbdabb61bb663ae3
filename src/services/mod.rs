//! Third-party collaborators: recipe lookup, generative text, workout plans.

pub mod gemini;
pub mod recipes;
pub mod workouts;

pub use gemini::{GeminiClient, WorkoutCategory};
pub use recipes::RecipeClient;

fn http_client() -> reqwest::Client {
    // 30-second ceiling so a stalled upstream never hangs a request
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap_or_default()
}
