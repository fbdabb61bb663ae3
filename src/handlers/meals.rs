use axum::{extract::State, Json};

use crate::dto::{LookupStatus, MealSuggestionResponse};
use crate::AppState;

/// Suggest a meal from the saved groceries, avoiding saved allergies.
pub async fn get_meal_suggestion(State(state): State<AppState>) -> Json<MealSuggestionResponse> {
    let settings = state.store.load_settings().await.unwrap_or_default();

    let response = match state
        .recipes
        .suggest_meal(&settings.grocery_list(), &settings.allergy_list())
        .await
    {
        Ok(Some(meal)) => MealSuggestionResponse {
            status: LookupStatus::Ok,
            meal: Some(meal),
        },
        Ok(None) => MealSuggestionResponse {
            status: LookupStatus::NotFound,
            meal: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Recipe lookup failed");
            MealSuggestionResponse {
                status: LookupStatus::Unavailable,
                meal: None,
            }
        }
    };

    Json(response)
}
