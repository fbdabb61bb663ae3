use serde::{Deserialize, Serialize};

use super::http_client;
use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub ingredients: Vec<String>,
    pub source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeInformation {
    title: String,
    image: Option<String>,
    ready_in_minutes: Option<u32>,
    servings: Option<u32>,
    #[serde(default)]
    extended_ingredients: Vec<RecipeIngredient>,
    source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecipeIngredient {
    original: String,
}

#[derive(Debug, Deserialize)]
struct RandomRecipes {
    #[serde(default)]
    recipes: Vec<RecipeInformation>,
}

#[derive(Debug, Deserialize)]
struct IngredientMatch {
    id: u64,
}

impl From<RecipeInformation> for Meal {
    fn from(info: RecipeInformation) -> Self {
        Self {
            title: info.title,
            image: info.image,
            ready_in_minutes: info.ready_in_minutes,
            servings: info.servings,
            ingredients: info
                .extended_ingredients
                .into_iter()
                .map(|i| i.original)
                .collect(),
            source_url: info.source_url,
        }
    }
}

/// Spoonacular recipe lookup.
#[derive(Clone)]
pub struct RecipeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl RecipeClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: http_client(),
            api_key: config.spoonacular_api_key.clone(),
            base_url: config.spoonacular_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// A recipe built from `groceries` when possible, otherwise a random one
    /// that avoids `allergies`. `Ok(None)` means nothing matched.
    pub async fn suggest_meal(
        &self,
        groceries: &[String],
        allergies: &[String],
    ) -> Result<Option<Meal>, anyhow::Error> {
        if self.api_key.is_empty() {
            anyhow::bail!("SPOONACULAR_API_KEY is not configured");
        }

        if !groceries.is_empty() {
            let matches: Vec<IngredientMatch> = self
                .get_json(
                    "/recipes/findByIngredients",
                    &[("ingredients", groceries.join(",")), ("number", "1".into())],
                )
                .await?;

            if let Some(first) = matches.first() {
                let info: RecipeInformation = self
                    .get_json(&format!("/recipes/{}/information", first.id), &[])
                    .await?;
                return Ok(Some(info.into()));
            }
            tracing::debug!("No recipe matched groceries, trying a random one");
        }

        self.random_meal(allergies).await
    }

    async fn random_meal(&self, allergies: &[String]) -> Result<Option<Meal>, anyhow::Error> {
        let mut params = vec![("number", "1".to_string())];
        if !allergies.is_empty() {
            params.push(("excludeIngredients", allergies.join(",")));
        }

        let random: RandomRecipes = self.get_json("/recipes/random", &params).await?;
        Ok(random.recipes.into_iter().next().map(Meal::from))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, anyhow::Error> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Spoonacular API error {}: {}", status, body);
        }

        Ok(response.json().await?)
    }
}
