//! Remote food search
//!
//! `GET /api/foods/search/{name}` answers with a single per-100g food record.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::MealCatalog;
use crate::api::{ApiClient, ApiError};
use crate::models::FoodItem;

#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    api: ApiClient,
}

impl RemoteCatalog {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MealCatalog for RemoteCatalog {
    fn source(&self) -> &'static str {
        "remote"
    }

    async fn find(&self, name: &str) -> Result<Option<FoodItem>, ApiError> {
        let query = name.trim();
        let url = self.api.endpoint(&["api", "foods", "search", query])?;
        tracing::debug!(%url, "Searching food");

        let response = self.api.http().get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ApiClient::rejection(response).await);
        }

        let item: FoodItem = response.json().await?;
        Ok(Some(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::extract::Path;
    use axum::http::StatusCode as HttpStatus;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn search(Path(name): Path<String>) -> Result<Json<Value>, (HttpStatus, String)> {
        match name.as_str() {
            "chicken breast" => Ok(Json(json!({
                "name": "chicken breast",
                "protein": 31.0,
                "fat": 3.6,
                "carbs": 0.0,
                "calories": 165
            }))),
            "broken" => Err((HttpStatus::INTERNAL_SERVER_ERROR, "search index offline".into())),
            _ => Err((HttpStatus::NOT_FOUND, String::new())),
        }
    }

    async fn spawn_backend() -> RemoteCatalog {
        let app = Router::new().route("/api/foods/search/:name", get(search));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api = ApiClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        RemoteCatalog::new(api)
    }

    #[tokio::test]
    async fn test_found() {
        let catalog = spawn_backend().await;
        let item = catalog.find("chicken breast").await.unwrap().unwrap();
        assert_eq!(item, FoodItem::new("chicken breast", 31.0, 3.6, 0.0, 165));
    }

    #[tokio::test]
    async fn test_not_found() {
        let catalog = spawn_backend().await;
        assert_eq!(catalog.find("unicorn").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_server_error() {
        let catalog = spawn_backend().await;
        let err = catalog.find("broken").await.unwrap_err();
        assert_eq!(err.user_message("Food search failed"), "search index offline");
    }
}
