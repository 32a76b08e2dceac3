//! News and ad endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use lodge_core::validate_required;
use lodge_db::repository::bulletin::{AdRecord, NewAd, NewNews, NewsRecord};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdRequest {
    pub title: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
}

pub async fn list_news(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<NewsRecord>>, ApiError> {
    let posts = state.db.bulletin().list_news(user.lodge_id).await?;
    Ok(Json(posts))
}

pub async fn create_news(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validate_required("title", request.title.as_deref())?;
    validate_required("content", request.content.as_deref())?;

    let news_id = state
        .db
        .bulletin()
        .create_news(NewNews {
            lodge_id: user.lodge_id,
            title: request.title.unwrap_or_default(),
            content: request.content.unwrap_or_default(),
            image_url: request.image_url,
            created_by: user.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "newsId": news_id }))))
}

pub async fn delete_news(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(news_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.db.bulletin().delete_news(user.lodge_id, news_id).await?;
    Ok(Json(json!({ "message": "News deleted" })))
}

pub async fn list_ads(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<Vec<AdRecord>>, ApiError> {
    let ads = state.db.bulletin().list_ads(user.lodge_id).await?;
    Ok(Json(ads))
}

pub async fn create_ad(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<CreateAdRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validate_required("title", request.title.as_deref())?;

    let ad_id = state
        .db
        .bulletin()
        .create_ad(NewAd {
            lodge_id: user.lodge_id,
            title: request.title.unwrap_or_default(),
            link: request.link,
            image_url: request.image_url,
            created_by: user.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "adId": ad_id }))))
}

pub async fn delete_ad(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(ad_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.db.bulletin().delete_ad(user.lodge_id, ad_id).await?;
    Ok(Json(json!({ "message": "Ad deleted" })))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::test_support::{auth_header, test_app};

    #[tokio::test]
    async fn news_create_and_list_carries_author() {
        let (app, state) = test_app().await;
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/news")
                    .header("authorization", auth_header(&state))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"title": "Pool closed", "content": "Maintenance until Friday"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/news")
                    .header("authorization", auth_header(&state))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), 8192).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let posts = body.as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["authorName"], "Asha Verma");
    }

    #[tokio::test]
    async fn news_without_content_is_400() {
        let (app, state) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/news")
                    .header("authorization", auth_header(&state))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"title": "Half a post"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_a_missing_ad_is_404() {
        let (app, state) = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/ads/42")
                    .header("authorization", auth_header(&state))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
