//! Item endpoints: body, path, query and header parameters

use crate::api::error::ApiError;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

const QUERY_MIN_LEN: usize = 3;
const QUERY_MAX_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub tax: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateItemResponse {
    pub item_id: i64,
    pub header: Option<String>,
    #[serde(flatten)]
    pub item: Item,
}

#[derive(Debug, Deserialize)]
pub struct ReadItemParams {
    pub include_name: Option<bool>,
    pub include_create_date: Option<bool>,
    pub include_location: Option<bool>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ReadItemResponse {
    pub item_id: i64,
    pub include_name: bool,
    pub include_create_date: bool,
    pub include_location: Option<bool>,
    pub query: Option<String>,
}

/// POST /items/
pub async fn create_item(
    payload: Result<Json<Item>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let Json(mut item) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    item.id = Some("1".to_string());
    Ok(Json(item))
}

/// PUT /items/:item_id
pub async fn update_item(
    item_id: Result<Path<i64>, PathRejection>,
    headers: HeaderMap,
    payload: Result<Json<Item>, JsonRejection>,
) -> Result<Json<UpdateItemResponse>, ApiError> {
    let Path(item_id) = item_id.map_err(|e| ApiError::Validation(e.body_text()))?;
    let Json(item) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;

    let header = headers
        .get("x-token")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Ok(Json(UpdateItemResponse {
        item_id,
        header,
        item,
    }))
}

/// GET /items/:item_id
pub async fn read_item(
    item_id: Result<Path<i64>, PathRejection>,
    params: Result<Query<ReadItemParams>, QueryRejection>,
) -> Result<Json<ReadItemResponse>, ApiError> {
    let Path(item_id) = item_id.map_err(|e| ApiError::Validation(e.body_text()))?;
    let Query(params) = params.map_err(|e| ApiError::Validation(e.body_text()))?;

    let include_name = params
        .include_name
        .ok_or_else(|| ApiError::Validation("include_name: field required".to_string()))?;

    if let Some(query) = &params.query {
        let len = query.chars().count();
        if !(QUERY_MIN_LEN..=QUERY_MAX_LEN).contains(&len) {
            return Err(ApiError::Validation(format!(
                "query: length must be between {QUERY_MIN_LEN} and {QUERY_MAX_LEN}, got {len}"
            )));
        }
    }

    Ok(Json(ReadItemResponse {
        item_id,
        include_name,
        include_create_date: params.include_create_date.unwrap_or(true),
        include_location: params.include_location,
        query: params.query,
    }))
}
