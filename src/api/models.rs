//! Model lookup: a closed set of names in the path

use crate::api::error::ApiError;
use axum::{
    extract::{rejection::PathRejection, Path},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    Alexnet,
    Resnet,
    Lenet,
}

impl ModelName {
    pub fn message(&self) -> &'static str {
        match self {
            ModelName::Alexnet => "Deep Learning FTW!",
            ModelName::Lenet => "LeCNN all the images",
            ModelName::Resnet => "Have some residuals",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ModelResponse {
    pub model_name: ModelName,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ModelIdResponse {
    pub model_id: i64,
    pub message: String,
}

/// GET /models/:model_name
pub async fn get_model(
    model_name: Result<Path<ModelName>, PathRejection>,
) -> Result<Json<ModelResponse>, ApiError> {
    let Path(model_name) = model_name.map_err(|e| ApiError::Validation(e.body_text()))?;
    Ok(Json(ModelResponse {
        model_name,
        message: model_name.message().to_string(),
    }))
}

/// GET /models/id/:model_id
#[deprecated(note = "look models up by name")]
pub async fn get_model_by_id(
    model_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ModelIdResponse>, ApiError> {
    let Path(model_id) = model_id.map_err(|e| ApiError::Validation(e.body_text()))?;
    Ok(Json(ModelIdResponse {
        model_id,
        message: ModelName::Resnet.message().to_string(),
    }))
}
