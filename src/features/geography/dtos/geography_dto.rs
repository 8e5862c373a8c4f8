use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::geography::models::{Province, Ward};

/// Query parameters for searching geography by name
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct GeographySearchQuery {
    /// Search by name (case-insensitive, partial match)
    #[param(example = "hà nội")]
    pub search: Option<String>,
}

/// Request DTO for creating a province
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProvinceDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Region must be 1-255 characters"))]
    pub region: String,
}

/// Request DTO for updating a province
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProvinceDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Region must be 1-255 characters"))]
    pub region: String,
}

/// Request DTO for creating a ward inside a province
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWardDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Request DTO for renaming a ward
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWardDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
}

/// Response DTO for province data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceResponseDto {
    pub id: Uuid,
    pub name: String,
    pub region: String,
}

impl From<Province> for ProvinceResponseDto {
    fn from(province: Province) -> Self {
        Self {
            id: province.id,
            name: province.name,
            region: province.region,
        }
    }
}

/// Response DTO for ward data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WardResponseDto {
    pub id: Uuid,
    pub name: String,
    pub province_id: Uuid,
}

impl From<Ward> for WardResponseDto {
    fn from(ward: Ward) -> Self {
        Self {
            id: ward.id,
            name: ward.name,
            province_id: ward.province_id,
        }
    }
}
