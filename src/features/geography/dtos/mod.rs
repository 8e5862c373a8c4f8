pub mod geography_dto;

pub use geography_dto::{
    CreateProvinceDto, CreateWardDto, GeographySearchQuery, ProvinceResponseDto, UpdateProvinceDto,
    UpdateWardDto, WardResponseDto,
};
