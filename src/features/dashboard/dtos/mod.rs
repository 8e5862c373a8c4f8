pub mod dashboard_dto;

pub use dashboard_dto::{
    DashboardSummaryDto, ProvincePointDto, SatisfactionQuery, SatisfactionResponseDto,
    SummaryQuery,
};
