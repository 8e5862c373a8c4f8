pub mod respondent_dto;

pub use respondent_dto::{
    CreateRespondentDto, RespondentQueryParams, RespondentResponseDto, UpdateRespondentDto,
};
