pub mod result_dto;

pub use result_dto::{
    AnswerInputDto, AnswerResponseDto, SubmitResultDto, SurveyResultDetailDto, SurveyResultDto,
};
