pub mod survey_dto;

pub use survey_dto::{
    CreateQuestionDto, CreateSurveyDto, QuestionResponseDto, SurveyResponseDto, UpdateQuestionDto,
    UpdateSurveyDto,
};
