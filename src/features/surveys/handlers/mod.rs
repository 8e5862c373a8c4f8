pub mod survey_handler;

pub use survey_handler::{
    __path_create_question, __path_create_survey, __path_delete_question, __path_delete_survey,
    __path_get_survey, __path_list_questions, __path_list_surveys, __path_update_question,
    __path_update_survey, create_question, create_survey, delete_question, delete_survey,
    get_survey, list_questions, list_surveys, update_question, update_survey,
};
