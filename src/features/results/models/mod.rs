mod result;

pub use result::{SurveyAnswer, SurveyResultWithRespondent};
