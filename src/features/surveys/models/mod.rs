mod question;
mod survey;

pub use question::Question;
pub use survey::SurveyWithCount;
