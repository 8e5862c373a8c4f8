mod respondent;

pub use respondent::RespondentWithNames;
