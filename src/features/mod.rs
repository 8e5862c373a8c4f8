pub mod auth;
pub mod dashboard;
pub mod geography;
pub mod imports;
pub mod respondents;
pub mod results;
pub mod surveys;
