/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - full management of geography, respondents and surveys
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// SURVEY CONSTANTS
// =============================================================================

/// Lowest rating a respondent can give a question
pub const MIN_ANSWER_VALUE: i32 = 1;

/// Highest rating a respondent can give a question
pub const MAX_ANSWER_VALUE: i32 = 5;
