pub mod respondent_handler;

pub use respondent_handler::{
    __path_create_respondent, __path_delete_respondent, __path_get_respondent,
    __path_import_respondents, __path_list_respondents, __path_update_respondent,
    create_respondent, delete_respondent, get_respondent, import_respondents, list_respondents,
    update_respondent,
};
