pub mod result_handler;

pub use result_handler::{
    __path_delete_result, __path_get_result, __path_list_results, __path_submit_result,
    delete_result, get_result, list_results, submit_result,
};
