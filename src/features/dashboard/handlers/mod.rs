pub mod dashboard_handler;

pub use dashboard_handler::{
    __path_export_satisfaction, __path_get_satisfaction, __path_get_summary, export_satisfaction,
    get_satisfaction, get_summary,
};
