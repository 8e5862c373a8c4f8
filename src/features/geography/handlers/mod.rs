pub mod geography_handler;

pub use geography_handler::{
    __path_create_province, __path_create_ward, __path_delete_province, __path_delete_ward,
    __path_get_province, __path_get_ward, __path_import_provinces, __path_import_wards,
    __path_list_provinces, __path_list_wards, __path_update_province, __path_update_ward,
    create_province, create_ward, delete_province, delete_ward, get_province, get_ward,
    import_provinces, import_wards, list_provinces, list_wards, update_province, update_ward,
};
