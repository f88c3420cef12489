pub mod complaint_handler;

pub use complaint_handler::{
    __path_get_complaint, __path_list_complaints, __path_resolve_complaint,
    __path_submit_complaint, __path_update_status, get_complaint, list_complaints,
    resolve_complaint, submit_complaint, update_status,
};
