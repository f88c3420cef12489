pub mod department_handler;

pub use department_handler::{
    __path_assign_department, __path_get_department_complaints, __path_get_department_stats,
    __path_get_overview, assign_department, get_department_complaints, get_department_stats,
    get_overview,
};
