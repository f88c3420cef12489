mod department;
mod reassignment;

pub use department::Department;
pub use reassignment::{
    ReassignmentControl, REASSIGN_BUSY_MESSAGE, REASSIGN_FAILED_MESSAGE, SELECT_DEPARTMENT_MESSAGE,
};
