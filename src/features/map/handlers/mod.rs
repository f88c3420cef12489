pub mod map_handler;

pub use map_handler::{__path_get_heatmap, __path_get_map_complaints, get_heatmap, get_map_complaints};
