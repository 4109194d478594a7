mod context;
mod grid;
mod handlers;
mod requests;
mod responses;

pub use context::AppContext;
pub use grid::parse_grid_query;
pub use handlers::*;
pub use requests::*;
pub use responses::*;
