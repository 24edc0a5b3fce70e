mod handler;
mod model;

pub use handler::search_memes;
pub use model::MemeSearchQuery;
