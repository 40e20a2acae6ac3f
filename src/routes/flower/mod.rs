mod handler;
mod model;

pub use handler::{get_card, list_cards, list_types};
pub use model::{CATALOG_SIZE, CardResponse, Catalog, FlowerCard, FlowerType, ListResponse};
