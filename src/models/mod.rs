mod production;

pub use production::{Production, ProductionType, SortBy};
