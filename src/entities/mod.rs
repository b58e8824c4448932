pub mod product;
pub mod stock_level;
pub mod store;
pub mod supplier;
pub mod supply;
