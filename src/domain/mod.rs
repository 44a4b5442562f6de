pub mod cook;
pub mod customer;
pub mod geo;
pub mod listing;
pub mod order;
pub mod role;

pub use cook::*;
pub use customer::*;
pub use geo::*;
pub use listing::*;
pub use order::*;
pub use role::*;
