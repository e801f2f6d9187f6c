pub mod price;
pub mod price_point;

pub use price::Price;
pub use price_point::PricePoint;
