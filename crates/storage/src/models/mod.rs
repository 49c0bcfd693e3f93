mod category;
mod product;

pub use category::{Category, CategoryDetail, CategoryRef};
pub use product::Product;
