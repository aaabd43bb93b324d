//! Categories classify transactions and serve as defaults for accounts and vendors.

mod core;
mod endpoints;
mod service;

pub use core::{Category, CategoryId, NewCategory};
pub use endpoints::{
    create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
    get_category_endpoint,
};
pub use service::{CategoryLookup, CategoryService};
