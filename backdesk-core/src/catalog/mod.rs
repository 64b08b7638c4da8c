//! Product catalog: the protected resource behind the authorization gate.

pub mod product;
pub mod service;

pub use product::{CatalogError, Product};
pub use service::{CatalogService, CreateProductCommand, UpdateProductCommand};
