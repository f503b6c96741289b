mod model;
mod repository;

pub use model::DocumentDB;
pub use repository::SqliteDocumentStore;
