//! CrudService and request validation for campaigns.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::RequestValidator;
