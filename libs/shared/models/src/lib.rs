pub mod auth;
pub mod de;
pub mod error;
pub mod pagination;

pub use error::AppError;
pub use pagination::Paginated;
