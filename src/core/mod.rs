pub mod error;
pub mod types;
pub mod value;

pub use error::{DbError, Result};
pub use types::{DEFAULT_PAGE_SIZE, Page, PageRequest, RecordId};
pub use value::Value;
