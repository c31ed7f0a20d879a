//! Building blocks shared by the HTTP modules

pub mod error;
pub mod path;
pub mod response;
pub mod validated_json;

pub use error::{ApiError, ApiResult};
pub use path::Path;
pub use response::{ApiResponse, MessageResponse};
pub use validated_json::{JsonBody, ValidatedJson};
