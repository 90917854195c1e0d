pub mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{ApiClient, Responses};
pub use error::{ApiError, ProviderError};
pub use request::{ApiAction, ApiRequest};
pub use response::ActionResult;
pub use transport::{HttpTransport, Transport};
