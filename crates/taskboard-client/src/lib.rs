/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public task service client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod api;
pub mod http;
pub mod types;

// Re-export the service seam
pub use api::{ApiCall, ApiOperation, MockTaskApi, TaskApi};

// Re-export commonly used types from http
pub use http::{
    BASE_URL_ENV,
    ClientConfig,
    DEFAULT_BASE_URL,
    Result,
    TaskboardClient,
    TaskboardError,
};

// Re-export all types
pub use types::*;
