//! Built-in middleware.
//!
//! | Middleware        | Halts | Purpose                                     |
//! |-------------------|-------|---------------------------------------------|
//! | [`RequestLog`]    | never | One tracing event per request               |
//! | [`RequestId`]     | never | Set `x-request-id` on the response (UUID v7) |
//! | [`RequireHeader`] | yes   | Reject requests missing a header            |

pub mod request_id;
pub mod request_log;
pub mod require_header;

pub use request_id::{RequestId, REQUEST_ID_HEADER};
pub use request_log::RequestLog;
pub use require_header::RequireHeader;
