//! Outbound ports - what the review service needs from the outside world.

mod review_api_port;
mod session_port;

pub use review_api_port::{ApiError, ReviewApiPort};
pub use session_port::{AccessToken, ActingUser, SessionPort};

#[cfg(test)]
pub use review_api_port::MockReviewApiPort;
#[cfg(test)]
pub use session_port::MockSessionPort;
