//! Service layer
//!
//! Authentication (JWT issuing and password hashing) and the logbook
//! generators that fill diaries with synthetic readings.

pub mod auth;
pub mod logbook;

pub use auth::{AuthError, AuthService, Claims, JwtManager, TOKEN_ISSUER};
pub use logbook::{today, GenerationSummary, LogbookService, LogbookSettings};
