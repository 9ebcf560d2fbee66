pub mod claims;
pub mod errors;
pub mod handler;
pub mod policy;

pub use claims::TokenClaims;
pub use claims::TokenType;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use policy::TokenPolicy;
