//! Pure domain services.

mod identifier_resolver;

pub use identifier_resolver::IdentifierResolver;
