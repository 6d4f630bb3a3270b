//! Gallery API adapters.

pub mod alt_text;
pub mod metadata_client;

pub use alt_text::{AltTextCatalog, AltTextError};
pub use metadata_client::{HttpMetadataClient, parse_records};
