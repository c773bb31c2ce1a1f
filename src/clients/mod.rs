pub mod identity;
pub mod portal_client;

pub use identity::build_headers;
pub use portal_client::{PortalClient, PortalResponse};
