//! GraphQL adapters for the external services the gate depends on.
//!
//! - [`PortalClient`] talks to the Portal: challenge exchange, transaction
//!   execution and `supportsInterface` reads.
//! - [`IndexerClient`] reads the subgraph to pre-check batch items.
//!
//! Both share one [`GraphQlTransport`] implementation: `POST {query, variables}`
//! with an optional `x-auth-token` header, flattening GraphQL `errors` into
//! [`PortalError::GraphQl`].

pub mod documents;
pub mod error;
pub mod indexer;
pub mod portal;
pub mod transport;

pub use error::PortalError;
pub use indexer::IndexerClient;
pub use portal::PortalClient;
pub use transport::GraphQlTransport;
