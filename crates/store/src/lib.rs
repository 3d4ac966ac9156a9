pub mod repositories;

pub use repositories::{DigestStore, FileDigestStore, InMemoryDigestStore, StoreError};
