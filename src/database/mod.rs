pub mod archive;
pub mod fingerprint;
pub mod rows;
pub mod schema;
pub mod session;

#[cfg(test)]
pub(crate) mod fixture;

pub use archive::Archive;
pub use session::Session;
