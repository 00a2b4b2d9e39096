//! Share-link plumbing
//!
//! - `link`: pulling the `shareId` out of a share URL
//! - `client`: fetching share info from the remote API
//! - `response`: the share-info response body

mod client;
mod link;
mod response;

pub use client::*;
pub use link::*;
pub use response::*;
