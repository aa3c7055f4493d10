//! Navigation: URL path to stack codec, and the router binding the two.

pub mod codec;
pub mod router;

pub use codec::{decode, encode};
pub use router::{Router, UrlPort};
