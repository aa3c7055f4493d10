//! Static UI-resource fixture and the composer that merges it with server
//! resource schemas into the unified registry.

pub mod compose;
pub mod fixture;
pub mod menu;

pub use compose::{ResourceRegistry, compose, compose_fixture};
pub use fixture::{Fixture, FixtureEntry, FixtureError, default_fixture, parse_fixture};
pub use menu::default_menu;
