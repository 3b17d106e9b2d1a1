//! Coordinate resolution
//!
//! Turns a raw location reference into coordinates: expand short links,
//! prefer literal coordinates, then fall back through geocoder candidates.

mod expand;
mod resolver;

pub use expand::{is_short_link, HttpRedirectResolver, LinkExpander, RedirectResolver};
pub use resolver::CoordinateResolver;
