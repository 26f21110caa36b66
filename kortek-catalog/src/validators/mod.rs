//! Validation layer
//!
//! Grades every record fetched from the upstream before it reaches a caller.
//!
//! # Modules
//! 1. **fields** - Scalar predicates (URL, image URL, slug, title)
//! 2. **record** - Generic schema-driven record validation engine
//! 3. **schemas** - Schema values for each catalog entity kind

pub mod fields;
pub mod record;
pub mod schemas;

pub use fields::{validate_image_url, validate_slug, validate_title, validate_url};
pub use record::{validate_items, FieldRule, Record, RecordSchema, Validation};
