// Page generation: metadata, structured data, HTML and mail bodies.
// Pure functions over loaded content; nothing here does I/O.

pub mod email;
pub mod html;
pub mod meta;
pub mod render;
pub mod schema;

pub use meta::{OgType, PageMeta, TwitterCard, build_meta};
pub use schema::{ensure_valid_url, schema_for};
