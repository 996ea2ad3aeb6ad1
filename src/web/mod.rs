//! Server-rendered pages
//!
//! - `handlers/`: askama page handlers, htmx-aware
//! - `markdown`: guide and FAQ copy to HTML

pub mod handlers;
pub mod markdown;
