//! Core retrieval building blocks: grid combinators, reflective and thermal
//! pipeline stages, persistence, and run parameters. These are the
//! primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
