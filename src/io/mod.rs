//! Input/output helpers.
//!
//! - JSON input loading (`json`)
//! - run location + validation, run registry (`runs`)
//! - CSV report writing (`export`)

pub mod export;
pub mod json;
pub mod runs;

pub use export::*;
pub use json::*;
pub use runs::*;
