//! Turning channel history into a triage report

pub mod classify;
pub mod message;
pub mod rank;
pub mod section;

pub use classify::{Classifier, classify};
pub use message::{assemble, create};
pub use rank::rank;
pub use section::render_section;
