pub mod example;

pub use example::{Criterion, Example};
