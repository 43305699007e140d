mod core;
mod types;

pub use self::core::{decide, Supervisor};
pub use types::*;

#[cfg(test)]
mod tests;
