//! Wire payload inputs
pub mod bundle;

pub use bundle::{
    PayloadError,
    TextBundle,
};
