pub mod bucket;
pub mod window;

pub use bucket::{classify, classify_days, MaturityBucket};
pub use window::MaturityWindow;
