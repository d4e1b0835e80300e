pub mod charts;
pub mod load;
pub mod summarize;

pub use charts::charts;
pub use load::load;
pub use summarize::summarize;
