pub mod normalized;
pub mod raw;

use anyhow::Result;

pub use normalized::{parse_count, TyphoonRecord};
pub use raw::RawTyphoon;

/// A per-year source of raw typhoon records.
///
/// The CWA HTTP client implements this; tests substitute canned data so the
/// loader can be exercised without network access.
#[allow(async_fn_in_trait)]
pub trait RecordSource {
    async fn records_for_year(&self, year: i32) -> Result<Vec<RawTyphoon>>;
}
