//! Loading, cleaning, and sentiment-label mapping for social-media post
//! datasets.
//!
//! The pipeline is a chain of pure functions over an in-memory [`Dataset`]:
//!
//! ```no_run
//! use sentiment_prep::{clean_data, load_data, map_sentiments};
//!
//! # fn main() -> sentiment_prep::Result<()> {
//! let raw = load_data("data/sentimentdataset.csv")?;
//! let clean = clean_data(&raw)?;
//! let mapped = map_sentiments(&clean)?;
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;

pub use data::cleaner::{assess_quality, clean_data, QualityReport, REQUIRED_COLUMNS};
pub use data::features::{add_time_features, TIMESTAMP_COLUMN};
pub use data::loader::load_data;
pub use data::mapper::{
    group_counts, map_sentiments, map_sentiments_with, SentimentGroup, Taxonomy, GROUP_COLUMN,
    SENTIMENT_COLUMN,
};
pub use data::model::{Dataset, FieldValue, Record};
pub use error::{PipelineError, Result};
