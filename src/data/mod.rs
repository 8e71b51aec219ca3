/// Data layer: core types, loading, cleaning, and label mapping.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ cleaner   │  trim / coerce / drop missing / dedup
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  mapper   │  raw label → Sentiment_Group column
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ features  │  Timestamp → calendar columns
///   └──────────┘
/// ```

pub mod cleaner;
pub mod features;
pub mod loader;
pub mod mapper;
pub mod model;
