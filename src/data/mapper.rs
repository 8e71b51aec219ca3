use std::collections::BTreeMap;
use std::fmt;

use log::info;

use super::model::{Dataset, FieldValue, Record};
use crate::error::{PipelineError, Result};

/// Column read by [`map_sentiments`].
pub const SENTIMENT_COLUMN: &str = "Sentiment";
/// Column written by [`map_sentiments`].
pub const GROUP_COLUMN: &str = "Sentiment_Group";

// ---------------------------------------------------------------------------
// SentimentGroup – the fixed target taxonomy
// ---------------------------------------------------------------------------

/// Broad sentiment categories the raw labels are collapsed onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SentimentGroup {
    Joy,
    Sadness,
    Anger,
    Fear,
    Guilt,
    NeutralOther,
}

impl SentimentGroup {
    pub const ALL: [SentimentGroup; 6] = [
        SentimentGroup::Joy,
        SentimentGroup::Sadness,
        SentimentGroup::Anger,
        SentimentGroup::Fear,
        SentimentGroup::Guilt,
        SentimentGroup::NeutralOther,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentGroup::Joy => "Joy",
            SentimentGroup::Sadness => "Sadness",
            SentimentGroup::Anger => "Anger",
            SentimentGroup::Fear => "Fear",
            SentimentGroup::Guilt => "Guilt",
            SentimentGroup::NeutralOther => "Neutral/Other",
        }
    }
}

impl fmt::Display for SentimentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Built-in raw-label table
// ---------------------------------------------------------------------------

// Raw labels observed in the source datasets, one slice per target group.
// Lookup is by normalized label (lowercased, whitespace collapsed).

const JOY_LABELS: &[&str] = &[
    "positive", "happiness", "joy", "love", "amusement", "enjoyment", "admiration",
    "affection", "awe", "adoration", "excitement", "kind", "pride", "elation",
    "euphoria", "contentment", "serenity", "gratitude", "hope", "empowerment",
    "compassion", "tenderness", "arousal", "enthusiasm", "fulfillment", "reverence",
    "hopeful", "proud", "grateful", "empathetic", "compassionate", "playful",
    "free-spirited", "inspired", "confident", "thrill", "overjoyed", "inspiration",
    "motivation", "satisfaction", "blessed", "appreciation", "confidence",
    "accomplishment", "wonderment", "optimism", "enchantment", "playfuljoy",
    "dreamchaser", "elegance", "whimsy", "harmony", "creativity", "radiance",
    "wonder", "rejuvenation", "coziness", "adventure", "melodic", "festivejoy",
    "freedom", "dazzle", "adrenaline", "artisticburst", "culinaryodyssey",
    "resilience", "spark", "marvel", "positivity", "kindness", "friendship",
    "success", "exploration", "amazement", "romance", "captivation", "tranquility",
    "grandeur", "energy", "celebration", "charm", "ecstasy", "colorful", "hypnotic",
    "connection", "iconic", "engagement", "touched", "triumph", "heartwarming",
    "breakthrough", "joy in baking", "imagination", "vibrancy", "mesmerizing",
    "culinary adventure", "winter magic", "thrilling journey", "nature's beauty",
    "celestial wonder", "creative inspiration", "runway creativity",
    "ocean's freedom", "relief", "mischievous", "happy", "joyfulreunion", "solace",
    "envisioning history",
];

const SADNESS_LABELS: &[&str] = &[
    "sadness", "disappointed", "despair", "grief", "loneliness", "melancholy",
    "yearning", "devastated", "heartbreak", "betrayal", "suffering",
    "emotionalstorm", "isolation", "disappointment", "lostlove", "exhaustion",
    "sorrow", "darkness", "desperation", "ruins", "desolation", "loss", "heartache",
    "solitude", "sympathy", "sad", "bittersweet",
];

const ANGER_LABELS: &[&str] = &[
    "negative", "anger", "disgust", "bitter", "resentment", "frustration",
    "jealousy", "envy", "bitterness", "jealous", "frustrated", "envious",
    "dismissive", "hate", "bad", "mean-spirited",
];

const FEAR_LABELS: &[&str] = &[
    "fear", "boredom", "anxiety", "intimidation", "helplessness", "fearful",
    "apprehensive", "overwhelmed", "suspense", "pressure", "obstacle", "challenge",
];

const GUILT_LABELS: &[&str] = &["shame", "regret", "embarrassed", "miscalculation"];

const NEUTRAL_LABELS: &[&str] = &[
    "neutral", "surprise", "acceptance", "anticipation", "calmness", "confusion",
    "curiosity", "indifference", "numbness", "nostalgia", "ambivalence",
    "determination", "contemplation", "reflection", "mindfulness", "pensive",
    "innerjourney", "immersion", "emotion", "journey", "renewed effort",
    "whispers of the past", "intrigue",
];

// ---------------------------------------------------------------------------
// Taxonomy – validated lookup table
// ---------------------------------------------------------------------------

/// Raw label → group lookup, validated at construction: the same
/// normalized key may not map to two different groups.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    map: BTreeMap<String, SentimentGroup>,
}

impl Taxonomy {
    /// The built-in table covering the labels observed in the source data.
    pub fn builtin() -> Result<Taxonomy> {
        let groups: [(&[&str], SentimentGroup); 6] = [
            (JOY_LABELS, SentimentGroup::Joy),
            (SADNESS_LABELS, SentimentGroup::Sadness),
            (ANGER_LABELS, SentimentGroup::Anger),
            (FEAR_LABELS, SentimentGroup::Fear),
            (GUILT_LABELS, SentimentGroup::Guilt),
            (NEUTRAL_LABELS, SentimentGroup::NeutralOther),
        ];
        Self::from_pairs(
            groups
                .iter()
                .flat_map(|&(labels, group)| labels.iter().map(move |&label| (label, group))),
        )
    }

    /// Build a taxonomy from (raw label, group) pairs.  Repeating a key with
    /// the same group is harmless; repeating it with a different group is a
    /// [`PipelineError::TaxonomyConflict`].
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, SentimentGroup)>,
    ) -> Result<Taxonomy> {
        let mut map: BTreeMap<String, SentimentGroup> = BTreeMap::new();
        for (raw, group) in pairs {
            let key = normalize_label(raw);
            if let Some(&existing) = map.get(&key) {
                if existing != group {
                    return Err(PipelineError::TaxonomyConflict {
                        label: key,
                        first: existing.as_str().to_string(),
                        second: group.as_str().to_string(),
                    });
                }
                continue;
            }
            map.insert(key, group);
        }
        Ok(Taxonomy { map })
    }

    /// Look up a raw label after normalization.
    pub fn lookup(&self, raw: &str) -> Option<SentimentGroup> {
        self.map.get(&normalize_label(raw)).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Case-insensitive, whitespace-normalized form used as the lookup key:
/// trimmed, lowercased, inner whitespace runs collapsed to one space.
fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Mapping stage
// ---------------------------------------------------------------------------

/// Add a `Sentiment_Group` column mapping each raw label onto the fixed
/// taxonomy, using the built-in table.
///
/// Labels the table does not know are TAGGED `Neutral/Other`; no row is
/// ever dropped here.  Every record therefore ends with a defined group.
pub fn map_sentiments(dataset: &Dataset) -> Result<Dataset> {
    let taxonomy = Taxonomy::builtin()?;
    map_sentiments_with(dataset, &taxonomy)
}

/// Same as [`map_sentiments`] but with a caller-supplied taxonomy.
pub fn map_sentiments_with(dataset: &Dataset, taxonomy: &Taxonomy) -> Result<Dataset> {
    if !dataset.has_column(SENTIMENT_COLUMN) {
        return Err(PipelineError::MissingColumn(SENTIMENT_COLUMN.to_string()));
    }

    let mut counts: BTreeMap<SentimentGroup, usize> = BTreeMap::new();
    let records: Vec<Record> = dataset
        .records
        .iter()
        .map(|rec| {
            let group = match rec.get(SENTIMENT_COLUMN) {
                FieldValue::String(raw) => taxonomy
                    .lookup(raw)
                    .unwrap_or(SentimentGroup::NeutralOther),
                _ => SentimentGroup::NeutralOther,
            };
            *counts.entry(group).or_default() += 1;

            let mut rec = rec.clone();
            rec.insert(GROUP_COLUMN, FieldValue::String(group.as_str().to_string()));
            rec
        })
        .collect();

    let summary: Vec<String> = counts
        .iter()
        .map(|(group, n)| format!("{group}: {n}"))
        .collect();
    info!("sentiment groups: {}", summary.join(", "));

    let mut column_names = dataset.column_names.clone();
    if !column_names.iter().any(|c| c == GROUP_COLUMN) {
        column_names.push(GROUP_COLUMN.to_string());
    }
    Ok(Dataset::new(column_names, records))
}

/// Occurrences of each group name in the mapped column.
pub fn group_counts(dataset: &Dataset) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for rec in &dataset.records {
        if let Some(group) = rec.get(GROUP_COLUMN).as_str() {
            *counts.entry(group.to_string()).or_default() += 1;
        }
    }
    counts
}
