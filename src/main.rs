use std::env;
use std::process;

use anyhow::{Context, Result};
use log::info;

use sentiment_prep::{
    add_time_features, assess_quality, clean_data, group_counts, load_data, map_sentiments,
    TIMESTAMP_COLUMN,
};

fn main() -> Result<()> {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: sentiment-prep <dataset.csv|dataset.json>");
        process::exit(2);
    };

    let raw = load_data(&path).with_context(|| format!("loading {path}"))?;
    let (rows, cols) = raw.shape();
    info!("dataset shape: {rows} x {cols} ({})", raw.column_names.join(", "));

    let report = assess_quality(&raw);

    let clean = clean_data(&raw)?;
    let mapped = map_sentiments(&clean)?;
    let enriched = if mapped.has_column(TIMESTAMP_COLUMN) {
        add_time_features(&mapped)?
    } else {
        mapped
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    println!();
    for (group, n) in group_counts(&enriched) {
        println!("{group:>14}  {n}");
    }
    println!();
    println!("rows: {} raw -> {} clean", raw.len(), enriched.len());
    Ok(())
}
