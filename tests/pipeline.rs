use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use sentiment_prep::{
    add_time_features, clean_data, group_counts, load_data, map_sentiments, FieldValue,
    PipelineError, GROUP_COLUMN,
};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write test file");
    path
}

#[test]
fn load_matches_the_file_shape() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "posts.csv",
        "Text,Sentiment,Likes\n\
         loved it,Joy,10\n\
         awful,Anger,2\n\
         fine I guess,Neutral,0\n",
    );

    let ds = load_data(&path).unwrap();
    assert_eq!(ds.shape(), (3, 3));
    assert_eq!(ds.column_names, vec!["Text", "Sentiment", "Likes"]);
    assert_eq!(ds.records[0].get("Likes"), &FieldValue::Integer(10));
}

#[test]
fn missing_files_fail_before_any_other_stage() {
    let err = load_data("definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, PipelineError::FileNotFound(_)));
}

#[test]
fn ragged_rows_are_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "ragged.csv",
        "Text,Sentiment\n\
         ok,Joy\n\
         too,many,fields\n",
    );

    assert!(matches!(
        load_data(&path).unwrap_err(),
        PipelineError::Csv(_)
    ));
}

#[test]
fn empty_files_are_rejected() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "empty.csv", "");
    assert!(matches!(
        load_data(&path).unwrap_err(),
        PipelineError::EmptyData(_)
    ));
}

#[test]
fn unknown_extensions_are_rejected() {
    let dir = tempdir().unwrap();
    let path = write_file(&dir, "posts.parquet", "not really parquet");
    assert!(matches!(
        load_data(&path).unwrap_err(),
        PipelineError::UnsupportedFormat(_)
    ));
}

#[test]
fn unnamed_index_columns_are_dropped_on_load() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "saved.csv",
        "Unnamed: 0,Text,Sentiment\n\
         0,loved it,Joy\n\
         1,awful,Anger\n",
    );

    let ds = load_data(&path).unwrap();
    assert_eq!(ds.column_names, vec!["Text", "Sentiment"]);
    assert_eq!(ds.len(), 2);
}

#[test]
fn json_records_load_like_csv() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "posts.json",
        r#"[
            {"Text": "loved it", "Sentiment": "Joy", "Likes": 10},
            {"Text": "awful", "Sentiment": "Anger", "Likes": null}
        ]"#,
    );

    let ds = load_data(&path).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.records[0].get("Likes"), &FieldValue::Integer(10));
    assert_eq!(ds.records[1].get("Likes"), &FieldValue::Null);
}

#[test]
fn the_worked_example_cleans_and_maps() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "example.csv",
        "Text,Sentiment\n\
         I love this!,Happy \n\
         bad day,happy\n\
         bad day,happy\n",
    );

    let raw = load_data(&path).unwrap();
    assert_eq!(raw.len(), 3);

    let clean = clean_data(&raw).unwrap();
    assert_eq!(clean.len(), 2, "exact duplicate row should be dropped");

    let mapped = map_sentiments(&clean).unwrap();
    for rec in &mapped.records {
        assert_eq!(rec.get(GROUP_COLUMN), &FieldValue::String("Joy".into()));
    }
    assert_eq!(group_counts(&mapped)["Joy"], 2);
}

#[test]
fn rows_with_empty_required_fields_never_survive_cleaning() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "gaps.csv",
        "Text,Sentiment\n\
         kept,Joy\n\
         ,Joy\n\
         also kept,Sadness\n\
         dropped too,\n",
    );

    let clean = clean_data(&load_data(&path).unwrap()).unwrap();
    assert_eq!(clean.len(), 2);
    for rec in &clean.records {
        assert!(!rec.get("Text").is_null());
        assert!(!rec.get("Sentiment").is_null());
    }
}

#[test]
fn full_pipeline_with_timestamps() {
    let dir = tempdir().unwrap();
    let path = write_file(
        &dir,
        "timed.csv",
        "Text,Sentiment,Timestamp\n\
         good morning,Gratitude,2023-01-07 08:00:00\n\
         rough commute,Frustration,2023-01-09 17:30:00\n",
    );

    let mapped = map_sentiments(&clean_data(&load_data(&path).unwrap()).unwrap()).unwrap();
    let enriched = add_time_features(&mapped).unwrap();

    // 2023-01-07 is a Saturday, 2023-01-09 a Monday.
    assert_eq!(enriched.records[0].get("is_weekend"), &FieldValue::Integer(1));
    assert_eq!(enriched.records[1].get("is_weekend"), &FieldValue::Integer(0));
    assert_eq!(
        enriched.records[0].get(GROUP_COLUMN),
        &FieldValue::String("Joy".into())
    );
    assert_eq!(
        enriched.records[1].get(GROUP_COLUMN),
        &FieldValue::String("Anger".into())
    );
}
