use chrono::NaiveDate;
use collabnet::model::TenureSource;
use collabnet::{JsonRecordStore, Pipeline, PipelineConfig, PipelineError, RecordStore};
use std::fs;
use tempfile::TempDir;

fn write_dataset(dir: &TempDir) {
    let active = r#"[
        {"slug": "alpha", "title": "Alpha", "start_on": "2016-01-01", "end_on": null,
         "people": ["ann@media.mit.edu", "bob@media.mit.edu", "visitor@gmail.com"], "groups": ["lab"]},
        {"slug": "scratch-in-practice", "title": "Scratch", "start_on": "2017-01-01", "end_on": "",
         "people": ["ann@media.mit.edu", "cat@media.mit.edu"]}
    ]"#;
    let inactive = r#"[
        {"slug": "beta", "title": "Beta", "start_on": "2014-02-01", "end_on": "2015-02-01",
         "people": ["ann@media.mit.edu", "cat@media.mit.edu", null]},
        {"slug": null, "title": "Orphan", "start_on": "2014-02-01", "people": ["dan@media.mit.edu"]},
        {"slug": "gamma", "title": "Gamma", "start_on": "2013-05-01", "end_on": "2014-05-01",
         "people": ["dan@media.mit.edu"]}
    ]"#;
    let people = r#"[
        {"USERNAME": "ann", "ML_STATUS": true, "ML_GROUP": "lab"},
        {"USERNAME": "bob", "ML_STATUS": false, "ML_GROUP": "lab"},
        {"USERNAME": "cat", "ML_STATUS": false, "ML_GROUP": "lab"},
        {"USERNAME": "dan", "ML_STATUS": false, "ML_GROUP": "other"}
    ]"#;
    fs::write(dir.path().join("projects-active.json"), active).unwrap();
    fs::write(dir.path().join("projects-inactive.json"), inactive).unwrap();
    fs::write(dir.path().join("people.json"), people).unwrap();
}

fn config() -> PipelineConfig {
    PipelineConfig {
        member_domain: Some("media.mit.edu".to_string()),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_json_store_flattens_and_filters_members() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir);
    let store = JsonRecordStore::new(dir.path()).with_member_domain(Some("media.mit.edu".into()));

    let records = store.project_records().unwrap();
    // visitor is not a member; null roster entry and slug-less project are dropped
    assert_eq!(records.len(), 7);
    assert!(records.iter().all(|r| r.person_id != "visitor@gmail.com" && r.person_id != "visitor"));
    assert!(records.iter().any(|r| r.project_slug == "alpha" && r.is_active));
    assert!(records.iter().any(|r| r.project_slug == "beta" && !r.is_active));

    let statuses = store.person_statuses().unwrap();
    assert_eq!(statuses.len(), 4);
}

#[test]
fn test_full_run() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir);
    let store = JsonRecordStore::new(dir.path()).with_member_domain(Some("media.mit.edu".into()));

    let output = Pipeline::new(config()).run(&store).unwrap();

    // Scratch is excluded: ann and cat only share beta
    assert_eq!(output.adjacency.weight("ann", "cat"), Some(1));
    assert_eq!(output.adjacency.weight("ann", "bob"), Some(1));
    assert_eq!(output.adjacency.weight("bob", "cat"), None);
    assert!(output.adjacency.targets("dan").is_none());

    let ann = output.tenure.get("ann").unwrap();
    assert_eq!(ann.source, TenureSource::Active);
    assert_eq!(ann.inferred_end, NaiveDate::from_ymd_opt(2019, 6, 1).unwrap());
    assert_eq!(ann.first_start, NaiveDate::from_ymd_opt(2014, 2, 1).unwrap());
    assert_eq!(ann.project_count, 3);

    // bob has no end date anywhere and has left: imputed
    assert_eq!(output.tenure.get("bob").unwrap().source, TenureSource::Imputed);
    assert_eq!(output.tenure.get("cat").unwrap().source, TenureSource::Observed);

    let subset = vec!["ann".to_string(), "cat".to_string()];
    let overlaps = Pipeline::new(config())
        .overlaps(&output.tenure, Some(subset.as_slice()))
        .unwrap();
    assert_eq!(overlaps.len(), 2);
    // cat's window (2014-02-01 .. 2015-02-01) lies inside ann's
    assert_eq!(overlaps[0].overlap_days, 365.0);
}

#[test]
fn test_corrupt_date_aborts_load() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir);
    fs::write(
        dir.path().join("projects-inactive.json"),
        r#"[{"slug": "beta", "start_on": "Feb 2014", "people": ["ann@media.mit.edu"]}]"#,
    )
    .unwrap();
    let store = JsonRecordStore::new(dir.path()).with_member_domain(Some("media.mit.edu".into()));
    assert!(matches!(store.project_records(), Err(PipelineError::DateParse { .. })));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let store = JsonRecordStore::new(dir.path());
    assert!(matches!(store.person_statuses(), Err(PipelineError::Io { .. })));
}

#[test]
fn test_config_file_drives_reference_date() {
    let dir = TempDir::new().unwrap();
    write_dataset(&dir);
    let path = dir.path().join("collabnet.yaml");
    fs::write(&path, "reference_date: 2018-01-01\nmember_domain: media.mit.edu\n").unwrap();

    let config = PipelineConfig::load(&path).unwrap();
    let store = JsonRecordStore::new(dir.path()).with_member_domain(config.member_domain.clone());
    let output = Pipeline::new(config).run(&store).unwrap();
    assert_eq!(
        output.tenure.get("ann").unwrap().inferred_end,
        NaiveDate::from_ymd_opt(2018, 1, 1).unwrap()
    );
}

#[test]
fn test_in_memory_store_run() {
    use collabnet::model::{DetailLevel, PersonStatus, ProjectRecord};
    use collabnet::InMemoryStore;

    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d);
    let mut store = InMemoryStore::new(
        vec![
            ProjectRecord::new("alpha", "ann").with_dates(date(2015, 1, 1), date(2016, 1, 1)),
            ProjectRecord::new("alpha", "bob").with_dates(date(2015, 3, 1), None),
        ],
        vec![PersonStatus::new("ann", false, Some("lab"))],
    );
    store.push_record(
        ProjectRecord::new("beta", "bob")
            .with_title("Beta")
            .with_dates(date(2016, 1, 1), None)
            .active(true),
    );
    store.push_status(PersonStatus::new("bob", false, Some("lab")));

    let config = PipelineConfig::default()
        .with_reference_date(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap())
        .with_detail_level(DetailLevel::Full);
    let output = Pipeline::new(config).run(&store).unwrap();

    assert_eq!(output.network.len(), 2);
    assert_eq!(output.network.detail_level(), DetailLevel::Full);
    assert_eq!(output.tenure.len(), 2);
    assert_eq!(output.tenure.reference_date, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
    assert_eq!(output.tenure.summary.training_rows, 1);
    assert!(store.project_records().unwrap().iter().any(|r| r.is_active));
}

#[test]
fn test_empty_store_has_insufficient_data() {
    let store = collabnet::InMemoryStore::default();
    assert!(matches!(
        Pipeline::default().run(&store),
        Err(PipelineError::InsufficientData { candidates: 0 })
    ));
}
