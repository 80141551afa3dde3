use chrono::NaiveDate;
use collabnet::model::{PersonStatus, ProjectRecord, TenureSource};
use collabnet::{infer_tenure, PipelineError};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reference() -> NaiveDate {
    date(2019, 6, 1)
}

#[test]
fn test_missing_end_is_imputed_within_reference() {
    let records = vec![
        ProjectRecord::new("alpha", "p1").with_dates(Some(date(2015, 1, 1)), Some(date(2015, 6, 1))),
        ProjectRecord::new("beta", "p2").with_dates(Some(date(2015, 1, 1)), None),
    ];
    let people = vec![
        PersonStatus::new("p1", false, Some("lab")),
        PersonStatus::new("p2", false, Some("lab")),
    ];
    let table = infer_tenure(&records, &people, reference()).unwrap();

    let p1 = table.get("p1").unwrap();
    assert_eq!(p1.inferred_duration_days, 151.0);
    assert_eq!(p1.source, TenureSource::Observed);

    let p2 = table.get("p2").unwrap();
    assert_eq!(p2.source, TenureSource::Imputed);
    let ceiling = (reference() - date(2015, 1, 1)).num_days() as f64;
    assert!(p2.inferred_duration_days <= ceiling);
    // Same features as the only training row
    assert!((p2.inferred_duration_days - 151.0).abs() < 1e-6);
    assert_eq!(table.summary.training_rows, 1);
    assert_eq!(table.summary.imputed_rows, 1);
}

#[test]
fn test_active_person_without_end_is_open_until_reference() {
    let records = vec![
        ProjectRecord::new("alpha", "departed").with_dates(Some(date(2012, 1, 1)), Some(date(2014, 1, 1))),
        ProjectRecord::new("beta", "current").with_dates(Some(date(2016, 9, 1)), None),
        ProjectRecord::new("gamma", "current").with_dates(None, None),
    ];
    let people = vec![
        PersonStatus::new("departed", false, Some("lab")),
        PersonStatus::new("current", true, Some("other-lab")),
    ];
    let table = infer_tenure(&records, &people, reference()).unwrap();

    let current = table.get("current").unwrap();
    assert_eq!(current.inferred_end, reference());
    assert_eq!(current.last_end, Some(reference()));
    assert_eq!(current.source, TenureSource::Active);
    assert_eq!(current.project_count, 2);
}

#[test]
fn test_unknown_status_person_is_imputed() {
    let records = vec![
        ProjectRecord::new("alpha", "ann").with_dates(Some(date(2012, 1, 1)), Some(date(2014, 1, 1))),
        ProjectRecord::new("beta", "stranger").with_dates(Some(date(2013, 1, 1)), None),
    ];
    let people = vec![PersonStatus::new("ann", false, Some("lab"))];
    let table = infer_tenure(&records, &people, reference()).unwrap();

    let stranger = table.get("stranger").unwrap();
    assert!(!stranger.is_currently_active);
    assert_eq!(stranger.group_label, None);
    assert_eq!(stranger.source, TenureSource::Imputed);
}

#[test]
fn test_regression_uses_group_and_elapsed_time() {
    // Two groups with different typical stays; elapsed time held constant
    let mut records = Vec::new();
    let mut people = Vec::new();
    for (i, (group, days)) in [("short", 200), ("short", 220), ("long", 900), ("long", 940)]
        .iter()
        .enumerate()
    {
        let id = format!("k{}", i);
        let start = date(2014, 1, 1);
        records.push(
            ProjectRecord::new(format!("proj{}", i), id.clone())
                .with_dates(Some(start), Some(start + chrono::Duration::days(*days))),
        );
        people.push(PersonStatus::new(id, false, Some(group)));
    }
    records.push(ProjectRecord::new("x", "u-short").with_dates(Some(date(2014, 1, 1)), None));
    records.push(ProjectRecord::new("y", "u-long").with_dates(Some(date(2014, 1, 1)), None));
    people.push(PersonStatus::new("u-short", false, Some("short")));
    people.push(PersonStatus::new("u-long", false, Some("long")));

    let table = infer_tenure(&records, &people, reference()).unwrap();
    let short = table.get("u-short").unwrap().inferred_duration_days;
    let long = table.get("u-long").unwrap().inferred_duration_days;
    assert!((short - 210.0).abs() < 1e-6, "short = {}", short);
    assert!((long - 920.0).abs() < 1e-6, "long = {}", long);
}

#[test]
fn test_observed_durations_never_need_clamping() {
    // Ends past the reference date are discarded first, so an observed
    // duration is at most the elapsed time since start
    let records = vec![
        ProjectRecord::new("a", "ann").with_dates(Some(date(2015, 1, 1)), Some(date(2016, 1, 1))),
        ProjectRecord::new("b", "bob").with_dates(Some(date(2019, 5, 1)), Some(date(2019, 5, 31))),
        ProjectRecord::new("c", "cat").with_dates(Some(date(2019, 5, 1)), Some(date(2019, 6, 1))),
    ];
    let people = vec![
        PersonStatus::new("ann", false, Some("g")),
        PersonStatus::new("bob", false, Some("g")),
        PersonStatus::new("cat", false, Some("g")),
    ];
    let table = infer_tenure(&records, &people, reference()).unwrap();
    assert_eq!(table.get("bob").unwrap().inferred_duration_days, 30.0);
    assert_eq!(table.get("cat").unwrap().inferred_end, reference());
    assert!(table.iter().all(|row| !row.clamped));
    assert_eq!(table.summary.clamped_rows, 0);
}

#[test]
fn test_imputed_duration_is_clamped_to_reference() {
    let records = vec![
        ProjectRecord::new("a", "ann").with_dates(Some(date(2010, 1, 1)), Some(date(2015, 1, 1))),
        ProjectRecord::new("b", "newcomer").with_dates(Some(date(2019, 5, 1)), None),
    ];
    let people = vec![
        PersonStatus::new("ann", false, Some("g")),
        PersonStatus::new("newcomer", false, Some("g")),
    ];
    let table = infer_tenure(&records, &people, reference()).unwrap();
    let newcomer = table.get("newcomer").unwrap();
    assert!(newcomer.clamped);
    assert_eq!(newcomer.inferred_duration_days, 31.0);
    assert_eq!(newcomer.inferred_end, reference());
    assert_eq!(table.summary.clamped_rows, 1);
}

#[test]
fn test_empty_training_subset_fails() {
    let records = vec![ProjectRecord::new("a", "ann").with_dates(Some(date(2015, 1, 1)), None)];
    let people = vec![PersonStatus::new("ann", false, Some("g"))];
    assert!(matches!(
        infer_tenure(&records, &people, reference()),
        Err(PipelineError::InsufficientData { .. })
    ));
}

#[test]
fn test_imputation_is_deterministic() {
    let records: Vec<ProjectRecord> = (0..20)
        .map(|i| {
            let start = date(2008 + (i % 7), 1 + (i as u32 % 12), 1);
            let end = if i % 3 == 0 { None } else { Some(start + chrono::Duration::days(100 + 61 * i as i64)) };
            ProjectRecord::new(format!("p{}", i % 6), format!("u{}", i)).with_dates(Some(start), end)
        })
        .collect();
    let people: Vec<PersonStatus> = (0..20)
        .map(|i| PersonStatus::new(format!("u{}", i), i % 9 == 0, Some(["a", "b", "c"][i as usize % 3])))
        .collect();

    let first = infer_tenure(&records, &people, reference()).unwrap();
    let second = infer_tenure(&records, &people, reference()).unwrap();
    assert_eq!(first, second);
}

fn person_strategy() -> impl Strategy<Value = (i64, Option<i64>, bool, usize, usize)> {
    (
        0i64..4200,
        prop::option::of(0i64..4000),
        any::<bool>(),
        0usize..4,
        1usize..4,
    )
}

proptest! {
    #[test]
    fn prop_windows_respect_bounds(people in prop::collection::vec(person_strategy(), 1..25)) {
        let base = date(2010, 1, 1);
        let groups = ["a", "b", "c", "d"];

        // Anchor row so a model can always be fitted
        let mut records = vec![
            ProjectRecord::new("anchor", "anchor").with_dates(Some(base), Some(date(2012, 1, 1))),
        ];
        let mut statuses = vec![PersonStatus::new("anchor", false, Some("a"))];

        for (i, (offset, length, active, group, projects)) in people.iter().enumerate() {
            let id = format!("u{}", i);
            let start = base + chrono::Duration::days(*offset);
            let end = length.map(|l| start + chrono::Duration::days(l));
            for j in 0..*projects {
                records.push(ProjectRecord::new(format!("p{}-{}", i, j), id.clone()).with_dates(Some(start), end));
            }
            statuses.push(PersonStatus::new(id, *active, Some(groups[*group])));
        }

        // People who only start after the reference date have no window
        let started = people
            .iter()
            .filter(|(offset, ..)| base + chrono::Duration::days(*offset) <= reference())
            .count();

        let table = infer_tenure(&records, &statuses, reference()).unwrap();
        prop_assert_eq!(table.len(), started + 1);
        for row in table.iter() {
            let ceiling = row.days_since_start(reference()) as f64;
            prop_assert!(ceiling >= 0.0);
            prop_assert!(row.inferred_duration_days <= ceiling);
            prop_assert!(row.inferred_duration_days >= 0.0);
            prop_assert!(row.inferred_end <= reference());
            prop_assert!(row.first_start <= row.inferred_end);
            if row.is_currently_active {
                prop_assert_eq!(row.inferred_end, reference());
            }
        }
    }
}
