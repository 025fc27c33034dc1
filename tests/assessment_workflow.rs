use chrono::{NaiveDate, TimeZone, Utc};
use readiness_check::history::{record, MAX_HISTORY};
use readiness_check::{
    report, trend, Answers, Category, HistoryStore, JsonFileHistory, MemoryHistory,
    ReadinessLevel, Trend,
};

fn answer_all(value_for: impl Fn(Category) -> u8) -> Answers {
    let engine = readiness_check::standard().expect("reference instrument is valid");
    let mut answers = Answers::new();
    for question in engine.catalog().questions() {
        answers
            .insert(engine.catalog(), &question.id, value_for(question.category))
            .expect("value is an option of every question");
    }
    answers
}

#[test]
fn repeated_attempts_show_a_trend() {
    let engine = readiness_check::standard().expect("reference instrument is valid");
    let mut store = MemoryHistory::new();
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();

    let first = engine.score(&answer_all(|_| 2));
    assert_eq!(first.overall_score, 50);
    assert_eq!(first.readiness_level, ReadinessLevel::Intermediate);
    record(&mut store, first, now).expect("memory store accepts entries");
    assert_eq!(trend(&store.read_all()), None);

    let second = engine.score(&answer_all(|category| match category {
        Category::Technical => 1,
        _ => 4,
    }));
    assert_eq!(second.overall_score, 78);
    record(&mut store, second, now).expect("memory store accepts entries");
    assert_eq!(trend(&store.read_all()), Some(Trend::Up));

    let third = engine.score(&answer_all(|category| match category {
        Category::Technical => 1,
        Category::Portfolio => 3,
        _ => 4,
    }));
    // 25 * 0.30 + 100 * 0.25 + 100 * 0.25 + 75 * 0.20 = 72.5
    assert_eq!(third.overall_score, 73);
    record(&mut store, third, now).expect("memory store accepts entries");
    assert_eq!(trend(&store.read_all()), Some(Trend::Stable));
}

#[test]
fn file_history_survives_reopen_and_stays_bounded() {
    let engine = readiness_check::standard().expect("reference instrument is valid");
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("history.json");

    {
        let mut store = JsonFileHistory::new(&path);
        for _ in 0..(MAX_HISTORY + 3) {
            record(&mut store, engine.score(&answer_all(|_| 3)), Utc::now())
                .expect("history file is writable");
        }
        record(&mut store, engine.score(&answer_all(|_| 1)), Utc::now())
            .expect("history file is writable");
    }

    let mut store = JsonFileHistory::new(&path);
    let entries = store.read_all();
    assert_eq!(entries.len(), MAX_HISTORY);
    assert_eq!(entries[0].result.overall_score, 25);
    assert_eq!(entries[1].result.overall_score, 75);
    assert_eq!(trend(&entries), Some(Trend::Down));

    store.clear().expect("history file is removable");
    assert!(store.read_all().is_empty());
    assert_eq!(trend(&store.read_all()), None);
}

#[test]
fn report_lists_every_category_and_step() {
    let engine = readiness_check::standard().expect("reference instrument is valid");
    let result = engine.score(&answer_all(|_| 2));
    let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    let text = report::render(&result, engine.catalog(), date);

    assert!(text.contains("Generated on January 2, 2026"));
    assert!(text.contains("Overall Interview Readiness Score: 50 / 100"));
    assert!(text.contains("Making Progress"));
    assert!(text.contains("Estimated prep time: 6-8 weeks"));
    for info in engine.catalog().categories() {
        assert!(text.contains(&format!("{} - 50%", info.label)));
    }
    for step in &result.next_steps {
        assert!(text.contains(step.as_str()));
    }
    assert_eq!(
        report::file_name(date),
        "interview-readiness-report-2026-01-02.txt"
    );
}
