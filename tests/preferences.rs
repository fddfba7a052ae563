#![forbid(unsafe_code)]
use chrono::NaiveDate;
use weekplan::{
    calendar,
    model::{DayPreference, Employee, ScheduleSettings},
    preferences::{self, PreferenceError},
};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
}

#[test]
fn upsert_replaces_instead_of_accumulating() {
    let alice = Employee::flexible("Alice");
    let mut prefs: Vec<DayPreference> = Vec::new();

    preferences::upsert_preference(&mut prefs, &alice.id, date(7), true);
    preferences::upsert_preference(&mut prefs, &alice.id, date(7), false);
    preferences::upsert_preference(&mut prefs, &alice.id, date(7), true);

    assert_eq!(prefs.len(), 1);
    assert!(prefs[0].is_preferred);
    assert_eq!(prefs[0].date, "2025-10-07");
    assert_eq!(prefs[0].day_of_week, 1);
}

#[test]
fn upsert_collapses_existing_duplicates() {
    let alice = Employee::flexible("Alice");
    let mut prefs = vec![
        DayPreference::new(alice.id.clone(), date(8), true),
        DayPreference::new(alice.id.clone(), date(8), true),
    ];
    preferences::upsert_preference(&mut prefs, &alice.id, date(8), false);
    assert_eq!(prefs.len(), 1);
    assert!(!prefs[0].is_preferred);
}

#[test]
fn toggling_twice_leaves_a_single_record() {
    let employees = vec![Employee::flexible("Alice")];
    let id = employees[0].id.clone();
    let mut prefs = Vec::new();

    let first = preferences::toggle_preference(&employees, &mut prefs, &id, date(9)).unwrap();
    assert!(first.is_preferred);
    let second = preferences::toggle_preference(&employees, &mut prefs, &id, date(9)).unwrap();
    assert!(!second.is_preferred);
    assert_eq!(prefs.len(), 1);
}

#[test]
fn selecting_beyond_max_off_days_is_rejected() {
    // 5 jours max -> 2 repos demandables
    let employees = vec![Employee::flexible("Alice").with_bounds(5, 2)];
    let id = employees[0].id.clone();
    let mut prefs = Vec::new();

    preferences::set_preference(&employees, &mut prefs, &id, date(6), true).unwrap();
    preferences::set_preference(&employees, &mut prefs, &id, date(7), true).unwrap();
    // re-sélectionner un jour déjà choisi ne compte pas double
    preferences::set_preference(&employees, &mut prefs, &id, date(7), true).unwrap();

    let err = preferences::set_preference(&employees, &mut prefs, &id, date(8), true).unwrap_err();
    assert_eq!(err, PreferenceError::OffDaysLimitExceeded { max: 2 });

    let week = calendar::week_dates(date(6));
    assert_eq!(preferences::selected_off_days_count(&id, &prefs, &week), 2);
    assert!(!preferences::is_off_days_limit_exceeded(&employees[0], &prefs, &week));

    // un autre jour de la semaine suivante reste possible
    preferences::set_preference(&employees, &mut prefs, &id, date(13), true).unwrap();
    // retirer un souhait est toujours permis
    preferences::set_preference(&employees, &mut prefs, &id, date(6), false).unwrap();
    preferences::set_preference(&employees, &mut prefs, &id, date(8), true).unwrap();
}

#[test]
fn limit_exceeded_detects_imported_overflow() {
    let alice = Employee::flexible("Alice").with_bounds(6, 1);
    let prefs = vec![
        DayPreference::new(alice.id.clone(), date(6), true),
        DayPreference::new(alice.id.clone(), date(7), true),
        DayPreference::new(alice.id.clone(), date(20), true),
    ];
    let week = calendar::week_dates(date(6));
    assert_eq!(preferences::max_off_days_for_employee(&alice), 1);
    assert!(preferences::is_off_days_limit_exceeded(&alice, &prefs, &week));
}

#[test]
fn fixed_schedules_and_fixed_off_days_are_rejected() {
    let mut flexible = Employee::flexible("Bob");
    flexible.fixed_off_days.insert(6);
    let employees = vec![
        Employee::five_two("Carol"),
        Employee::fixed_custom("Dan", [0, 1, 2]),
        flexible,
    ];
    let mut prefs = Vec::new();

    for idx in 0..2 {
        let err = preferences::set_preference(
            &employees,
            &mut prefs,
            &employees[idx].id.clone(),
            date(7),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, PreferenceError::FixedSchedule(_)));
    }

    let bob = employees[2].id.clone();
    let err = preferences::set_preference(&employees, &mut prefs, &bob, date(12), true).unwrap_err();
    assert_eq!(
        err,
        PreferenceError::FixedOffDay {
            date: "2025-10-12".into()
        }
    );

    let stranger = weekplan::EmployeeId::new("nobody");
    let err = preferences::set_preference(&employees, &mut prefs, &stranger, date(7), true).unwrap_err();
    assert!(matches!(err, PreferenceError::UnknownEmployee(_)));
    assert!(prefs.is_empty());
}

#[test]
fn selection_window_closes_on_generation_day() {
    let settings = ScheduleSettings {
        auto_generation_enabled: true,
        auto_generation_day: 5,
        ..ScheduleSettings::default()
    };
    // vendredi 10, samedi 11
    assert!(preferences::is_day_off_selection_available(&settings, date(10)));
    assert!(!preferences::is_day_off_selection_available(&settings, date(11)));
    assert_eq!(
        preferences::ensure_selection_open(&settings, date(12)),
        Err(PreferenceError::SelectionClosed)
    );

    let disabled = ScheduleSettings {
        auto_generation_enabled: false,
        ..settings
    };
    assert!(preferences::is_day_off_selection_available(&disabled, date(12)));
}
