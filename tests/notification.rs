#![forbid(unsafe_code)]
use chrono::NaiveDate;
use insta::assert_snapshot;
use weekplan::{
    calendar,
    model::{DayPreference, Employee, ScheduleEntry, ShiftStatus, Workspace},
    notification::{
        prepare_days_off_message, prepare_schedule_message, prepare_work_day_reminders,
        MessageRenderer, TextMessages,
    },
};

fn week() -> [NaiveDate; 7] {
    calendar::week_dates(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap())
}

fn sample_workspace() -> Workspace {
    let alice = Employee::flexible("Alice").with_bounds(5, 2);
    let dates = calendar::iso_week_strings(&week());
    let pattern = [
        ShiftStatus::Work,
        ShiftStatus::Off,
        ShiftStatus::Work,
        ShiftStatus::Work,
        ShiftStatus::Off,
        ShiftStatus::ShortWork,
    ];
    let mut schedule: Vec<ScheduleEntry> = pattern
        .iter()
        .enumerate()
        .map(|(position, status)| {
            ScheduleEntry::new(alice.id.clone(), &dates[position], position, *status)
        })
        .collect();
    // heures absentes : valeur par défaut du week-end
    schedule[5].hours = None;

    let preferences = vec![
        DayPreference::new(alice.id.clone(), week()[1], true),
        DayPreference::new(alice.id.clone(), week()[4], true),
        DayPreference::new(alice.id.clone(), week()[3], false),
    ];

    Workspace {
        employees: vec![alice],
        preferences,
        schedule,
        ..Workspace::default()
    }
}

#[test]
fn weekly_schedule_message() {
    let ws = sample_workspace();
    let msg = prepare_schedule_message(&ws, "Alice", &week(), &TextMessages).unwrap();
    assert_eq!(msg.employee_name, "Alice");
    assert_snapshot!(msg.content, @r"
Planning de Alice
Semaine : 06.10 - 12.10

lun. 06.10 : travail (12 h)
mar. 07.10 : repos
mer. 08.10 : travail (12 h)
jeu. 09.10 : travail (12 h)
ven. 10.10 : repos
sam. 11.10 : travail (11 h)
dim. 12.10 : non planifié
");
}

#[test]
fn days_off_message_lists_selected_days_and_limit() {
    let ws = sample_workspace();
    let msg = prepare_days_off_message(&ws, "Alice", &week(), &TextMessages).unwrap();
    assert_snapshot!(msg.content, @r"
Repos demandés par Alice
Semaine : 06.10 - 12.10

- mar. 07.10
- ven. 10.10

Maximum de repos : 2
");
}

#[test]
fn days_off_message_without_selection() {
    let mut ws = sample_workspace();
    ws.preferences.clear();
    let msg = prepare_days_off_message(&ws, "Alice", &week(), &TextMessages).unwrap();
    assert!(msg.content.contains("Aucun repos demandé pour cette semaine."));
}

#[test]
fn schedule_message_requires_known_employee_and_entries() {
    let ws = sample_workspace();
    assert!(prepare_schedule_message(&ws, "Nobody", &week(), &TextMessages).is_err());

    let next = calendar::week_dates(calendar::next_week(week()[0]));
    assert!(prepare_schedule_message(&ws, "Alice", &next, &TextMessages).is_err());
}

#[test]
fn reminders_only_for_working_employees() {
    let ws = sample_workspace();
    let wednesday = week()[2];
    let reminders = prepare_work_day_reminders(&ws, wednesday, &TextMessages);
    assert_eq!(reminders.len(), 1);
    assert_eq!(
        reminders[0].content,
        "Rappel : Alice, tu travailles demain (mer. 08.10).\nDurée de la journée : 12 h.\n"
    );

    let saturday = prepare_work_day_reminders(&ws, week()[5], &TextMessages);
    assert!(saturday[0].content.contains("11 h"));

    assert!(prepare_work_day_reminders(&ws, week()[1], &TextMessages).is_empty());
    assert!(prepare_work_day_reminders(&ws, week()[6], &TextMessages).is_empty());
}

#[test]
fn schedule_ready_mentions_week_range() {
    let text = TextMessages.schedule_ready(&week());
    assert!(text.contains("06.10 - 12.10"));
}
