use planbook_core::{build_month_grid, days_in_month, CalendarEvent, EventDate, MonthGrid};

fn date(year: i32, month: u32, day: u32) -> EventDate {
    EventDate::new(year, month, day).unwrap()
}

fn event(id: &str, on: EventDate) -> CalendarEvent {
    CalendarEvent::with_id(id, format!("event {id}"), on)
}

fn today() -> EventDate {
    date(2024, 3, 15)
}

fn current_month_count(grid: &MonthGrid) -> usize {
    grid.cells()
        .iter()
        .filter(|cell| cell.belongs_to_current_month)
        .count()
}

#[test]
fn every_month_across_centuries_is_complete_weeks_with_true_day_count() {
    for year in [-401, -1, 0, 1, 1600, 1899, 1900, 2000, 2023, 2024, 2100, 9999] {
        for month in 0..12 {
            let grid = build_month_grid(year, month, &[], today()).unwrap();
            assert_eq!(grid.cells().len() % 7, 0, "{year}-{month} not whole weeks");
            assert_eq!(
                current_month_count(&grid),
                days_in_month(year, month) as usize,
                "{year}-{month} wrong day count"
            );
            assert!(grid.cells().len() <= 42);
        }
    }
}

#[test]
fn first_in_month_cell_sits_in_weekday_column_of_the_first() {
    for month in 0..12 {
        let grid = build_month_grid(2024, month, &[], today()).unwrap();
        let column = grid
            .cells()
            .iter()
            .position(|cell| cell.belongs_to_current_month)
            .unwrap();
        assert_eq!(column as u32, date(2024, month + 1, 1).weekday());
        assert_eq!(grid.cells()[column].day_number, 1);
    }
}

#[test]
fn leap_february_has_29_days_and_common_february_has_28() {
    let leap = build_month_grid(2024, 1, &[], today()).unwrap();
    assert_eq!(current_month_count(&leap), 29);

    let common = build_month_grid(2023, 1, &[], today()).unwrap();
    assert_eq!(current_month_count(&common), 28);
}

#[test]
fn january_2024_leads_with_sunday_december_31() {
    let grid = build_month_grid(2024, 0, &[], today()).unwrap();
    let leading: Vec<_> = grid
        .cells()
        .iter()
        .take_while(|cell| !cell.belongs_to_current_month)
        .collect();
    assert_eq!(leading.len(), 1);
    assert_eq!(leading[0].day_number, 31);
}

#[test]
fn february_2024_is_four_leading_29_days_two_trailing() {
    let grid = build_month_grid(2024, 1, &[], today()).unwrap();
    assert_eq!(grid.cells().len(), 35);

    let trailing: Vec<u32> = grid
        .cells()
        .iter()
        .rev()
        .take_while(|cell| !cell.belongs_to_current_month)
        .map(|cell| cell.day_number)
        .collect();
    assert_eq!(trailing, vec![2, 1]);
}

#[test]
fn today_is_marked_only_inside_its_month() {
    let march = build_month_grid(2024, 2, &[], date(2024, 3, 15)).unwrap();
    let marked: Vec<_> = march.cells().iter().filter(|cell| cell.is_today).collect();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].day_number, 15);
    assert!(marked[0].belongs_to_current_month);

    let april_today = build_month_grid(2024, 2, &[], date(2024, 4, 15)).unwrap();
    assert!(april_today.cells().iter().all(|cell| !cell.is_today));

    // April 2 shows as trailing spillover in March 2024 but is not highlighted.
    let spillover_today = build_month_grid(2024, 2, &[], date(2024, 4, 2)).unwrap();
    assert!(spillover_today.cells().iter().all(|cell| !cell.is_today));
}

#[test]
fn in_month_events_land_exactly_once_on_their_day() {
    let events = vec![
        event("a", date(2024, 3, 1)),
        event("b", date(2024, 3, 31)),
        event("c", date(2024, 3, 15)),
    ];
    let grid = build_month_grid(2024, 2, &events, today()).unwrap();

    for expected in &events {
        let hits: Vec<_> = grid
            .cells()
            .iter()
            .filter(|cell| cell.events.iter().any(|e| e.id == expected.id))
            .collect();
        assert_eq!(hits.len(), 1, "event {} placed {} times", expected.id, hits.len());
        assert_eq!(hits[0].day_number, expected.date.day());
        assert!(hits[0].belongs_to_current_month);
    }
}

#[test]
fn out_of_month_events_are_omitted_even_on_spillover_days() {
    let events = vec![
        event("prev", date(2024, 2, 29)),
        event("next", date(2024, 4, 1)),
        event("other-year", date(2023, 3, 10)),
        event("inside", date(2024, 3, 10)),
    ];
    let grid = build_month_grid(2024, 2, &events, today()).unwrap();

    let placed: Vec<&str> = grid
        .cells()
        .iter()
        .flat_map(|cell| cell.events.iter().map(|e| e.id.as_str()))
        .collect();
    assert_eq!(placed, vec!["inside"]);
    assert!(grid
        .cells()
        .iter()
        .filter(|cell| !cell.belongs_to_current_month)
        .all(|cell| cell.events.is_empty()));
}

#[test]
fn same_day_events_keep_arrival_order() {
    let day = date(2024, 3, 8);
    let events = vec![
        event("third", day),
        event("elsewhere", date(2024, 3, 9)),
        event("first", day),
        event("second", day),
    ];
    let grid = build_month_grid(2024, 2, &events, today()).unwrap();

    let cell = grid
        .month_days()
        .find(|cell| cell.day_number == 8)
        .unwrap();
    let ids: Vec<&str> = cell.events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["third", "first", "second"]);
}

#[test]
fn building_twice_yields_identical_grids() {
    let events = vec![event("a", date(2024, 3, 8)), event("b", date(2024, 3, 8))];
    let first = build_month_grid(2024, 2, &events, today()).unwrap();
    let second = build_month_grid(2024, 2, &events, today()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn extreme_years_build_without_overflow() {
    let min = build_month_grid(i32::MIN, 0, &[], today()).unwrap();
    assert_eq!(min.cells().len() % 7, 0);
    let max = build_month_grid(i32::MAX, 11, &[], today()).unwrap();
    assert_eq!(max.cells().len() % 7, 0);
}
