//! Month calendar printer.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the configured database.
//! - Print one month grid plus that month's events as plain text.
//!
//! Usage: `planbook [YEAR MONTH]`, with `MONTH` as 1..=12. Without arguments
//! the month containing today is shown.

use log::warn;
use planbook_core::db::open_db;
use planbook_core::{
    init_logging_from_config, CalendarService, CalendarViewState, Clock, CoreConfig, DayCell,
    MonthGrid, SqliteEventRepository, SystemClock, WEEKDAY_HEADERS,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CoreConfig::from_env();
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("planbook: logging disabled: {err}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&config, &args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!("event=cli_run module=cli status=error error={err}");
            eprintln!("planbook: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CoreConfig, args: &[String]) -> Result<String, String> {
    let clock = SystemClock;
    let view = match parse_view(args)? {
        Some(view) => view,
        None => CalendarViewState::containing(clock.today()),
    };

    let conn = open_db(&config.db_path).map_err(|err| format!("database open failed: {err}"))?;
    let repo = SqliteEventRepository::try_new(&conn)
        .map_err(|err| format!("event repository init failed: {err}"))?;
    let service = CalendarService::new(repo, clock);

    let grid = service
        .load_month(&config.user_id, view)
        .map_err(|err| err.to_string())?;
    Ok(render_month(&view, &grid))
}

fn parse_view(args: &[String]) -> Result<Option<CalendarViewState>, String> {
    match args {
        [] => Ok(None),
        [year, month] => {
            let year = year
                .parse::<i32>()
                .map_err(|_| format!("invalid year `{year}`"))?;
            let month = month
                .parse::<u32>()
                .ok()
                .filter(|month| (1..=12).contains(month))
                .ok_or_else(|| format!("invalid month `{month}`; expected 1..=12"))?;
            CalendarViewState::new(year, month - 1)
                .map(Some)
                .map_err(|err| err.to_string())
        }
        _ => Err("usage: planbook [YEAR MONTH]".to_string()),
    }
}

/// Renders the grid: spillover days in brackets, today with `*`, and a
/// `+N` suffix for days with events.
fn render_month(view: &CalendarViewState, grid: &MonthGrid) -> String {
    let mut lines = vec![
        view.title(),
        WEEKDAY_HEADERS
            .iter()
            .map(|name| format!("{name:>6}"))
            .collect(),
    ];
    lines.extend(grid.weeks().map(|week| {
        week.iter()
            .map(|cell| format!("{:>6}", cell_label(cell)))
            .collect::<String>()
    }));

    let events: Vec<_> = grid.month_days().flat_map(|cell| cell.events.iter()).collect();
    if !events.is_empty() {
        lines.push(String::new());
    }
    lines.extend(events.into_iter().map(|event| match &event.notes {
        Some(notes) => format!("{}  {} ({notes})", event.date.long_label(), event.title),
        None => format!("{}  {}", event.date.long_label(), event.title),
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn cell_label(cell: &DayCell) -> String {
    if !cell.belongs_to_current_month {
        return format!("[{}]", cell.day_number);
    }
    let marker = if cell.is_today { "*" } else { "" };
    match cell.events.len() {
        0 => format!("{marker}{}", cell.day_number),
        count => format!("{marker}{}+{count}", cell.day_number),
    }
}

#[cfg(test)]
mod tests {
    use super::{cell_label, parse_view, render_month};
    use planbook_core::{build_month_grid, CalendarEvent, CalendarViewState, DayCell, EventDate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_view_accepts_one_based_month() {
        let view = parse_view(&args(&["2024", "2"])).expect("valid args");
        assert_eq!(view, Some(CalendarViewState { year: 2024, month: 1 }));
        assert_eq!(parse_view(&[]).expect("no args"), None);
    }

    #[test]
    fn parse_view_rejects_bad_input() {
        assert!(parse_view(&args(&["2024", "13"])).is_err());
        assert!(parse_view(&args(&["2024", "0"])).is_err());
        assert!(parse_view(&args(&["year", "3"])).is_err());
        assert!(parse_view(&args(&["2024"])).is_err());
    }

    #[test]
    fn render_marks_spillover_today_and_events() {
        let day = EventDate::new(2024, 2, 14).expect("valid date");
        let events = vec![CalendarEvent::with_id("e-1", "Dinner", day).with_notes("8pm")];
        let today = EventDate::new(2024, 2, 1).expect("valid date");
        let grid = build_month_grid(2024, 1, &events, today).expect("grid");
        let view = CalendarViewState { year: 2024, month: 1 };

        let text = render_month(&view, &grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "February 2024");
        assert!(lines[1].contains("Sun"));
        assert!(lines[2].contains("[28]"));
        assert!(lines[2].contains("*1"));
        assert!(text.contains("14+1"));
        assert!(text.contains("Wednesday, February 14, 2024  Dinner (8pm)"));
    }

    #[test]
    fn cell_label_marks_spillover_today_and_event_count() {
        let cell = |day_number, belongs_to_current_month, is_today, events: usize| DayCell {
            day_number,
            belongs_to_current_month,
            is_today,
            events: (0..events)
                .map(|i| {
                    let day = EventDate::new(2024, 3, 1).expect("valid date");
                    CalendarEvent::with_id(format!("e-{i}"), "x", day)
                })
                .collect(),
        };
        assert_eq!(cell_label(&cell(29, false, false, 0)), "[29]");
        assert_eq!(cell_label(&cell(1, true, true, 0)), "*1");
        assert_eq!(cell_label(&cell(5, true, false, 2)), "5+2");
        assert_eq!(cell_label(&cell(7, true, true, 1)), "*7+1");
    }

    #[test]
    fn render_without_events_is_title_headers_and_weeks() {
        let today = EventDate::new(2024, 2, 1).expect("valid date");
        let grid = build_month_grid(2024, 1, &[], today).expect("grid");
        let view = CalendarViewState { year: 2024, month: 1 };

        let text = render_month(&view, &grid);
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 2 + grid.weeks().count());
        assert!(text.lines().all(|line| !line.is_empty()));
    }
}
