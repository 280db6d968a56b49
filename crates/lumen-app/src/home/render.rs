//! Text rendering of the home page.

use std::fmt::Write;

use lumen_core::models::{format_wire_date, DailyPrediction, DateRange};

use super::state::{FileView, PredictPhase};
use crate::notifications::Notification;

pub const TITLE: &str = "Lumen App Frontend";

/// Everything the page shows, captured at one instant.
#[derive(Debug, Clone)]
pub struct HomeView {
    pub file: FileView,
    pub dates: DateRange,
    pub phase: PredictPhase,
    pub predict_enabled: bool,
    pub notifications: Vec<Notification>,
}

pub fn render(view: &HomeView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(TITLE.len()));

    match &view.file {
        FileView::FileReady(name) => {
            let _ = writeln!(out, "File: {name}  [download] [delete]");
        }
        FileView::NoFile => {
            let _ = writeln!(out, "File: none  [upload .parquet]");
        }
    }

    let _ = writeln!(out, "Start date: {}", date_or_dash(view.dates.start));
    let _ = writeln!(out, "End date:   {}", date_or_dash(view.dates.end));
    let _ = writeln!(
        out,
        "[predict] {}",
        if view.predict_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    match &view.phase {
        PredictPhase::Loading => {
            let _ = writeln!(out, "Loading predictions...");
        }
        PredictPhase::Done(days) => {
            for day in days {
                render_day(&mut out, day);
            }
        }
        PredictPhase::Idle | PredictPhase::Failed => {}
    }

    if !view.notifications.is_empty() {
        let _ = writeln!(out, "--");
        for n in &view.notifications {
            let _ = writeln!(out, "[{}] {}", n.kind, n.message);
        }
    }
    out
}

fn render_day(out: &mut String, day: &DailyPrediction) {
    let heading = day
        .calendar_day()
        .map(format_wire_date)
        .unwrap_or_else(|| day.date.clone());
    let _ = writeln!(out, "{heading}");
    for p in &day.predictions {
        let _ = writeln!(out, "  Room id {} : {}", p.room_id, p.room_cnt);
    }
}

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map(format_wire_date).unwrap_or_else(|| "--".to_string())
}
