//! Explicit page state: file view, prediction phase, and the predict guard.

use lumen_core::models::{DailyPrediction, DateRange, FileState};

/// What the file section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileView {
    NoFile,
    FileReady(String),
}

impl FileView {
    /// Derived from the last known file state; unknown means no file.
    pub fn from_state(state: Option<&FileState>) -> Self {
        match state {
            Some(s) if s.exists => Self::FileReady(s.display_name().to_string()),
            _ => Self::NoFile,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::FileReady(_))
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::FileReady(name) => Some(name),
            Self::NoFile => None,
        }
    }
}

/// Lifecycle of the prediction request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictPhase {
    #[default]
    Idle,
    Loading,
    Done(Vec<DailyPrediction>),
    /// Last request failed; predictions are cleared and predict is allowed again.
    Failed,
}

impl PredictPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn predictions(&self) -> &[DailyPrediction] {
        match self {
            Self::Done(days) => days,
            _ => &[],
        }
    }
}

/// Predict is enabled iff a file exists, both dates are set, and nothing is
/// loading.
pub fn predict_enabled(file: &FileView, dates: &DateRange, phase: &PredictPhase) -> bool {
    file.is_ready() && dates.complete().is_some() && !phase.is_loading()
}

/// Why predict is disabled, or `None` when it is enabled.
pub fn predict_blocker(file: &FileView, dates: &DateRange, phase: &PredictPhase) -> Option<&'static str> {
    if !file.is_ready() {
        Some("no data file is uploaded")
    } else if dates.start.is_none() {
        Some("no start date is selected")
    } else if dates.end.is_none() {
        Some("no end date is selected")
    } else if phase.is_loading() {
        Some("a prediction is already loading")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn file_view() -> impl Strategy<Value = FileView> {
        prop_oneof![
            Just(FileView::NoFile),
            "[a-z]{1,8}\\.parquet".prop_map(FileView::FileReady),
        ]
    }

    fn date() -> impl Strategy<Value = Option<NaiveDate>> {
        prop::option::of((2020i32..2030, 1u32..=12, 1u32..=28))
            .prop_map(|d| d.and_then(|(y, m, day)| NaiveDate::from_ymd_opt(y, m, day)))
    }

    fn phase() -> impl Strategy<Value = PredictPhase> {
        prop_oneof![
            Just(PredictPhase::Idle),
            Just(PredictPhase::Loading),
            Just(PredictPhase::Done(Vec::new())),
            Just(PredictPhase::Failed),
        ]
    }

    proptest! {
        #[test]
        fn enabled_iff_file_and_both_dates_and_not_loading(
            file in file_view(),
            start in date(),
            end in date(),
            phase in phase(),
        ) {
            let dates = DateRange::new(start, end);
            let expected = file.is_ready() && start.is_some() && end.is_some() && !phase.is_loading();
            prop_assert_eq!(predict_enabled(&file, &dates, &phase), expected);
            prop_assert_eq!(predict_blocker(&file, &dates, &phase).is_none(), expected);
        }
    }

    #[test]
    fn unknown_state_is_no_file() {
        assert_eq!(FileView::from_state(None), FileView::NoFile);
        assert_eq!(
            FileView::from_state(Some(&FileState::missing())),
            FileView::NoFile
        );
        assert_eq!(
            FileView::from_state(Some(&FileState::present("a.parquet"))).filename(),
            Some("a.parquet")
        );
    }
}
