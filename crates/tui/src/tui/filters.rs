use crate::filter::FilterSpec;
use crate::model::{BudgetTier, DurationBucket, CATEGORIES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilterColumn {
    Categories,
    Duration,
    Budget,
}

impl FilterColumn {
    pub(crate) const ALL: [Self; 3] = [
        FilterColumn::Categories,
        FilterColumn::Duration,
        FilterColumn::Budget,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            FilterColumn::Categories => 0,
            FilterColumn::Duration => 1,
            FilterColumn::Budget => 2,
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            FilterColumn::Categories => "Categories",
            FilterColumn::Duration => "Duration",
            FilterColumn::Budget => "Budget",
        }
    }

    pub(crate) fn clear_label(self) -> &'static str {
        match self {
            FilterColumn::Categories => "All categories",
            FilterColumn::Duration => "Any length",
            FilterColumn::Budget => "Any budget",
        }
    }
}

/// Modal filter picker over the fixed catalogs: categories multi-select,
/// duration and budget single-select. Edits a working copy; Enter
/// commits it, Esc restores what was active when the picker opened.
/// The free-text query is edited outside the picker and passes through
/// untouched.
#[derive(Debug)]
pub(crate) struct FilterOverlay {
    pub(crate) working: FilterSpec,
    pub(crate) initial: FilterSpec,
    pub(crate) column: FilterColumn,
    pub(crate) row_positions: [usize; 3],
}

impl FilterOverlay {
    pub(crate) fn new(active: &FilterSpec) -> Self {
        Self {
            working: active.clone(),
            initial: active.clone(),
            column: FilterColumn::Categories,
            row_positions: [0, 0, 0],
        }
    }

    pub(crate) fn next_column(&mut self) {
        let idx = self.column.index();
        self.column = FilterColumn::ALL[(idx + 1) % FilterColumn::ALL.len()];
    }

    pub(crate) fn prev_column(&mut self) {
        let idx = self.column.index();
        let prev = if idx == 0 {
            FilterColumn::ALL.len() - 1
        } else {
            idx - 1
        };
        self.column = FilterColumn::ALL[prev];
    }

    pub(crate) fn next_row(&mut self) {
        let max = self.current_len().saturating_sub(1);
        let row = &mut self.row_positions[self.column.index()];
        if *row >= max {
            *row = 0;
        } else {
            *row += 1;
        }
    }

    pub(crate) fn prev_row(&mut self) {
        let max = self.current_len().saturating_sub(1);
        let row = &mut self.row_positions[self.column.index()];
        if *row == 0 {
            *row = max;
        } else {
            *row -= 1;
        }
    }

    /// Toggle the highlighted row; row 0 clears its column.
    pub(crate) fn toggle_current(&mut self) {
        match self.column {
            FilterColumn::Categories => {
                let row = self.row_positions[FilterColumn::Categories.index()];
                if row == 0 {
                    self.working.categories.clear();
                } else if let Some(category) = CATEGORIES.get(row - 1) {
                    if !self.working.categories.remove(*category) {
                        self.working.categories.insert((*category).to_string());
                    }
                }
            }
            FilterColumn::Duration => {
                let row = self.row_positions[FilterColumn::Duration.index()];
                if row == 0 {
                    self.working.duration = None;
                } else if let Some(bucket) = DurationBucket::ALL.get(row - 1) {
                    if self.working.duration == Some(*bucket) {
                        self.working.duration = None;
                    } else {
                        self.working.duration = Some(*bucket);
                    }
                }
            }
            FilterColumn::Budget => {
                let row = self.row_positions[FilterColumn::Budget.index()];
                if row == 0 {
                    self.working.budget = None;
                } else if let Some(tier) = BudgetTier::ALL.get(row - 1) {
                    if self.working.budget == Some(*tier) {
                        self.working.budget = None;
                    } else {
                        self.working.budget = Some(*tier);
                    }
                }
            }
        }
    }

    /// Clear every picker dimension, leaving the text query alone.
    pub(crate) fn clear_all(&mut self) {
        self.working.categories.clear();
        self.working.duration = None;
        self.working.budget = None;
        self.row_positions = [0, 0, 0];
    }

    pub(crate) fn cancel(self) -> FilterSpec {
        self.initial
    }

    pub(crate) fn commit(self) -> FilterSpec {
        self.working
    }

    pub(crate) fn current_len(&self) -> usize {
        match self.column {
            FilterColumn::Categories => 1 + CATEGORIES.len(),
            FilterColumn::Duration => 1 + DurationBucket::ALL.len(),
            FilterColumn::Budget => 1 + BudgetTier::ALL.len(),
        }
    }
}
