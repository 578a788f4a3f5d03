//! Capture buffer: columns held out of the results table.
//!
//! A capture is a press on a header cell. The press appends every body value
//! of that column to the buffer in one step; the release ends the gesture. A
//! single [`HoldState`] guard is shared by all headers, so at most one gesture
//! is active at any time.

use crate::model::ResultTable;
use crate::state::table_events::{TableGeneration, TableReplaced, TableSubscriber};

/// Gesture state shared by every header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A header is pressed.
    Holding {
        /// Column index of the pressed header.
        column: usize,
    },
}

/// One captured column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeldColumn {
    label: String,
    values: Vec<String>,
}

impl HeldColumn {
    /// Header label at capture time.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Cell values, one per body row.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Result of a press on a header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The column was appended.
    Captured {
        /// Header label.
        label: String,
        /// Number of values appended.
        appended: usize,
        /// Whether a query was recorded with this capture.
        query_recorded: bool,
    },
    /// Another gesture is in progress; nothing changed.
    AlreadyHolding,
    /// The press targeted headers that are not attached (no table, stale
    /// generation, or a column out of range); nothing changed.
    Detached,
}

/// Everything removed from the buffer by [`CaptureBuffer::take`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturedSet {
    /// Held columns in capture order.
    pub columns: Vec<HeldColumn>,
    /// Queries recorded alongside.
    pub queries: Vec<String>,
}

impl CapturedSet {
    /// Every held value in capture order.
    pub fn flat_values(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|c| c.values.iter().cloned())
            .collect()
    }

    /// Whether no value was held.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|c| c.values.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttachedHeaders {
    generation: TableGeneration,
    labels: Vec<String>,
}

/// Session accumulator of held columns and their queries.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    hold: HoldState,
    columns: Vec<HeldColumn>,
    queries: Vec<String>,
    attached: Option<AttachedHeaders>,
    export_enabled: bool,
    /// Total serialized length of all values, each as a JSON string literal.
    value_json_bytes: usize,
    item_count: usize,
}

impl CaptureBuffer {
    /// Empty buffer with no attached headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    pub fn hold_state(&self) -> HoldState {
        self.hold
    }

    /// Whether a gesture is in progress.
    pub fn is_holding(&self) -> bool {
        matches!(self.hold, HoldState::Holding { .. })
    }

    /// Bind the header cells of a table generation.
    pub fn attach(&mut self, generation: TableGeneration, labels: Vec<String>) {
        self.attached = Some(AttachedHeaders { generation, labels });
    }

    /// Drop header bindings (no results table).
    pub fn detach(&mut self) {
        self.attached = None;
    }

    /// Generation the headers are bound to, if any.
    #[cfg(test)]
    pub(crate) fn attached_generation(&self) -> Option<TableGeneration> {
        self.attached.as_ref().map(|a| a.generation)
    }

    /// Press on header `column` of `table` (generation `generation`).
    ///
    /// `search_input` is the current search text; it is recorded (untrimmed)
    /// when it holds anything besides whitespace.
    pub fn press(
        &mut self,
        table: &ResultTable,
        generation: TableGeneration,
        column: usize,
        search_input: &str,
    ) -> CaptureOutcome {
        if self.is_holding() {
            return CaptureOutcome::AlreadyHolding;
        }

        let label = match &self.attached {
            Some(attached) if attached.generation == generation => {
                match attached.labels.get(column) {
                    Some(label) => label.clone(),
                    None => return CaptureOutcome::Detached,
                }
            }
            _ => return CaptureOutcome::Detached,
        };

        self.hold = HoldState::Holding { column };

        // Collected in full before touching the buffer.
        let values = table.column_values(column);
        let appended = values.len();
        self.value_json_bytes += values.iter().map(|v| json_string_len(v)).sum::<usize>();
        self.item_count += appended;
        self.columns.push(HeldColumn {
            label: label.clone(),
            values,
        });
        self.export_enabled = true;

        let query_recorded = !search_input.trim().is_empty();
        if query_recorded {
            self.queries.push(search_input.to_string());
        }

        tracing::debug!(%label, appended, total = self.item_count, "column captured");

        CaptureOutcome::Captured {
            label,
            appended,
            query_recorded,
        }
    }

    /// End the gesture, wherever the pointer is. Returns whether a gesture was
    /// in progress.
    pub fn release(&mut self) -> bool {
        let was_holding = self.is_holding();
        self.hold = HoldState::Idle;
        was_holding
    }

    /// Total values held since the last reset.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Byte length of the held values serialized as a JSON array.
    pub fn estimated_size_bytes(&self) -> usize {
        if self.item_count == 0 {
            return 2;
        }
        2 + self.value_json_bytes + (self.item_count - 1)
    }

    /// Size display, kilobytes rounded to two decimals.
    ///
    /// An empty buffer reads `"0 KB"`.
    pub fn size_display(&self) -> String {
        if self.item_count == 0 {
            return "0 KB".to_string();
        }
        format!("{:.2} KB", self.estimated_size_bytes() as f64 / 1024.0)
    }

    /// Whether the export action is available.
    pub fn export_enabled(&self) -> bool {
        self.export_enabled
    }

    /// Held columns in capture order.
    pub fn columns(&self) -> &[HeldColumn] {
        &self.columns
    }

    /// Header labels in capture order.
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Every held value in capture order.
    pub fn flat_values(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(|c| c.values.iter().cloned())
            .collect()
    }

    /// Queries recorded with each capture.
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Forget recorded queries, keeping the values (after a favorite save).
    pub fn clear_queries(&mut self) {
        self.queries.clear();
    }

    /// Whether no value is held.
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// Remove and return all held data, leaving the buffer empty.
    ///
    /// Gesture state and header bindings are untouched.
    pub fn take(&mut self) -> CapturedSet {
        let set = CapturedSet {
            columns: std::mem::take(&mut self.columns),
            queries: std::mem::take(&mut self.queries),
        };
        self.reset_counters();
        set
    }

    /// Clear all held data and counters.
    pub fn reset(&mut self) {
        self.columns.clear();
        self.queries.clear();
        self.reset_counters();
    }

    fn reset_counters(&mut self) {
        self.item_count = 0;
        self.value_json_bytes = 0;
        self.export_enabled = false;
    }
}

impl TableSubscriber for CaptureBuffer {
    fn on_table_replaced(&mut self, event: &TableReplaced<'_>) {
        match event.table {
            Some(table) if table.has_results_marker() => {
                self.attach(event.generation, table.columns.clone());
            }
            _ => self.detach(),
        }
    }
}

fn json_string_len(value: &str) -> usize {
    serde_json::to_string(value).map(|s| s.len()).unwrap_or(value.len() + 2)
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
