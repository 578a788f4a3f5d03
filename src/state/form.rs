//! Search form state: strategy-gated fields and the linked weight slider.

use crate::model::{SearchStrategy, Sex};
use crate::state::search_input::SearchInput;
use std::collections::HashMap;

/// Upper bound of the slider and of each weight.
pub const WEIGHT_TOTAL: u8 = 100;
/// Slider step for one left/right press.
pub const WEIGHT_STEP: i64 = 5;
/// Largest accepted age bound.
pub const MAX_AGE: u64 = 150;

const DEFAULT_AGE_MIN: u64 = 0;
const DEFAULT_AGE_MAX: u64 = 100;
const DEFAULT_NEIGHBORS: u64 = 1000;
const NEIGHBOR_STEP: u64 = 10;

/// Two complementary weights driven by a single slider position.
///
/// `value1` is the full-text weight, `value2` the semantic weight. The pair
/// is only ever written together, so `value1 + value2 == 100` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightSlider {
    value1: u8,
    value2: u8,
}

impl WeightSlider {
    /// Slider at `position`, clamped to `[0, 100]`.
    pub fn new(position: i64) -> Self {
        let mut slider = Self {
            value1: 0,
            value2: WEIGHT_TOTAL,
        };
        slider.set(position);
        slider
    }

    /// Move the slider to `position`, clamped to `[0, 100]`.
    pub fn set(&mut self, position: i64) {
        let value1 = position.clamp(0, i64::from(WEIGHT_TOTAL)) as u8;
        self.value1 = value1;
        self.value2 = WEIGHT_TOTAL - value1;
    }

    /// Move the slider by `delta`.
    pub fn nudge(&mut self, delta: i64) {
        self.set(i64::from(self.value1) + delta);
    }

    /// Full-text weight (`peso_fts`).
    pub fn value1(&self) -> u8 {
        self.value1
    }

    /// Semantic weight (`peso_semantic`).
    pub fn value2(&self) -> u8 {
        self.value2
    }
}

impl Default for WeightSlider {
    fn default() -> Self {
        Self::new(50)
    }
}

/// Keyboard-navigable form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Strategy selector.
    Strategy,
    /// Sex radio group.
    Sex,
    /// Lower age bound.
    AgeMin,
    /// Upper age bound.
    AgeMax,
    /// Neighbor count `k`; conditional.
    Neighbors,
    /// Weight slider.
    Weights,
}

impl FormField {
    /// All fields in display order.
    pub const ORDER: [FormField; 6] = [
        FormField::Strategy,
        FormField::Sex,
        FormField::AgeMin,
        FormField::AgeMax,
        FormField::Neighbors,
        FormField::Weights,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Strategy => "Estrategia",
            FormField::Sex => "Sexo",
            FormField::AgeMin => "Edad mínima",
            FormField::AgeMax => "Edad máxima",
            FormField::Neighbors => "Vecinos (k)",
            FormField::Weights => "Balance FTS / Semántica",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            FormField::AgeMin | FormField::AgeMax | FormField::Neighbors
        )
    }
}

/// Which strategy-dependent parts of the form are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVisibility {
    /// The conditional fields (neighbor count).
    pub conditional: bool,
    /// The weight slider.
    pub slider: bool,
}

impl FieldVisibility {
    /// Visibility for `strategy`.
    pub fn for_strategy(strategy: SearchStrategy) -> Self {
        match strategy {
            SearchStrategy::Fts => Self {
                conditional: false,
                slider: false,
            },
            SearchStrategy::Semantic => Self {
                conditional: true,
                slider: false,
            },
            SearchStrategy::ReciprocalRankFusion => Self {
                conditional: true,
                slider: true,
            },
        }
    }

    /// Whether `field` is shown.
    pub fn is_visible(&self, field: FormField) -> bool {
        match field {
            FormField::Neighbors => self.conditional,
            FormField::Weights => self.slider,
            _ => true,
        }
    }
}

/// Complete prior-search snapshot read from a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    /// Query text.
    pub query: String,
    /// Strategy.
    pub strategy: SearchStrategy,
    /// Sex selection.
    pub sex: Sex,
    /// Lower age bound.
    pub age_min: u64,
    /// Upper age bound.
    pub age_max: u64,
    /// Slider position (full-text weight).
    pub peso_fts: i64,
    /// Neighbor count.
    pub neighbors: u64,
}

impl FormSnapshot {
    /// Parse `query=..&strategy=..&sexo=..&edad_min=..&edad_max=..&peso_fts=..
    /// &peso_semantic=..&k=..`.
    ///
    /// Returns `None` unless every parameter is present and valid. A leading
    /// `?` is accepted. `peso_semantic` is checked but the applied semantic
    /// weight is always derived from `peso_fts`.
    pub fn from_query_string(input: &str) -> Option<Self> {
        let input = input.strip_prefix('?').unwrap_or(input);
        let params: HashMap<String, String> = url::form_urlencoded::parse(input.as_bytes())
            .into_owned()
            .collect();

        let get = |key: &str| params.get(key).map(String::as_str);

        let query = get("query")?.to_string();
        let strategy = get("strategy")?.parse().ok()?;
        let sex = get("sexo")?.parse().ok()?;
        let age_min = get("edad_min")?.trim().parse().ok()?;
        let age_max = get("edad_max")?.trim().parse().ok()?;
        let peso_fts: f64 = get("peso_fts")?.trim().parse().ok()?;
        let _peso_semantic: f64 = get("peso_semantic")?.trim().parse().ok()?;
        let neighbors = get("k")?.trim().parse().ok()?;

        if !peso_fts.is_finite() {
            return None;
        }

        Some(Self {
            query,
            strategy,
            sex,
            age_min,
            age_max,
            peso_fts: peso_fts.round() as i64,
            neighbors,
        })
    }
}

/// Search form: query text plus every filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFilterState {
    /// Search text.
    pub search: SearchInput,
    strategy: SearchStrategy,
    sex: Sex,
    age_min: u64,
    age_max: u64,
    neighbors: u64,
    slider: WeightSlider,
    selected: FormField,
}

impl Default for FormFilterState {
    fn default() -> Self {
        Self {
            search: SearchInput::default(),
            strategy: SearchStrategy::default(),
            sex: Sex::default(),
            age_min: DEFAULT_AGE_MIN,
            age_max: DEFAULT_AGE_MAX,
            neighbors: DEFAULT_NEIGHBORS,
            slider: WeightSlider::default(),
            selected: FormField::Strategy,
        }
    }
}

impl FormFilterState {
    /// Form at its defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a complete snapshot, replacing every field.
    pub fn apply_snapshot(&mut self, snapshot: FormSnapshot) {
        self.search.set_text(snapshot.query);
        self.sex = snapshot.sex;
        self.age_min = snapshot.age_min.min(MAX_AGE);
        self.age_max = snapshot.age_max.min(MAX_AGE);
        self.neighbors = snapshot.neighbors.max(1);
        self.slider.set(snapshot.peso_fts);
        self.set_strategy(snapshot.strategy);
    }

    /// Selected strategy.
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Change the strategy and re-derive field visibility.
    ///
    /// A selected field that becomes hidden moves the selection back to the
    /// strategy selector.
    pub fn set_strategy(&mut self, strategy: SearchStrategy) {
        self.strategy = strategy;
        if !self.visibility().is_visible(self.selected) {
            self.selected = FormField::Strategy;
        }
    }

    /// Current field visibility.
    pub fn visibility(&self) -> FieldVisibility {
        FieldVisibility::for_strategy(self.strategy)
    }

    /// Fields currently shown, in display order.
    pub fn visible_fields(&self) -> Vec<FormField> {
        let visibility = self.visibility();
        FormField::ORDER
            .into_iter()
            .filter(|f| visibility.is_visible(*f))
            .collect()
    }

    /// Sex selection.
    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// Select a sex radio.
    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = sex;
    }

    /// Lower age bound.
    pub fn age_min(&self) -> u64 {
        self.age_min
    }

    /// Upper age bound.
    pub fn age_max(&self) -> u64 {
        self.age_max
    }

    /// Neighbor count.
    pub fn neighbors(&self) -> u64 {
        self.neighbors
    }

    /// Weight slider.
    pub fn slider(&self) -> WeightSlider {
        self.slider
    }

    /// Move the weight slider.
    pub fn set_slider(&mut self, position: i64) {
        self.slider.set(position);
    }

    /// Field under keyboard focus.
    pub fn selected(&self) -> FormField {
        self.selected
    }

    /// Select `field` if shown. Returns whether the selection changed.
    pub fn select(&mut self, field: FormField) -> bool {
        if !self.visibility().is_visible(field) || self.selected == field {
            return false;
        }
        self.selected = field;
        true
    }

    /// Select the next shown field, wrapping.
    pub fn select_next(&mut self) {
        self.step_selection(1);
    }

    /// Select the previous shown field, wrapping.
    pub fn select_prev(&mut self) {
        self.step_selection(-1);
    }

    fn step_selection(&mut self, delta: isize) {
        let fields = self.visible_fields();
        let len = fields.len() as isize;
        let current = fields
            .iter()
            .position(|f| *f == self.selected)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len);
        self.selected = fields[next as usize];
    }

    /// Increase (`+1`) or decrease (`-1`) the selected field.
    pub fn adjust_selected(&mut self, direction: i64) {
        let forward = direction > 0;
        match self.selected {
            FormField::Strategy => {
                let next = if forward {
                    self.strategy.next()
                } else {
                    self.strategy.prev()
                };
                self.set_strategy(next);
            }
            FormField::Sex => {
                self.sex = if forward {
                    self.sex.next()
                } else {
                    self.sex.prev()
                };
            }
            FormField::AgeMin => {
                self.age_min = step_bounded(self.age_min, 1, forward, 0, MAX_AGE);
            }
            FormField::AgeMax => {
                self.age_max = step_bounded(self.age_max, 1, forward, 0, MAX_AGE);
            }
            FormField::Neighbors => {
                self.neighbors = step_bounded(self.neighbors, NEIGHBOR_STEP, forward, 1, u64::MAX);
            }
            FormField::Weights => {
                self.slider.nudge(direction.signum() * WEIGHT_STEP);
            }
        }
    }

    /// Type a digit into the selected numeric field. Returns whether it was
    /// consumed.
    pub fn push_digit(&mut self, digit: char) -> bool {
        let Some(d) = digit.to_digit(10) else {
            return false;
        };
        if !self.selected.is_numeric() {
            return false;
        }
        let d = u64::from(d);
        match self.selected {
            FormField::AgeMin => {
                self.age_min = append_digit(self.age_min, d).min(MAX_AGE);
            }
            FormField::AgeMax => {
                self.age_max = append_digit(self.age_max, d).min(MAX_AGE);
            }
            FormField::Neighbors => {
                self.neighbors = append_digit(self.neighbors, d).max(1);
            }
            _ => {}
        }
        true
    }

    /// Drop the last digit of the selected numeric field. Returns whether it
    /// was consumed.
    pub fn pop_digit(&mut self) -> bool {
        match self.selected {
            FormField::AgeMin => self.age_min /= 10,
            FormField::AgeMax => self.age_max /= 10,
            FormField::Neighbors => self.neighbors = (self.neighbors / 10).max(1),
            _ => return false,
        }
        true
    }

    /// `GET /search` parameters for the current form.
    ///
    /// Weights always come from the slider.
    pub fn search_params(&self, document: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.search.text().trim().to_string()),
            ("doc", document.unwrap_or_default().to_string()),
            ("strategy", self.strategy.as_str().to_string()),
            ("sexo", self.sex.as_str().to_string()),
            ("edad_min", self.age_min.to_string()),
            ("edad_max", self.age_max.to_string()),
            ("peso_fts", self.slider.value1().to_string()),
            ("peso_semantic", self.slider.value2().to_string()),
            ("k", self.neighbors.to_string()),
        ]
    }
}

fn step_bounded(value: u64, step: u64, forward: bool, min: u64, max: u64) -> u64 {
    if forward {
        value.saturating_add(step).min(max)
    } else {
        value.saturating_sub(step).max(min)
    }
}

fn append_digit(value: u64, digit: u64) -> u64 {
    value.saturating_mul(10).saturating_add(digit)
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
