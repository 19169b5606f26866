//! Option lists for the selection controls and the searchable ticker box.

use std::cmp::Reverse;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::domain::cycle;
use crate::models::{SenatorRecord, TickerRecord};

pub const ALL_SENATORS_LABEL: &str = "All Senators";
pub const ALL_TICKERS_LABEL: &str = "All tickers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    options: Vec<SelectOption>,
}

impl SelectOptions {
    pub const fn new(options: Vec<SelectOption>) -> Self {
        Self { options }
    }

    pub fn as_slice(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    pub fn first_value(&self) -> Option<&str> {
        self.options.first().map(|option| option.value.as_str())
    }

    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }

    /// Value `delta` steps away from `current`, wrapping. An unknown current
    /// value moves to the first option.
    pub fn cycle(&self, current: &str, delta: isize) -> Option<String> {
        let index = self.options.iter().position(|option| option.value == current);
        let indices: Vec<usize> = (0..self.options.len()).collect();
        let next = match index {
            Some(index) => cycle(&indices, index, delta),
            None => *indices.first()?,
        };
        Some(self.options[next].value.clone())
    }
}

/// Senator dropdown: "All Senators" then the server's list in order.
pub fn senator_options(records: &[SenatorRecord]) -> SelectOptions {
    let options = std::iter::once(SelectOption::new("", ALL_SENATORS_LABEL))
        .chain(records.iter().map(|record| SelectOption::plain(record.full_name.clone())))
        .collect();
    SelectOptions::new(options)
}

/// Ticker options in server order, optionally led by "All tickers".
pub fn ticker_options(records: &[TickerRecord], with_all: bool) -> SelectOptions {
    let all = with_all.then(|| SelectOption::new("", ALL_TICKERS_LABEL));
    let options = all
        .into_iter()
        .chain(records.iter().map(|record| SelectOption::plain(record.ticker.clone())))
        .collect();
    SelectOptions::new(options)
}

/// What a ticker box shows: the search text while typing, else the selection.
pub fn picker_text(picker: Option<&TickerPicker>, fallback: &str, focused: bool) -> String {
    match picker {
        Some(picker) if picker.is_searching() => format!("/{}▌", picker.query()),
        Some(picker) if focused => format!("{} (type to search)", picker.value_label()),
        Some(picker) => picker.value_label().to_string(),
        None if fallback.is_empty() => "Loading...".to_string(),
        None => fallback.to_string(),
    }
}

/// Searchable single-value ticker box.
///
/// The empty-value option, if any, stays on top; the rest are listed by label.
/// Typing narrows the list with fuzzy matching, best score first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerPicker {
    options: SelectOptions,
    value: String,
    query: String,
    matches: Vec<usize>,
    highlight: usize,
}

impl TickerPicker {
    /// Builds the picker and selects `value` without reporting a change.
    pub fn new(options: SelectOptions, value: &str) -> Self {
        let mut picker = Self {
            options,
            value: String::new(),
            query: String::new(),
            matches: Vec::new(),
            highlight: 0,
        };
        picker.set_value(value);
        picker.refresh_matches();
        picker
    }

    pub const fn options(&self) -> &SelectOptions {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn value_label(&self) -> &str {
        self.options.label_for(&self.value).unwrap_or(&self.value)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Selects `value` if it is one of the options. Returns whether it was.
    pub fn set_value(&mut self, value: &str) -> bool {
        if self.options.contains(value) {
            self.value = value.to_string();
            true
        } else {
            false
        }
    }

    pub fn push_char(&mut self, ch: char) {
        self.query.extend(ch.to_uppercase());
        self.refresh_matches();
    }

    pub fn backspace(&mut self) {
        self.query.pop();
        self.refresh_matches();
    }

    pub fn matches(&self) -> impl Iterator<Item = &SelectOption> {
        self.matches.iter().map(|&index| &self.options.as_slice()[index])
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub const fn highlight_index(&self) -> usize {
        self.highlight
    }

    pub fn highlighted(&self) -> Option<&SelectOption> {
        self.matches
            .get(self.highlight)
            .map(|&index| &self.options.as_slice()[index])
    }

    pub fn move_highlight(&mut self, delta: isize) {
        if self.matches.is_empty() {
            return;
        }
        let positions: Vec<usize> = (0..self.matches.len()).collect();
        self.highlight = cycle(&positions, self.highlight, delta);
    }

    /// Selects the highlighted option and clears the search text.
    /// Returns the new value when it differs from the old one.
    pub fn commit(&mut self) -> Option<String> {
        let next = self.highlighted()?.value.clone();
        self.query.clear();
        let changed = next != self.value;
        self.value.clone_from(&next);
        self.refresh_matches();
        changed.then_some(next)
    }

    /// Drops the search text, keeping the selection.
    pub fn cancel_search(&mut self) {
        self.query.clear();
        self.refresh_matches();
    }

    /// Drops the search text and the selection. Returns whether the value changed.
    pub fn clear(&mut self) -> bool {
        self.query.clear();
        let changed = !self.value.is_empty();
        self.value.clear();
        self.refresh_matches();
        changed
    }

    fn refresh_matches(&mut self) {
        let options = self.options.as_slice();

        if self.query.is_empty() {
            let mut indices: Vec<usize> = (0..options.len()).collect();
            indices.sort_by(|&a, &b| {
                let (a, b) = (&options[a], &options[b]);
                b.value
                    .is_empty()
                    .cmp(&a.value.is_empty())
                    .then_with(|| a.label.cmp(&b.label))
            });
            self.matches = indices;
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, usize)> = options
                .iter()
                .enumerate()
                .filter(|(_, option)| !option.value.is_empty())
                .filter_map(|(index, option)| {
                    matcher
                        .fuzzy_match(&option.label, &self.query)
                        .map(|score| (score, index))
                })
                .collect();
            scored.sort_by_key(|&(score, index)| (Reverse(score), options[index].label.clone()));
            self.matches = scored.into_iter().map(|(_, index)| index).collect();
        }

        self.highlight = self
            .matches
            .iter()
            .position(|&index| options[index].value == self.value && self.query.is_empty())
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tickers(names: &[&str]) -> Vec<TickerRecord> {
        names
            .iter()
            .map(|name| TickerRecord {
                ticker: (*name).to_string(),
            })
            .collect()
    }

    #[test]
    fn senator_options_lead_with_all() {
        let options = senator_options(&[
            SenatorRecord {
                full_name: "Zed".to_string(),
            },
            SenatorRecord {
                full_name: "Amy".to_string(),
            },
        ]);
        let labels: Vec<&str> = options.as_slice().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, [ALL_SENATORS_LABEL, "Zed", "Amy"]);
        assert_eq!(options.first_value(), Some(""));
    }

    #[test]
    fn ticker_options_all_only_when_asked() {
        let records = tickers(&["MSFT", "AAPL"]);
        assert_eq!(ticker_options(&records, true).len(), 3);
        let plain = ticker_options(&records, false);
        assert_eq!(plain.first_value(), Some("MSFT"));
    }

    #[test]
    fn cycle_wraps_and_recovers_from_unknown_values() {
        let options = ticker_options(&tickers(&["AAPL", "MSFT"]), true);
        assert_eq!(options.cycle("", 1).as_deref(), Some("AAPL"));
        assert_eq!(options.cycle("", -1).as_deref(), Some("MSFT"));
        assert_eq!(options.cycle("ZZZ", 1).as_deref(), Some(""));
        assert_eq!(SelectOptions::default().cycle("", 1), None);
    }

    #[test]
    fn picker_applies_initial_value_silently() {
        let picker = TickerPicker::new(ticker_options(&tickers(&["MSFT", "AAPL"]), true), "MSFT");
        assert_eq!(picker.value(), "MSFT");
        let labels: Vec<&str> = picker.matches().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, [ALL_TICKERS_LABEL, "AAPL", "MSFT"]);
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("MSFT"));
    }

    #[test]
    fn picker_ignores_unknown_initial_value() {
        let picker = TickerPicker::new(ticker_options(&tickers(&["AAPL"]), true), "NOPE");
        assert_eq!(picker.value(), "");
    }

    #[test]
    fn typing_narrows_and_commit_selects() {
        let mut picker = TickerPicker::new(
            ticker_options(&tickers(&["AAPL", "AMZN", "MSFT", "NVDA"]), true),
            "",
        );
        picker.push_char('m');
        picker.push_char('s');
        assert_eq!(picker.query(), "MS");
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("MSFT"));

        assert_eq!(picker.commit().as_deref(), Some("MSFT"));
        assert!(!picker.is_searching());
        assert_eq!(picker.commit(), None);
    }

    #[test]
    fn clear_resets_to_all() {
        let mut picker = TickerPicker::new(ticker_options(&tickers(&["AAPL"]), true), "AAPL");
        assert!(picker.clear());
        assert_eq!(picker.value(), "");
        assert!(!picker.clear());
    }

    #[test]
    fn highlight_wraps_within_matches() {
        let mut picker = TickerPicker::new(ticker_options(&tickers(&["AAPL", "MSFT"]), false), "AAPL");
        picker.move_highlight(1);
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("MSFT"));
        picker.move_highlight(1);
        assert_eq!(picker.highlighted().map(|o| o.value.as_str()), Some("AAPL"));
    }

    #[test]
    fn picker_text_follows_search_and_focus() {
        let mut picker = TickerPicker::new(ticker_options(&tickers(&["AAPL", "MSFT"]), true), "AAPL");
        assert_eq!(picker_text(Some(&picker), "", false), "AAPL");
        assert_eq!(picker_text(Some(&picker), "", true), "AAPL (type to search)");
        picker.push_char('m');
        assert_eq!(picker_text(Some(&picker), "", true), "/m▌");

        assert_eq!(picker_text(None, "", false), "Loading...");
        assert_eq!(picker_text(None, "MSFT", false), "MSFT");
    }
}
