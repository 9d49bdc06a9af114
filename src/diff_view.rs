//! Left/right mismatch diff with preformatted-or-inline layout.
//!
//! The layout decision runs in two phases on every input change. Multi-line
//! input switches to preformatted layout at once. Then, if line numbers are
//! shown, a measurement is requested; once the rendered height is known the
//! view stays preformatted only if the content spans more than one rendered
//! line. A value that fits on a single line drops back to inline layout.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::config::DiffSettings;
use crate::settle::{LayoutMeasurer, MeasureTicket};

/// Caller-controlled rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Never use preformatted layout.
    pub force_inline: bool,
    /// Rendered height of one line.
    pub line_height: u32,
    /// Show a line number gutter beside preformatted content.
    pub show_line_numbers: bool,
    /// Word-wrap inline content.
    pub wrap: bool,
}

impl DiffOptions {
    /// Options seeded from configuration with no caller overrides.
    pub const fn from_settings(settings: &DiffSettings) -> Self {
        return Self {
            force_inline: false,
            line_height: settings.line_height,
            show_line_numbers: settings.show_line_numbers,
            wrap: true,
        };
    }
}

/// Layout class applied to the rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutClass {
    /// Inline without wrapping.
    Inline,
    /// Whitespace-preserving block layout.
    Preformatted,
    /// Inline with word wrapping.
    WordWrap,
}

/// A run of text shared by, removed from, or added to the right side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    /// How the run relates left to right.
    pub kind: SegmentKind,
    /// The run's text.
    pub text: String,
}

/// Relation of a diff segment between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Present only on the left.
    Delete,
    /// Present on both sides.
    Equal,
    /// Present only on the right.
    Insert,
}

/// Everything a host needs to draw the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLayout {
    /// Layout class for the block.
    pub class: LayoutClass,
    /// Line numbers to show in the gutter, empty when the gutter is hidden.
    pub gutter: Vec<u32>,
    /// Rendered height of one line.
    pub line_height: u32,
    /// Word-level diff of left against right.
    pub segments: Vec<DiffSegment>,
}

impl DiffLayout {
    /// Concatenate every segment without change markers, as a styled host
    /// would draw it.
    pub fn plain_text(&self) -> String {
        return self.segments.iter().map(|s| return s.text.as_str()).collect();
    }

    /// Flatten segments to text, marking deletions `[-…-]` and insertions `{+…+}`.
    pub fn rendered_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment.kind {
                SegmentKind::Delete => {
                    out.push_str("[-");
                    out.push_str(&segment.text);
                    out.push_str("-]");
                },
                SegmentKind::Equal => out.push_str(&segment.text),
                SegmentKind::Insert => {
                    out.push_str("{+");
                    out.push_str(&segment.text);
                    out.push_str("+}");
                },
            }
        }
        return out;
    }
}

/// Diff view state for one mismatch.
#[derive(Debug)]
pub struct MismatchDiffView {
    /// Bumped on every input change; stale tickets carry an older value.
    generation: u64,
    /// Last inputs seen, `None` before the first change.
    inputs: Option<(String, String)>,
    /// Rendered line count from the latest measurement.
    lines: u32,
    /// Rendering switches.
    options: DiffOptions,
    /// Current layout mode.
    preformatted: bool,
}

impl MismatchDiffView {
    /// Apply a fired measurement. Returns `false` and changes nothing when
    /// the ticket predates the latest input change.
    pub fn apply_measurement(&mut self, ticket: MeasureTicket, rendered_height: u32) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "diff: discarding stale measurement (generation {} < {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        let line_height = self.options.line_height.max(1);
        self.lines = rendered_height.div_ceil(line_height);
        self.preformatted = self.lines > 1;
        log::trace!("diff: measured {} lines, preformatted={}", self.lines, self.preformatted);
        return true;
    }

    /// Measure the unmarked diff text synchronously and apply the result.
    pub fn apply_measurer(&mut self, ticket: MeasureTicket, measurer: &dyn LayoutMeasurer) -> bool {
        let height = measurer.rendered_height(&self.render().plain_text());
        return self.apply_measurement(ticket, height);
    }

    /// Whether content is currently laid out as a preformatted block.
    pub const fn is_preformatted(&self) -> bool {
        return self.preformatted;
    }

    /// Rendered line count from the latest measurement (1 until measured).
    pub const fn lines(&self) -> u32 {
        return self.lines;
    }

    /// Create a view with no inputs yet.
    pub const fn new(options: DiffOptions) -> Self {
        return Self {
            generation: 0,
            inputs: None,
            lines: 1,
            options,
            preformatted: !options.force_inline,
        };
    }

    /// Produce the current layout.
    pub fn render(&self) -> DiffLayout {
        let class = if self.preformatted {
            LayoutClass::Preformatted
        } else if self.options.wrap {
            LayoutClass::WordWrap
        } else {
            LayoutClass::Inline
        };
        let gutter = if self.preformatted && self.options.show_line_numbers {
            (1..=self.lines).collect()
        } else {
            Vec::new()
        };
        let segments = match &self.inputs {
            Some((left, right)) => diff_segments(left, right),
            None => Vec::new(),
        };
        return DiffLayout { class, gutter, line_height: self.options.line_height, segments };
    }

    /// Feed new left/right text. Unchanged input is a no-op. Returns a
    /// ticket when the layout needs a measurement after the view settles.
    pub fn set_inputs(&mut self, left: &str, right: &str) -> Option<MeasureTicket> {
        if self.inputs.as_ref().is_some_and(|(l, r)| return l == left && r == right) {
            return None;
        }
        self.inputs = Some((left.to_string(), right.to_string()));
        self.generation = self.generation.wrapping_add(1);

        if !self.preformatted && !self.options.force_inline {
            self.preformatted = is_multiline(left) || is_multiline(right);
        }
        if self.preformatted && self.options.show_line_numbers {
            return Some(MeasureTicket { generation: self.generation });
        }
        return None;
    }
}

/// Word-level diff of left against right, with adjacent runs of the same kind merged.
fn diff_segments(left: &str, right: &str) -> Vec<DiffSegment> {
    let diff = TextDiff::from_words(left, right);
    let mut segments: Vec<DiffSegment> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Delete => SegmentKind::Delete,
            ChangeTag::Equal => SegmentKind::Equal,
            ChangeTag::Insert => SegmentKind::Insert,
        };
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => segments.push(DiffSegment { kind, text: change.value().to_string() }),
        }
    }
    return segments;
}

/// Whether text spans more than one logical line.
fn is_multiline(text: &str) -> bool {
    return text.contains('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settle::WrappedTextMeasurer;

    fn options() -> DiffOptions {
        return DiffOptions { force_inline: false, line_height: 20, show_line_numbers: true, wrap: true };
    }

    #[test]
    fn short_single_lines_end_inline() {
        let mut view = MismatchDiffView::new(options());
        let ticket = view.set_inputs("Finance", "Finances").unwrap();
        assert!(view.apply_measurer(ticket, &WrappedTextMeasurer::new(80, 20)));

        assert!(!view.is_preformatted());
        assert_eq!(view.lines(), 1);
        assert_eq!(view.render().class, LayoutClass::WordWrap);
        assert!(view.render().gutter.is_empty());
    }

    #[test]
    fn newline_sets_preformatted_before_measurement() {
        let mut view = MismatchDiffView::new(options());
        let first = view.set_inputs("a", "b").unwrap();
        view.apply_measurement(first, 20);
        assert!(!view.is_preformatted());

        let ticket = view.set_inputs("line one\nline two", "line one");
        assert!(ticket.is_some());
        assert!(view.is_preformatted());
    }

    #[test]
    fn wrapped_single_line_stays_preformatted() {
        let mut view = MismatchDiffView::new(options());
        let long = "word ".repeat(40);
        let ticket = view.set_inputs(&long, &long).unwrap();
        view.apply_measurer(ticket, &WrappedTextMeasurer::new(40, 20));

        assert!(view.is_preformatted());
        assert_eq!(view.lines(), 5);
        assert_eq!(view.render().gutter, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn change_markers_do_not_count_toward_width() {
        let mut view = MismatchDiffView::new(options());
        let ticket = view.set_inputs("alpha beta", "alpha gamma").unwrap();
        assert_eq!(view.render().plain_text(), "alpha betagamma");

        view.apply_measurer(ticket, &WrappedTextMeasurer::new(20, 20));
        assert!(!view.is_preformatted());
        assert_eq!(view.lines(), 1);
    }

    #[test]
    fn trailing_newline_settles_inline() {
        let mut view = MismatchDiffView::new(options());
        let ticket = view.set_inputs("Finance\n", "Finances\n").unwrap();
        assert!(view.is_preformatted());

        view.apply_measurer(ticket, &WrappedTextMeasurer::new(80, 20));
        assert!(!view.is_preformatted());
        assert_eq!(view.render().class, LayoutClass::WordWrap);
    }

    #[test]
    fn measurement_rounds_up() {
        let mut view = MismatchDiffView::new(options());
        let ticket = view.set_inputs("a\nb", "a").unwrap();
        view.apply_measurement(ticket, 21);
        assert_eq!(view.lines(), 2);
        assert!(view.is_preformatted());
    }

    #[test]
    fn unchanged_inputs_do_not_retrigger() {
        let mut view = MismatchDiffView::new(options());
        assert!(view.set_inputs("a", "b").is_some());
        assert!(view.set_inputs("a", "b").is_none());
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut view = MismatchDiffView::new(options());
        let stale = view.set_inputs("one\ntwo", "one").unwrap();
        let fresh = view.set_inputs("one\ntwo\nthree", "one").unwrap();

        assert!(!view.apply_measurement(stale, 20));
        assert!(view.is_preformatted());
        assert!(view.apply_measurement(fresh, 60));
        assert_eq!(view.lines(), 3);
    }

    #[test]
    fn forced_inline_never_measures() {
        let mut view = MismatchDiffView::new(DiffOptions { force_inline: true, ..options() });
        assert!(view.set_inputs("one\ntwo", "one").is_none());
        assert!(!view.is_preformatted());
    }

    #[test]
    fn hidden_line_numbers_skip_measurement() {
        let mut view = MismatchDiffView::new(DiffOptions { show_line_numbers: false, ..options() });
        assert!(view.set_inputs("a", "b").is_none());
        assert!(view.is_preformatted());
        assert!(view.render().gutter.is_empty());
    }

    #[test]
    fn unwrapped_inline_class() {
        let mut view = MismatchDiffView::new(DiffOptions { force_inline: true, wrap: false, ..options() });
        view.set_inputs("a", "b");
        assert_eq!(view.render().class, LayoutClass::Inline);
    }

    #[test]
    fn segments_mark_changed_words() {
        let mut view = MismatchDiffView::new(options());
        view.set_inputs("an act to amend", "an act to repeal");
        let layout = view.render();
        assert_eq!(layout.rendered_text(), "an act to [-amend-]{+repeal+}");
        assert_eq!(layout.segments.first().map(|s| s.kind), Some(SegmentKind::Equal));
    }
}
