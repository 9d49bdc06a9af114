//! Delayed layout measurement: the settle timer and rendered-height probes.
//!
//! A diff's rendered height is only known once its content has been laid out,
//! so the view asks for a measurement and the host delivers it after a short
//! settle delay.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

/// Handle for one requested measurement. Tickets from an older input
/// generation are rejected by the view that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureTicket {
    /// Input generation the ticket was issued for.
    pub generation: u64,
}

/// Reports how tall a block of rendered text ends up.
pub trait LayoutMeasurer {
    /// Rendered height of `text`, in the same units as the configured line height.
    fn rendered_height(&self, text: &str) -> u32;
}

/// Fires queued measurement tickets once the settle delay has elapsed.
/// Tickets fire in the order they were scheduled.
pub struct SettleTimer {
    /// Time between scheduling and firing.
    delay: Duration,
    /// Scheduled tickets with their one-shot timers.
    pending: VecDeque<(Receiver<Instant>, MeasureTicket)>,
}

impl SettleTimer {
    /// Create a timer with the given settle delay.
    pub const fn new(delay: Duration) -> Self {
        return Self { delay, pending: VecDeque::new() };
    }

    /// Queue a ticket to fire after the settle delay.
    pub fn schedule(&mut self, ticket: MeasureTicket) {
        log::trace!("settle: scheduled generation {} in {:?}", ticket.generation, self.delay);
        self.pending.push_back((crossbeam_channel::after(self.delay), ticket));
    }

    /// Block until the oldest queued ticket fires. Returns `None` when nothing is queued.
    pub fn wait_next(&mut self) -> Option<MeasureTicket> {
        let (timer, ticket) = self.pending.pop_front()?;
        if timer.recv().is_err() {
            log::warn!("settle: timer for generation {} dropped", ticket.generation);
            return None;
        }
        return Some(ticket);
    }
}

/// Estimates rendered height of text wrapped at a fixed column width.
pub struct WrappedTextMeasurer {
    /// Characters per rendered row.
    columns: usize,
    /// Height of one rendered row.
    line_height: u32,
}

impl WrappedTextMeasurer {
    /// Create a measurer for a viewport `columns` characters wide.
    pub fn new(columns: usize, line_height: u32) -> Self {
        return Self { columns: columns.max(1), line_height };
    }
}

impl LayoutMeasurer for WrappedTextMeasurer {
    fn rendered_height(&self, text: &str) -> u32 {
        // A final newline does not open another rendered row.
        let text = text.strip_suffix('\n').unwrap_or(text);
        let rows: usize = text
            .split('\n')
            .map(|line| return line.chars().count().div_ceil(self.columns).max(1))
            .fold(0_usize, usize::saturating_add);
        let rows = u32::try_from(rows).unwrap_or(u32::MAX);
        return rows.saturating_mul(self.line_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_line_is_one_row() {
        let measurer = WrappedTextMeasurer::new(80, 20);
        assert_eq!(measurer.rendered_height("Senate Finance"), 20);
        assert_eq!(measurer.rendered_height(""), 20);
    }

    #[test]
    fn final_newline_adds_no_row() {
        let measurer = WrappedTextMeasurer::new(80, 20);
        assert_eq!(measurer.rendered_height("Finance\n"), 20);
        assert_eq!(measurer.rendered_height("Finance\n\n"), 40);
    }

    #[test]
    fn long_line_wraps() {
        let measurer = WrappedTextMeasurer::new(10, 20);
        assert_eq!(measurer.rendered_height(&"x".repeat(25)), 60);
    }

    #[test]
    fn each_logical_line_counts() {
        let measurer = WrappedTextMeasurer::new(80, 20);
        assert_eq!(measurer.rendered_height("one\ntwo\nthree"), 60);
    }

    #[test]
    fn timer_fires_in_schedule_order() {
        let mut timer = SettleTimer::new(Duration::from_millis(1));
        timer.schedule(MeasureTicket { generation: 1 });
        timer.schedule(MeasureTicket { generation: 2 });

        assert_eq!(timer.wait_next(), Some(MeasureTicket { generation: 1 }));
        assert_eq!(timer.wait_next(), Some(MeasureTicket { generation: 2 }));
        assert_eq!(timer.wait_next(), None);
    }
}
