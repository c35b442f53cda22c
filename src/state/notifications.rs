//! Transient user-facing notifications.

use chrono::{DateTime, TimeDelta, Utc};

use crate::state::timers::{TimerHandle, TimerQueue};

/// A single auto-dismissing notification slot.
///
/// Showing a message replaces whatever was displayed and restarts the dismiss
/// timer; the replaced message's timer never fires.
#[derive(Debug, Default)]
pub struct Snackbar {
    message: Option<String>,
    dismiss: Option<TimerHandle>,
    timers: TimerQueue<()>,
}

impl Snackbar {
    /// The message currently displayed.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// When the current message will be dismissed.
    #[must_use]
    pub fn dismiss_at(&self) -> Option<DateTime<Utc>> {
        self.timers.next_deadline()
    }

    /// Displays `message` until `now + duration`.
    ///
    /// A duration that runs past the end of representable time keeps the
    /// message up until it is closed or replaced.
    pub fn show(&mut self, message: impl Into<String>, now: DateTime<Utc>, duration: TimeDelta) {
        let message = message.into();
        tracing::debug!(%message, "snackbar");

        if let Some(handle) = self.dismiss.take() {
            self.timers.cancel(handle);
        }
        self.dismiss = now
            .checked_add_signed(duration)
            .map(|deadline| self.timers.schedule(deadline, ()));
        self.message = Some(message);
    }

    /// Dismisses the current message early.
    pub fn close(&mut self) {
        if let Some(handle) = self.dismiss.take() {
            self.timers.cancel(handle);
        }
        self.message = None;
    }

    /// Fires the dismiss timer if it is due.
    ///
    /// Returns `true` if a message was dismissed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if self.timers.take_due(now).is_empty() {
            return false;
        }
        self.dismiss = None;
        self.message.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap() + TimeDelta::milliseconds(ms)
    }

    fn duration() -> TimeDelta {
        TimeDelta::milliseconds(3000)
    }

    #[test]
    fn dismisses_after_duration() {
        let mut snackbar = Snackbar::default();
        snackbar.show("Data telah tersimpan", t(0), duration());

        assert!(!snackbar.tick(t(2999)));
        assert_eq!(snackbar.message(), Some("Data telah tersimpan"));

        assert!(snackbar.tick(t(3000)));
        assert_eq!(snackbar.message(), None);
    }

    #[test]
    fn new_message_restarts_the_timer() {
        let mut snackbar = Snackbar::default();
        snackbar.show("first", t(0), duration());
        snackbar.show("second", t(2000), duration());

        assert!(!snackbar.tick(t(3000)));
        assert_eq!(snackbar.message(), Some("second"));
        assert_eq!(snackbar.dismiss_at(), Some(t(5000)));

        assert!(snackbar.tick(t(5000)));
        assert_eq!(snackbar.message(), None);
    }

    #[test]
    fn closing_early_cancels_the_timer() {
        let mut snackbar = Snackbar::default();
        snackbar.show("bye", t(0), duration());
        snackbar.close();

        assert_eq!(snackbar.message(), None);
        assert_eq!(snackbar.dismiss_at(), None);
        assert!(!snackbar.tick(t(10_000)));
    }

    #[test]
    fn unrepresentable_deadline_keeps_message_up() {
        let mut snackbar = Snackbar::default();
        snackbar.show("Data telah tersimpan", t(0), TimeDelta::MAX);

        assert_eq!(snackbar.message(), Some("Data telah tersimpan"));
        assert_eq!(snackbar.dismiss_at(), None);
        assert!(!snackbar.tick(DateTime::<Utc>::MAX_UTC));

        snackbar.close();
        assert_eq!(snackbar.message(), None);
    }
}
