//! Text rendering for the monitoring view.

use crate::domain::{
    Notification, NotificationKind, Participant, Route,
    view::{Dot, EventBadge, StatusColor, status_badge, warning_dots},
};

/// Formatter for the monitor display
pub struct MonitorFormatter;

impl MonitorFormatter {
    /// Format the page header with quiz title and the live/upcoming badge
    pub fn format_header(quiz_title: &str, badge: Option<EventBadge>) -> String {
        let badge_text = badge
            .map(|b| format!(" [{}]", b.label))
            .unwrap_or_default();
        format!(
            "============================================================\n\
             Direct test — {}{}\n\
             ============================================================\n",
            quiz_title, badge_text
        )
    }

    /// Format the timer line
    pub fn format_timer(timer_text: &str) -> String {
        format!("{}\n\n", timer_text)
    }

    /// Format the participant table, one row per participant.
    ///
    /// Status markers: `[+]` active, `[~]` ready, `[-]` inactive.
    /// Warning dots: `*` yellow, `!` red, `.` none.
    pub fn format_roster(participants: &[&Participant]) -> String {
        let mut output = String::new();
        output.push_str("Students:\n");

        if participants.is_empty() {
            output.push_str("(No students)\n");
            return output;
        }

        output.push_str(&format!(
            "{:<16} {:<16} {:<14} {}\n",
            "Username", "Name", "State", "Warnings"
        ));
        for participant in participants {
            let badge = status_badge(participant.connection_state.as_ref());
            let marker = match badge.color {
                StatusColor::Green => "[+]",
                StatusColor::Yellow => "[~]",
                StatusColor::Red => "[-]",
            };
            output.push_str(&format!(
                "{:<16} {:<16} {:<14} {}\n",
                participant.username,
                participant.last_name,
                format!("{} {}", marker, badge.label),
                Self::format_dots(&warning_dots(&participant.warnings)),
            ));
        }
        output
    }

    /// Format the three warning dots of one participant
    pub fn format_dots(dots: &[Dot]) -> String {
        dots.iter()
            .map(|dot| match dot {
                Dot::Yellow => '*',
                Dot::Red => '!',
                Dot::Neutral => '.',
            })
            .collect()
    }

    /// Format a queued notification
    pub fn format_notification(notification: &Notification) -> String {
        let prefix = match notification.kind {
            NotificationKind::Info => "INFO",
            NotificationKind::Error => "ERROR",
        };
        format!("[{}] {}\n", prefix, notification.message)
    }

    /// Format the empty view shown when no event exists
    pub fn format_no_event() -> String {
        "No event found.\n".to_string()
    }

    /// Format the message shown when the page must navigate away
    pub fn format_redirect(route: Route) -> String {
        format!("Redirecting to {}\n", route.path())
    }
}
