//! Outbound hook to the platform's daily reminder scheduler.

use log::info;

/// Arms or disarms the recurring daily reminder.
///
/// Both calls must be idempotent; trigger timing belongs to the
/// implementation.
pub trait ReminderScheduler: Send + Sync {
    fn arm_daily_reminder(&self);
    fn disarm_daily_reminder(&self);
}

/// Scheduler that only records the request in the log. Used by hosts without
/// a notification facility (CLI, tests of the wiring).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyReminderScheduler;

impl ReminderScheduler for LogOnlyReminderScheduler {
    fn arm_daily_reminder(&self) {
        info!("event=reminder_arm module=reminder status=ok backend=log_only");
    }

    fn disarm_daily_reminder(&self) {
        info!("event=reminder_disarm module=reminder status=ok backend=log_only");
    }
}
