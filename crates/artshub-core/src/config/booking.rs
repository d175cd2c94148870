//! Booking policy configuration.

use serde::{Deserialize, Serialize};

/// Booking lifecycle and policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Roles treated as administrative for booking management.
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<String>,
    /// Minutes a booking may sit in `pending` before it is auto-cancelled.
    #[serde(default = "default_pending_timeout")]
    pub pending_timeout_minutes: i64,
    /// Whether the worker auto-cancels stale pending bookings.
    #[serde(default = "default_true")]
    pub auto_cancel_pending: bool,
    /// Maximum number of days a single availability query may span.
    #[serde(default = "default_max_availability_days")]
    pub max_availability_days: i64,
}

impl BookingConfig {
    /// Whether the given role is configured as administrative.
    pub fn is_admin_role(&self, role: &str) -> bool {
        self.admin_roles.iter().any(|r| r == role)
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            admin_roles: default_admin_roles(),
            pending_timeout_minutes: default_pending_timeout(),
            auto_cancel_pending: default_true(),
            max_availability_days: default_max_availability_days(),
        }
    }
}

fn default_admin_roles() -> Vec<String> {
    vec!["staff".to_string(), "admin".to_string()]
}

fn default_pending_timeout() -> i64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_max_availability_days() -> i64 {
    31
}
