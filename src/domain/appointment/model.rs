//! Appointment domain entity and its status lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

/// Appointment status
///
/// ```text
/// scheduled ──► in_progress ──► completed
///     │              │
///     └──────────────┴────────► cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        Self::Scheduled,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Some(Self::Scheduled),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::InProgress)
                | (Self::Scheduled, Self::Cancelled)
                | (Self::InProgress, Self::Completed)
                | (Self::InProgress, Self::Cancelled)
        )
    }

    /// Validates a move to `next`, returning it on success.
    pub fn transition_to(&self, next: AppointmentStatus) -> DomainResult<AppointmentStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::Validation(format!(
                "Cannot change appointment status from '{}' to '{}'",
                self, next
            )))
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub service_id: i32,
    pub appointment_date: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub technician_notes: Option<String>,
    /// Service price at booking time. Later catalog changes do not touch it.
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Appointment joined with the names a client needs to render it.
#[derive(Debug, Clone)]
pub struct AppointmentView {
    pub appointment: Appointment,
    pub service_name: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub license_plate: Option<String>,
    pub owner_username: String,
    pub owner_full_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub user_id: i32,
    pub vehicle_id: i32,
    pub service_id: i32,
    pub appointment_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub total_price: Decimal,
}

/// Partial update applied by the repository. Status validation happens
/// before this is built.
#[derive(Debug, Clone, Default)]
pub struct AppointmentChanges {
    pub appointment_date: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub technician_notes: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl AppointmentChanges {
    pub fn is_empty(&self) -> bool {
        self.appointment_date.is_none()
            && self.status.is_none()
            && self.notes.is_none()
            && self.technician_notes.is_none()
            && self.completed_at.is_none()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip() {
        for status in AppointmentStatus::ALL {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("confirmed"), None);
    }

    #[test]
    fn scheduled_can_start_or_cancel() {
        use AppointmentStatus::*;
        assert!(Scheduled.can_transition_to(InProgress));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(!Scheduled.can_transition_to(Completed));
        assert!(!Scheduled.can_transition_to(Scheduled));
    }

    #[test]
    fn in_progress_can_complete_or_cancel() {
        use AppointmentStatus::*;
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(!InProgress.can_transition_to(Scheduled));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for from in [AppointmentStatus::Completed, AppointmentStatus::Cancelled] {
            assert!(from.is_terminal());
            for to in AppointmentStatus::ALL {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn invalid_transition_is_validation_error() {
        let err = AppointmentStatus::Completed
            .transition_to(AppointmentStatus::Scheduled)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            AppointmentStatus::Scheduled
                .transition_to(AppointmentStatus::InProgress)
                .unwrap(),
            AppointmentStatus::InProgress
        );
    }
}
