//! Appointment DTOs

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::services::{AppointmentUpdate, BookAppointment};
use crate::domain::{AppointmentStatus, AppointmentView, DomainError, DomainResult};

/// Appointment joined with its service, vehicle and owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AppointmentDto {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub service_id: i32,
    pub appointment_date: DateTime<Utc>,
    /// `scheduled`, `in_progress`, `completed` or `cancelled`
    pub status: String,
    pub notes: Option<String>,
    pub technician_notes: Option<String>,
    /// Service price at booking time
    #[schema(value_type = f64, example = 60.0)]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub service_name: String,
    pub make: String,
    pub model: String,
    pub license_plate: Option<String>,
    pub username: String,
    pub full_name: Option<String>,
}

impl From<AppointmentView> for AppointmentDto {
    fn from(v: AppointmentView) -> Self {
        let a = v.appointment;
        Self {
            id: a.id,
            user_id: a.user_id,
            vehicle_id: a.vehicle_id,
            service_id: a.service_id,
            appointment_date: a.appointment_date,
            status: a.status.as_str().to_string(),
            notes: a.notes,
            technician_notes: a.technician_notes,
            total_price: a.total_price,
            created_at: a.created_at,
            updated_at: a.updated_at,
            completed_at: a.completed_at,
            service_name: v.service_name,
            make: v.vehicle_make,
            model: v.vehicle_model,
            license_plate: v.license_plate,
            username: v.owner_username,
            full_name: v.owner_full_name,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AppointmentListQuery {
    /// Only appointments in this status
    pub status: Option<String>,
}

impl AppointmentListQuery {
    pub fn status(&self) -> DomainResult<Option<AppointmentStatus>> {
        self.status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(parse_status)
            .transpose()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAppointmentRequest {
    pub vehicle_id: i32,
    pub service_id: i32,
    /// RFC 3339, or a local `YYYY-MM-DD HH:MM[:SS]` read as UTC
    #[schema(example = "2026-11-02T09:30:00Z")]
    pub appointment_date: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl CreateAppointmentRequest {
    pub fn into_booking(self) -> DomainResult<BookAppointment> {
        Ok(BookAppointment {
            vehicle_id: self.vehicle_id,
            service_id: self.service_id,
            appointment_date: parse_appointment_date(&self.appointment_date)?,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAppointmentRequest {
    pub appointment_date: Option<String>,
    /// Target status; must be reachable from the current one
    pub status: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(length(max = 2000))]
    pub technician_notes: Option<String>,
}

impl UpdateAppointmentRequest {
    pub fn into_update(self) -> DomainResult<AppointmentUpdate> {
        Ok(AppointmentUpdate {
            appointment_date: self
                .appointment_date
                .as_deref()
                .map(parse_appointment_date)
                .transpose()?,
            status: self.status.as_deref().map(parse_status).transpose()?,
            notes: self.notes,
            technician_notes: self.technician_notes,
        })
    }
}

fn parse_status(raw: &str) -> DomainResult<AppointmentStatus> {
    AppointmentStatus::parse(raw)
        .ok_or_else(|| DomainError::Validation(format!("Unknown appointment status '{}'", raw)))
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Accepts RFC 3339, a naive date-time (taken as UTC), or a bare date
/// (midnight UTC).
pub fn parse_appointment_date(raw: &str) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    Err(DomainError::Validation(format!(
        "Invalid appointment date '{}'",
        raw
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_appointment_date("2026-11-02T10:30:00+01:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap());
    }

    #[test]
    fn parses_naive_forms_as_utc() {
        let expected = Utc.with_ymd_and_hms(2026, 11, 2, 9, 30, 0).unwrap();
        assert_eq!(parse_appointment_date("2026-11-02 09:30").unwrap(), expected);
        assert_eq!(parse_appointment_date("2026-11-02T09:30:00").unwrap(), expected);
        assert_eq!(
            parse_appointment_date("2026-11-02").unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn garbage_date_is_validation_error() {
        assert!(matches!(
            parse_appointment_date("next tuesday"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn list_query_rejects_unknown_status() {
        let query = AppointmentListQuery {
            status: Some("confirmed".into()),
        };
        assert!(query.status().is_err());

        let blank = AppointmentListQuery {
            status: Some(" ".into()),
        };
        assert_eq!(blank.status().unwrap(), None);
    }

    #[test]
    fn update_request_maps_status() {
        let update = UpdateAppointmentRequest {
            appointment_date: None,
            status: Some("in_progress".into()),
            notes: None,
            technician_notes: Some("Pads worn".into()),
        }
        .into_update()
        .unwrap();
        assert_eq!(update.status, Some(AppointmentStatus::InProgress));
        assert_eq!(update.technician_notes.as_deref(), Some("Pads worn"));
    }
}
