use chrono::{DateTime, Utc};
use contracts::domain::a005_registration_timeline::aggregate::{
    BoundaryKind, PhaseStatus, RegistrationTimelineDto, TimelinePhaseDto,
};
use contracts::shared::validation::FieldErrors;
use uuid::Uuid;

use crate::shared::date_utils::{format_datetime, parse_input_value, to_input_value, Countdown};

/// One phase as rendered in the read-only timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseRow {
    pub id: String,
    pub name: String,
    pub status: PhaseStatus,
    pub window: String,
    pub seats: String,
}

pub fn phase_rows(timeline: &RegistrationTimelineDto, now: DateTime<Utc>) -> Vec<PhaseRow> {
    let mut phases: Vec<&TimelinePhaseDto> = timeline.phases.iter().collect();
    phases.sort_by_key(|p| p.starts_at);
    phases
        .into_iter()
        .map(|p| PhaseRow {
            id: p.id.clone(),
            name: p.name.clone(),
            status: p.status_at(now),
            window: format!("{} – {}", format_datetime(&p.starts_at), format_datetime(&p.ends_at)),
            seats: match p.capacity {
                Some(c) if p.is_sold_out() => format!("{} / {} (sold out)", p.registered, c),
                Some(c) => format!("{} / {}", p.registered, c),
                None => p.registered.to_string(),
            },
        })
        .collect()
}

/// "Regular opens in 2d 03:04:05", or `None` once every boundary has passed.
pub fn countdown_caption(timeline: &RegistrationTimelineDto, now: DateTime<Utc>) -> Option<String> {
    let boundary = timeline.next_boundary(now)?;
    let verb = match boundary.kind {
        BoundaryKind::Opens => "opens",
        BoundaryKind::Closes => "closes",
    };
    Some(format!(
        "{} {} in {}",
        boundary.phase.name,
        verb,
        Countdown::between(now, boundary.at)
    ))
}

/// Editable phase; dates are `datetime-local` strings.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseInput {
    pub id: String,
    pub name: String,
    pub starts_at: String,
    pub ends_at: String,
    pub capacity: String,
    pub registered: u32,
}

impl From<&TimelinePhaseDto> for PhaseInput {
    fn from(p: &TimelinePhaseDto) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            starts_at: to_input_value(&p.starts_at),
            ends_at: to_input_value(&p.ends_at),
            capacity: p.capacity.map(|c| c.to_string()).unwrap_or_default(),
            registered: p.registered,
        }
    }
}

impl PhaseInput {
    /// Blank phase starting where the previous one ends.
    pub fn after(previous: Option<&PhaseInput>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            starts_at: previous.map(|p| p.ends_at.clone()).unwrap_or_default(),
            ends_at: String::new(),
            capacity: String::new(),
            registered: 0,
        }
    }
}

/// Parse every row, then check ordering and overlaps.
///
/// Errors use `phases.{index}.{field}` keys matching the row order.
pub fn build_timeline(
    event_id: &str,
    inputs: &[PhaseInput],
) -> Result<RegistrationTimelineDto, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut phases = Vec::with_capacity(inputs.len());

    for (i, input) in inputs.iter().enumerate() {
        let starts_at = parse_input_value(&input.starts_at);
        let ends_at = parse_input_value(&input.ends_at);
        errors.check(&format!("phases.{}.starts_at", i), starts_at.is_some(), "Enter a start date");
        errors.check(&format!("phases.{}.ends_at", i), ends_at.is_some(), "Enter an end date");
        let capacity = match input.capacity.trim() {
            "" => Some(None),
            raw => raw.parse::<u32>().ok().map(Some),
        };
        errors.check(
            &format!("phases.{}.capacity", i),
            capacity.is_some(),
            "Enter a whole number or leave empty",
        );

        if let (Some(starts_at), Some(ends_at)) = (starts_at, ends_at) {
            phases.push(TimelinePhaseDto {
                id: input.id.clone(),
                name: input.name.trim().to_string(),
                starts_at,
                ends_at,
                capacity: capacity.flatten(),
                registered: input.registered,
            });
        }
    }
    errors.into_result()?;

    let timeline = RegistrationTimelineDto {
        event_id: event_id.to_string(),
        phases,
    };
    timeline.validate()?;
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, day, hour, 0, 0).unwrap()
    }

    fn phase(id: &str, name: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> TimelinePhaseDto {
        TimelinePhaseDto {
            id: id.to_string(),
            name: name.to_string(),
            starts_at: from,
            ends_at: to,
            capacity: Some(100),
            registered: 40,
        }
    }

    fn timeline() -> RegistrationTimelineDto {
        RegistrationTimelineDto {
            event_id: "ev1".to_string(),
            phases: vec![
                phase("p2", "Regular", at(11, 0), at(20, 0)),
                phase("p1", "Early bird", at(1, 0), at(10, 0)),
            ],
        }
    }

    fn input(name: &str, from: &str, to: &str) -> PhaseInput {
        PhaseInput {
            id: name.to_lowercase(),
            name: name.to_string(),
            starts_at: from.to_string(),
            ends_at: to.to_string(),
            capacity: String::new(),
            registered: 0,
        }
    }

    #[test]
    fn test_rows_are_chronological_with_status() {
        let rows = phase_rows(&timeline(), at(12, 0));
        assert_eq!(rows[0].name, "Early bird");
        assert_eq!(rows[0].status, PhaseStatus::Closed);
        assert_eq!(rows[1].status, PhaseStatus::Open);
        assert_eq!(rows[1].seats, "40 / 100");
    }

    #[test]
    fn test_countdown_targets_next_boundary() {
        let caption = countdown_caption(&timeline(), at(5, 0));
        assert_eq!(caption.as_deref(), Some("Early bird closes in 5d 00:00:00"));

        let caption = countdown_caption(&timeline(), at(12, 0));
        assert_eq!(caption.as_deref(), Some("Regular closes in 8d 00:00:00"));

        assert_eq!(countdown_caption(&timeline(), at(25, 0)), None);
    }

    #[test]
    fn test_build_timeline_parses_rows() {
        let mut early = input("Early bird", "2030-03-01T00:00", "2030-03-10T00:00");
        early.capacity = "150".to_string();
        let regular = input("Regular", "2030-03-10T00:00", "2030-03-20T00:00");

        let built = build_timeline("ev1", &[early, regular]).unwrap();
        assert_eq!(built.event_id, "ev1");
        assert_eq!(built.phases.len(), 2);
        assert_eq!(built.phases[0].capacity, Some(150));
        assert_eq!(built.phases[1].capacity, None);
    }

    #[test]
    fn test_build_timeline_reports_row_errors() {
        let mut broken = input("Late", "", "2030-03-25T00:00");
        broken.capacity = "many".to_string();
        let errors = build_timeline("ev1", &[broken]).unwrap_err();
        assert!(errors.has("phases.0.starts_at"));
        assert!(errors.has("phases.0.capacity"));
    }

    #[test]
    fn test_build_timeline_rejects_overlap() {
        let a = input("Early bird", "2030-03-01T00:00", "2030-03-10T00:00");
        let b = input("Regular", "2030-03-09T00:00", "2030-03-20T00:00");
        let errors = build_timeline("ev1", &[a, b]).unwrap_err();
        assert!(errors.has("phases.1.starts_at"));
    }

    #[test]
    fn test_new_phase_continues_previous() {
        let a = input("Early bird", "2030-03-01T00:00", "2030-03-10T00:00");
        let next = PhaseInput::after(Some(&a));
        assert_eq!(next.starts_at, "2030-03-10T00:00");
        assert!(next.ends_at.is_empty());
        assert!(!next.id.is_empty());
    }
}
