use crate::shared::validation::FieldErrors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One registration window (early bird, regular, late, on-site, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePhaseDto {
    pub id: String,
    pub name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub registered: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseStatus {
    Upcoming,
    Open,
    Closed,
}

impl PhaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseStatus::Upcoming => "Upcoming",
            PhaseStatus::Open => "Open",
            PhaseStatus::Closed => "Closed",
        }
    }
}

impl TimelinePhaseDto {
    /// `starts_at` is inclusive, `ends_at` exclusive.
    pub fn status_at(&self, now: DateTime<Utc>) -> PhaseStatus {
        if now < self.starts_at {
            PhaseStatus::Upcoming
        } else if now < self.ends_at {
            PhaseStatus::Open
        } else {
            PhaseStatus::Closed
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.capacity.map(|c| self.registered >= c).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryKind {
    Opens,
    Closes,
}

/// Next moment at which some phase opens or closes.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary<'a> {
    pub phase: &'a TimelinePhaseDto,
    pub kind: BoundaryKind,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationTimelineDto {
    pub event_id: String,
    #[serde(default)]
    pub phases: Vec<TimelinePhaseDto>,
}

impl RegistrationTimelineDto {
    pub fn current_phase(&self, now: DateTime<Utc>) -> Option<&TimelinePhaseDto> {
        self.phases
            .iter()
            .find(|p| p.status_at(now) == PhaseStatus::Open)
    }

    pub fn next_boundary(&self, now: DateTime<Utc>) -> Option<Boundary<'_>> {
        self.phases
            .iter()
            .flat_map(|p| {
                [
                    Boundary {
                        phase: p,
                        kind: BoundaryKind::Opens,
                        at: p.starts_at,
                    },
                    Boundary {
                        phase: p,
                        kind: BoundaryKind::Closes,
                        at: p.ends_at,
                    },
                ]
            })
            .filter(|b| b.at > now)
            .min_by_key(|b| b.at)
    }

    pub fn sort_phases(&mut self) {
        self.phases.sort_by_key(|p| p.starts_at);
    }

    /// Every phase named, non-empty, and no two phases overlapping.
    ///
    /// Errors are keyed `phases.{index}.{field}` using the caller's order.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.phases.is_empty() {
            errors.add("phases", "Add at least one registration phase");
        }

        for (i, phase) in self.phases.iter().enumerate() {
            errors.require(&format!("phases.{}.name", i), &phase.name, "Phase name");
            errors.check(
                &format!("phases.{}.ends_at", i),
                phase.ends_at > phase.starts_at,
                "Phase must end after it starts",
            );
            if let Some(capacity) = phase.capacity {
                errors.check(
                    &format!("phases.{}.capacity", i),
                    capacity > 0,
                    "Capacity must be at least 1",
                );
            }
        }

        let mut order: Vec<usize> = (0..self.phases.len()).collect();
        order.sort_by_key(|&i| self.phases[i].starts_at);
        for pair in order.windows(2) {
            let (a, b) = (&self.phases[pair[0]], &self.phases[pair[1]]);
            errors.check(
                &format!("phases.{}.starts_at", pair[1]),
                b.starts_at >= a.ends_at,
                format!("Overlaps with \"{}\"", a.name),
            );
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, day, 0, 0, 0).unwrap()
    }

    fn phase(id: &str, from: u32, to: u32) -> TimelinePhaseDto {
        TimelinePhaseDto {
            id: id.into(),
            name: id.to_uppercase(),
            starts_at: at(from),
            ends_at: at(to),
            capacity: None,
            registered: 0,
        }
    }

    fn timeline() -> RegistrationTimelineDto {
        RegistrationTimelineDto {
            event_id: "ev1".into(),
            phases: vec![phase("early", 1, 10), phase("regular", 10, 20)],
        }
    }

    #[test]
    fn test_phase_status_boundaries() {
        let p = phase("early", 1, 10);
        assert_eq!(p.status_at(at(1) - Duration::seconds(1)), PhaseStatus::Upcoming);
        assert_eq!(p.status_at(at(1)), PhaseStatus::Open);
        assert_eq!(p.status_at(at(10)), PhaseStatus::Closed);
    }

    #[test]
    fn test_current_phase_and_next_boundary() {
        let t = timeline();
        assert_eq!(t.current_phase(at(5)).map(|p| p.id.as_str()), Some("early"));

        let next = t.next_boundary(at(5)).unwrap();
        assert_eq!(next.at, at(10));
        // Closing of the current phase wins the tie with the next opening.
        assert_eq!(next.kind, BoundaryKind::Closes);
        assert_eq!(next.phase.id, "early");

        assert!(t.next_boundary(at(25)).is_none());
    }

    #[test]
    fn test_overlap_detected() {
        let mut t = timeline();
        assert!(t.validate().is_ok());

        t.phases.push(phase("late", 15, 25));
        let errors = t.validate().unwrap_err();
        assert_eq!(errors.get("phases.2.starts_at"), Some("Overlaps with \"REGULAR\""));
    }

    #[test]
    fn test_inverted_phase_rejected() {
        let t = RegistrationTimelineDto {
            event_id: "ev1".into(),
            phases: vec![phase("broken", 10, 5)],
        };
        assert!(t.validate().unwrap_err().has("phases.0.ends_at"));
        assert!(RegistrationTimelineDto::default().validate().unwrap_err().has("phases"));
    }
}
