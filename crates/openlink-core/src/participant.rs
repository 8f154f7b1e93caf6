//! Call participants.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::call::CallDirection;
use crate::types::Jid;
use crate::validate::{Build, ErrorSink, Requirement};

wire_enum!(
    /// Whether a participant is currently connected to the call.
    pub enum ParticipantType {
        Active => "Active",
        Inactive => "Inactive",
    }
);

const PARTICIPANT_JID: Requirement = Requirement::new(
    "The participant jid has not been set",
    "Invalid participant; missing participant jid is mandatory",
);
const PARTICIPANT_TYPE: Requirement = Requirement::new(
    "The participant type has not been set",
    "Invalid participant; missing participant type is mandatory",
);
const PARTICIPANT_DIRECTION: Requirement = Requirement::new(
    "The participant direction has not been set",
    "Invalid participant; missing participant direction is mandatory",
);

/// A user taking part in a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    jid: Option<Jid>,
    participant_type: Option<ParticipantType>,
    direction: Option<CallDirection>,
    start_time: Option<DateTime<Utc>>,
    duration: Option<Duration>,
}

impl Participant {
    pub fn builder() -> ParticipantBuilder {
        ParticipantBuilder::default()
    }

    pub fn jid(&self) -> Option<&Jid> {
        self.jid.as_ref()
    }

    pub fn participant_type(&self) -> Option<ParticipantType> {
        self.participant_type
    }

    pub fn direction(&self) -> Option<CallDirection> {
        self.direction
    }

    /// When this participant joined the call.
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticipantBuilder {
    jid: Option<Jid>,
    participant_type: Option<ParticipantType>,
    direction: Option<CallDirection>,
    start_time: Option<DateTime<Utc>>,
    duration: Option<Duration>,
}

impl ParticipantBuilder {
    pub fn set_jid(&mut self, jid: Jid) -> &mut Self {
        self.jid = Some(jid);
        self
    }

    pub fn set_type(&mut self, participant_type: ParticipantType) -> &mut Self {
        self.participant_type = Some(participant_type);
        self
    }

    pub fn set_direction(&mut self, direction: CallDirection) -> &mut Self {
        self.direction = Some(direction);
        self
    }

    /// Kept to whole milliseconds, the precision of the wire form.
    pub fn set_start_time(&mut self, start_time: DateTime<Utc>) -> &mut Self {
        self.start_time = Some(start_time.trunc_subsecs(3));
        self
    }

    /// Kept to whole milliseconds, like the start time.
    pub fn set_duration(&mut self, duration: Duration) -> &mut Self {
        self.duration = Some(Duration::milliseconds(duration.num_milliseconds()));
        self
    }
}

impl Build for ParticipantBuilder {
    type Output = Participant;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.jid.is_some(), &PARTICIPANT_JID)?;
        sink.check(self.participant_type.is_some(), &PARTICIPANT_TYPE)?;
        sink.check(self.direction.is_some(), &PARTICIPANT_DIRECTION)
    }

    fn assemble(&self) -> Participant {
        Participant {
            jid: self.jid.clone(),
            participant_type: self.participant_type,
            direction: self.direction,
            start_time: self.start_time,
            duration: self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn builds_a_participant() {
        let start = Utc.with_ymd_and_hms(2017, 10, 9, 8, 7, 0).unwrap();
        let participant = Participant::builder()
            .set_jid(Jid::parse("trader@example.com").unwrap())
            .set_type(ParticipantType::Active)
            .set_direction(CallDirection::Incoming)
            .set_start_time(start)
            .set_duration(Duration::seconds(60))
            .build()
            .unwrap();

        assert_eq!(participant.jid().unwrap().to_string(), "trader@example.com");
        assert_eq!(participant.participant_type(), Some(ParticipantType::Active));
        assert_eq!(participant.direction(), Some(CallDirection::Incoming));
        assert_eq!(participant.start_time(), Some(start));
        assert_eq!(participant.duration(), Some(Duration::milliseconds(60_000)));
    }

    #[test]
    fn times_are_kept_to_the_millisecond() {
        let start = Utc.timestamp_opt(1_507_536_420, 123_456_789).unwrap();
        let participant = Participant::builder()
            .set_start_time(start)
            .set_duration(Duration::microseconds(1_500))
            .build_with_diagnostics(&mut Vec::new());

        assert_eq!(
            participant.start_time(),
            Some(Utc.timestamp_opt(1_507_536_420, 123_000_000).unwrap())
        );
        assert_eq!(participant.duration(), Some(Duration::milliseconds(1)));
    }

    #[test]
    fn strict_and_diagnostic_modes_agree_on_order() {
        let builder = Participant::builder();
        assert_eq!(
            builder.build().unwrap_err().to_string(),
            "The participant jid has not been set"
        );

        let mut diagnostics = Vec::new();
        builder.build_with_diagnostics(&mut diagnostics);
        assert_eq!(
            diagnostics,
            vec![
                "Invalid participant; missing participant jid is mandatory",
                "Invalid participant; missing participant type is mandatory",
                "Invalid participant; missing participant direction is mandatory",
            ]
        );
    }
}
