//! Calls and their state.
//!
//! A [`Call`] is the richest entity in the model: a handful of mandatory
//! fields (id, site, state, direction, start time, duration) plus optional
//! caller/called details, originator references, permitted actions, device
//! features and participants.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::call_status::CallStatus;
use crate::feature::{CallFeature, FeatureType};
use crate::participant::Participant;
use crate::profile::RequestAction;
use crate::site::Site;
use crate::types::{
    CallId, ConferenceId, FeatureId, InterestId, PhoneNumber, ProfileId, TelephonyCallId,
};
use crate::validate::{Build, ErrorSink, Requirement};

wire_enum!(
    /// Which party placed the call.
    pub enum CallDirection {
        Incoming => "Incoming",
        Outgoing => "Outgoing",
    }
);

wire_enum!(
    /// The lifecycle state of a call.
    pub enum CallState {
        CallOriginated => "CallOriginated",
        CallDelivered => "CallDelivered",
        CallEstablished => "CallEstablished",
        CallFailed => "CallFailed",
        CallConferenced => "CallConferenced",
        CallBusy => "CallBusy",
        CallHeld => "CallHeld",
        CallHeldElsewhere => "CallHeldElsewhere",
        CallTransferring => "CallTransferring",
        CallTransferred => "CallTransferred",
        ConnectionCleared => "ConnectionCleared",
        CallMissed => "CallMissed",
    }
);

impl CallState {
    /// Returns true if a user in this state, on a call in `direction`, is
    /// taking part in the call.
    ///
    /// An alerting incoming call (delivered or busy) does not count until it
    /// is answered; an outgoing call counts from the moment it is dialled.
    pub fn is_participating(&self, direction: CallDirection) -> bool {
        match self {
            Self::CallOriginated | Self::CallDelivered | Self::CallBusy => {
                direction == CallDirection::Outgoing
            }
            Self::CallEstablished
            | Self::CallConferenced
            | Self::CallHeld
            | Self::CallTransferring => true,
            Self::CallFailed
            | Self::CallHeldElsewhere
            | Self::CallTransferred
            | Self::ConnectionCleared
            | Self::CallMissed => false,
        }
    }
}

/// An opaque key/value tag attached to a call by its originator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OriginatorReference {
    key: String,
    value: String,
}

impl OriginatorReference {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

const CALL_ID: Requirement = Requirement::new(
    "The call id has not been set",
    "Invalid call status; missing call id is mandatory",
);
const CALL_SITE: Requirement = Requirement::new(
    "The call site has not been set",
    "Invalid call status; missing call site is mandatory",
);
const CALL_STATE: Requirement = Requirement::new(
    "The call state has not been set",
    "Invalid call status; missing call state is mandatory",
);
const CALL_DIRECTION: Requirement = Requirement::new(
    "The call direction has not been set",
    "Invalid call status; missing call direction is mandatory",
);
const CALL_START_TIME: Requirement = Requirement::new(
    "The call start time has not been set",
    "Invalid call status; missing call start time is mandatory",
);
const CALL_DURATION: Requirement = Requirement::new(
    "The call duration has not been set",
    "Invalid call status; missing call duration is mandatory",
);

/// A telephony call as reported in call status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    id: Option<CallId>,
    telephony_call_id: Option<TelephonyCallId>,
    conference_id: Option<ConferenceId>,
    site: Option<Site>,
    profile_id: Option<ProfileId>,
    interest_id: Option<InterestId>,
    state: Option<CallState>,
    direction: Option<CallDirection>,
    caller_number: Option<PhoneNumber>,
    caller_name: Option<String>,
    caller_e164_numbers: Vec<PhoneNumber>,
    called_number: Option<PhoneNumber>,
    called_name: Option<String>,
    called_destination: Option<PhoneNumber>,
    called_e164_numbers: Vec<PhoneNumber>,
    originator_references: Vec<OriginatorReference>,
    start_time: Option<DateTime<Utc>>,
    duration: Option<Duration>,
    actions: Vec<RequestAction>,
    features: Vec<CallFeature>,
    participants: Vec<Participant>,
}

impl Call {
    /// Starts a new call builder.
    pub fn builder() -> CallBuilder {
        CallBuilder::default()
    }

    pub fn id(&self) -> Option<&CallId> {
        self.id.as_ref()
    }

    pub fn telephony_call_id(&self) -> Option<&TelephonyCallId> {
        self.telephony_call_id.as_ref()
    }

    pub fn conference_id(&self) -> Option<&ConferenceId> {
        self.conference_id.as_ref()
    }

    pub fn site(&self) -> Option<&Site> {
        self.site.as_ref()
    }

    pub fn profile_id(&self) -> Option<&ProfileId> {
        self.profile_id.as_ref()
    }

    pub fn interest_id(&self) -> Option<&InterestId> {
        self.interest_id.as_ref()
    }

    pub fn state(&self) -> Option<CallState> {
        self.state
    }

    pub fn direction(&self) -> Option<CallDirection> {
        self.direction
    }

    pub fn caller_number(&self) -> Option<&PhoneNumber> {
        self.caller_number.as_ref()
    }

    pub fn caller_name(&self) -> Option<&str> {
        self.caller_name.as_deref()
    }

    pub fn caller_e164_numbers(&self) -> &[PhoneNumber] {
        &self.caller_e164_numbers
    }

    pub fn called_number(&self) -> Option<&PhoneNumber> {
        self.called_number.as_ref()
    }

    pub fn called_name(&self) -> Option<&str> {
        self.called_name.as_deref()
    }

    pub fn called_destination(&self) -> Option<&PhoneNumber> {
        self.called_destination.as_ref()
    }

    pub fn called_e164_numbers(&self) -> &[PhoneNumber] {
        &self.called_e164_numbers
    }

    pub fn originator_references(&self) -> &[OriginatorReference] {
        &self.originator_references
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn actions(&self) -> &[RequestAction] {
        &self.actions
    }

    pub fn features(&self) -> &[CallFeature] {
        &self.features
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Returns the id of an enabled handset.
    ///
    /// If several handsets are enabled, any one of them may be returned.
    pub fn active_handset(&self) -> Option<&FeatureId> {
        self.enabled_feature(FeatureType::Handset)
    }

    /// Returns the id of an enabled headset.
    ///
    /// If several headsets are enabled, any one of them may be returned.
    pub fn active_headset(&self) -> Option<&FeatureId> {
        self.enabled_feature(FeatureType::Headset)
    }

    /// Returns the channel of an active speaker, if any.
    pub fn active_speaker_channel(&self) -> Option<i64> {
        self.features.iter().find_map(|feature| match feature {
            CallFeature::SpeakerChannel(speaker) => speaker.channel(),
            CallFeature::Boolean(_) => None,
        })
    }

    /// `None` when no privacy feature carries a value.
    pub fn is_private(&self) -> Option<bool> {
        self.features.iter().find_map(|feature| match feature {
            CallFeature::Boolean(flag) if flag.kind() == Some(FeatureType::Privacy) => {
                flag.enabled()
            }
            _ => None,
        })
    }

    pub fn is_public(&self) -> Option<bool> {
        self.is_private().map(|private| !private)
    }

    /// Whether the user is taking part in the call; `None` without state or direction.
    pub fn is_participating(&self) -> Option<bool> {
        match (self.state, self.direction) {
            (Some(state), Some(direction)) => Some(state.is_participating(direction)),
            _ => None,
        }
    }

    /// Wraps this call in a call status with the given busy indicator.
    pub fn to_call_status(&self, busy: Option<bool>) -> CallStatus {
        let mut builder = CallStatus::builder();
        builder.add_call(self.clone());
        if let Some(busy) = busy {
            builder.set_busy(busy);
        }
        builder.assemble()
    }

    fn enabled_feature(&self, kind: FeatureType) -> Option<&FeatureId> {
        self.features.iter().find_map(|feature| match feature {
            CallFeature::Boolean(flag)
                if flag.kind() == Some(kind) && flag.enabled() == Some(true) =>
            {
                flag.id()
            }
            _ => None,
        })
    }
}

/// Builder for [`Call`].
#[derive(Debug, Clone, Default)]
pub struct CallBuilder {
    id: Option<CallId>,
    telephony_call_id: Option<TelephonyCallId>,
    conference_id: Option<ConferenceId>,
    site: Option<Site>,
    profile_id: Option<ProfileId>,
    interest_id: Option<InterestId>,
    state: Option<CallState>,
    direction: Option<CallDirection>,
    caller_number: Option<PhoneNumber>,
    caller_name: Option<String>,
    caller_e164_numbers: Vec<PhoneNumber>,
    called_number: Option<PhoneNumber>,
    called_name: Option<String>,
    called_destination: Option<PhoneNumber>,
    called_e164_numbers: Vec<PhoneNumber>,
    originator_references: Vec<OriginatorReference>,
    start_time: Option<DateTime<Utc>>,
    duration: Option<Duration>,
    actions: Vec<RequestAction>,
    features: Vec<CallFeature>,
    participants: Vec<Participant>,
}

impl CallBuilder {
    pub fn set_id(&mut self, id: CallId) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn set_telephony_call_id(&mut self, id: TelephonyCallId) -> &mut Self {
        self.telephony_call_id = Some(id);
        self
    }

    pub fn set_conference_id(&mut self, id: ConferenceId) -> &mut Self {
        self.conference_id = Some(id);
        self
    }

    pub fn set_site(&mut self, site: Site) -> &mut Self {
        self.site = Some(site);
        self
    }

    pub fn set_profile_id(&mut self, id: ProfileId) -> &mut Self {
        self.profile_id = Some(id);
        self
    }

    pub fn set_interest_id(&mut self, id: InterestId) -> &mut Self {
        self.interest_id = Some(id);
        self
    }

    pub fn set_state(&mut self, state: CallState) -> &mut Self {
        self.state = Some(state);
        self
    }

    pub fn set_direction(&mut self, direction: CallDirection) -> &mut Self {
        self.direction = Some(direction);
        self
    }

    pub fn set_caller_number(&mut self, number: PhoneNumber) -> &mut Self {
        self.caller_number = Some(number);
        self
    }

    pub fn set_caller_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.caller_name = Some(name.into());
        self
    }

    pub fn add_caller_e164_number(&mut self, number: PhoneNumber) -> &mut Self {
        self.caller_e164_numbers.push(number);
        self
    }

    pub fn add_caller_e164_numbers(
        &mut self,
        numbers: impl IntoIterator<Item = PhoneNumber>,
    ) -> &mut Self {
        self.caller_e164_numbers.extend(numbers);
        self
    }

    pub fn set_called_number(&mut self, number: PhoneNumber) -> &mut Self {
        self.called_number = Some(number);
        self
    }

    pub fn set_called_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.called_name = Some(name.into());
        self
    }

    pub fn set_called_destination(&mut self, destination: PhoneNumber) -> &mut Self {
        self.called_destination = Some(destination);
        self
    }

    pub fn add_called_e164_number(&mut self, number: PhoneNumber) -> &mut Self {
        self.called_e164_numbers.push(number);
        self
    }

    pub fn add_called_e164_numbers(
        &mut self,
        numbers: impl IntoIterator<Item = PhoneNumber>,
    ) -> &mut Self {
        self.called_e164_numbers.extend(numbers);
        self
    }

    pub fn add_originator_reference(&mut self, reference: OriginatorReference) -> &mut Self {
        self.originator_references.push(reference);
        self
    }

    pub fn add_originator_references(
        &mut self,
        references: impl IntoIterator<Item = OriginatorReference>,
    ) -> &mut Self {
        self.originator_references.extend(references);
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

    pub fn add_action(&mut self, action: RequestAction) -> &mut Self {
        self.actions.push(action);
        self
    }

    pub fn add_actions(&mut self, actions: impl IntoIterator<Item = RequestAction>) -> &mut Self {
        self.actions.extend(actions);
        self
    }

    pub fn add_feature(&mut self, feature: impl Into<CallFeature>) -> &mut Self {
        self.features.push(feature.into());
        self
    }

    pub fn add_features(&mut self, features: impl IntoIterator<Item = CallFeature>) -> &mut Self {
        self.features.extend(features);
        self
    }

    pub fn add_participant(&mut self, participant: Participant) -> &mut Self {
        self.participants.push(participant);
        self
    }

    pub fn add_participants(
        &mut self,
        participants: impl IntoIterator<Item = Participant>,
    ) -> &mut Self {
        self.participants.extend(participants);
        self
    }
}

impl Build for CallBuilder {
    type Output = Call;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.id.is_some(), &CALL_ID)?;
        sink.check(self.site.is_some(), &CALL_SITE)?;
        sink.check(self.state.is_some(), &CALL_STATE)?;
        sink.check(self.direction.is_some(), &CALL_DIRECTION)?;
        sink.check(self.start_time.is_some(), &CALL_START_TIME)?;
        sink.check(self.duration.is_some(), &CALL_DURATION)
    }

    fn assemble(&self) -> Call {
        Call {
            id: self.id.clone(),
            telephony_call_id: self.telephony_call_id.clone(),
            conference_id: self.conference_id.clone(),
            site: self.site.clone(),
            profile_id: self.profile_id.clone(),
            interest_id: self.interest_id.clone(),
            state: self.state,
            direction: self.direction,
            caller_number: self.caller_number.clone(),
            caller_name: self.caller_name.clone(),
            caller_e164_numbers: self.caller_e164_numbers.clone(),
            called_number: self.called_number.clone(),
            called_name: self.called_name.clone(),
            called_destination: self.called_destination.clone(),
            called_e164_numbers: self.called_e164_numbers.clone(),
            originator_references: self.originator_references.clone(),
            start_time: self.start_time,
            duration: self.duration,
            actions: self.actions.clone(),
            features: self.features.clone(),
            participants: self.participants.clone(),
        }
    }
}
