//! User profiles and the request actions they permit.

use serde::{Deserialize, Serialize};

use crate::site::Site;
use crate::types::{DeviceId, ProfileId};
use crate::validate::{Build, ErrorSink, Requirement};

wire_enum!(
    /// A call-control request a profile or call allows.
    pub enum RequestAction {
        AnswerCall => "AnswerCall",
        ClearCall => "ClearCall",
        ClearConference => "ClearConference",
        ClearConnection => "ClearConnection",
        HoldCall => "HoldCall",
        RetrieveCall => "RetrieveCall",
        JoinCall => "JoinCall",
        PrivateCall => "PrivateCall",
        PublicCall => "PublicCall",
        TransferCall => "TransferCall",
        ConsultationCall => "ConsultationCall",
        IntercomTransfer => "IntercomTransfer",
        SingleStepTransfer => "SingleStepTransfer",
        SendDigits => "SendDigits",
        StartVoiceDrop => "StartVoiceDrop",
        StopVoiceDrop => "StopVoiceDrop",
        AddThirdParty => "AddThirdParty",
        RemoveThirdParty => "RemoveThirdParty",
        ConnectSpeaker => "ConnectSpeaker",
        DisconnectSpeaker => "DisconnectSpeaker",
    }
);

impl RequestAction {
    /// Returns the human-readable label sent alongside the action id.
    pub fn description(&self) -> &'static str {
        match self {
            Self::AnswerCall => "Answers an alerting call on active handset",
            Self::ClearCall => "Removes all participants from a call",
            Self::ClearConference => "Clears the conference",
            Self::ClearConnection => "Removes this device from the call",
            Self::HoldCall => "Places the call on hold",
            Self::RetrieveCall => "Re-connects a held call",
            Self::JoinCall => "Joins an existing call",
            Self::PrivateCall => "Makes the call private",
            Self::PublicCall => "Makes the call public",
            Self::TransferCall => "Completes a consultation transfer",
            Self::ConsultationCall => "Holds the call and dials a consultation party",
            Self::IntercomTransfer => "Transfers the call over the intercom",
            Self::SingleStepTransfer => "Transfers the call without consultation",
            Self::SendDigits => "Sends DTMF digits on the call",
            Self::StartVoiceDrop => "Starts playing a recorded message",
            Self::StopVoiceDrop => "Stops playing a recorded message",
            Self::AddThirdParty => "Adds a party to the call",
            Self::RemoveThirdParty => "Removes a party from the call",
            Self::ConnectSpeaker => "Connects the call to a speaker channel",
            Self::DisconnectSpeaker => "Disconnects the call from a speaker channel",
        }
    }
}

/// A permitted action as listed on a profile, with the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileAction {
    action: RequestAction,
    label: String,
}

impl ProfileAction {
    /// Lists `action` under its standard description.
    pub fn new(action: RequestAction) -> Self {
        Self {
            action,
            label: action.description().to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn action(&self) -> RequestAction {
        self.action
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl From<RequestAction> for ProfileAction {
    fn from(action: RequestAction) -> Self {
        Self::new(action)
    }
}

const PROFILE_ID: Requirement = Requirement::new(
    "The profile id has not been set",
    "Invalid profile; missing profile id is mandatory",
);
const PROFILE_SITE: Requirement = Requirement::new(
    "The profile site has not been set",
    "Invalid profile; missing profile site is mandatory",
);
const PROFILE_DEFAULT: Requirement = Requirement::new(
    "The profile default indicator has not been set",
    "Invalid profile; missing profile default indicator is mandatory",
);
const PROFILE_LABEL: Requirement = Requirement::new(
    "The profile label has not been set",
    "Invalid profile; missing profile label is mandatory",
);
const PROFILE_ONLINE: Requirement = Requirement::new(
    "The profile online indicator has not been set",
    "Invalid profile; missing profile online indicator is mandatory",
);

/// A device/identity configuration usable to place or answer calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id: Option<ProfileId>,
    site: Option<Site>,
    default: Option<bool>,
    device: Option<DeviceId>,
    label: Option<String>,
    online: Option<bool>,
    actions: Vec<ProfileAction>,
}

impl Profile {
    /// Starts a new profile builder.
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }

    pub fn id(&self) -> Option<&ProfileId> {
        self.id.as_ref()
    }

    pub fn site(&self) -> Option<&Site> {
        self.site.as_ref()
    }

    pub fn is_default(&self) -> Option<bool> {
        self.default
    }

    pub fn device(&self) -> Option<&DeviceId> {
        self.device.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_online(&self) -> Option<bool> {
        self.online
    }

    /// The actions this profile may request, in the order they were added.
    pub fn actions(&self) -> &[ProfileAction] {
        &self.actions
    }
}

/// Builder for [`Profile`].
///
/// Mandatory fields, in check order: id, site, default indicator, label,
/// online indicator.
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    id: Option<ProfileId>,
    site: Option<Site>,
    default: Option<bool>,
    device: Option<DeviceId>,
    label: Option<String>,
    online: Option<bool>,
    actions: Vec<ProfileAction>,
}

impl ProfileBuilder {
    pub fn set_id(&mut self, id: ProfileId) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn set_site(&mut self, site: Site) -> &mut Self {
        self.site = Some(site);
        self
    }

    pub fn set_default(&mut self, default: bool) -> &mut Self {
        self.default = Some(default);
        self
    }

    pub fn set_device(&mut self, device: DeviceId) -> &mut Self {
        self.device = Some(device);
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_online(&mut self, online: bool) -> &mut Self {
        self.online = Some(online);
        self
    }

    pub fn add_action(&mut self, action: impl Into<ProfileAction>) -> &mut Self {
        self.actions.push(action.into());
        self
    }

    pub fn add_actions<I>(&mut self, actions: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<ProfileAction>,
    {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }

    /// The id set so far; used by result builders to enforce uniqueness.
    pub fn id(&self) -> Option<&ProfileId> {
        self.id.as_ref()
    }
}

impl Build for ProfileBuilder {
    type Output = Profile;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.id.is_some(), &PROFILE_ID)?;
        sink.check(self.site.is_some(), &PROFILE_SITE)?;
        sink.check(self.default.is_some(), &PROFILE_DEFAULT)?;
        sink.check(self.label.is_some(), &PROFILE_LABEL)?;
        sink.check(self.online.is_some(), &PROFILE_ONLINE)
    }

    fn assemble(&self) -> Profile {
        Profile {
            id: self.id.clone(),
            site: self.site.clone(),
            default: self.default,
            device: self.device.clone(),
            label: self.label.clone(),
            online: self.online,
            actions: self.actions.clone(),
        }
    }
}
