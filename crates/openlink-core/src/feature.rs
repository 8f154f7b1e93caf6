//! Device features attached to calls and make-call requests.

use serde::{Deserialize, Serialize};

use crate::types::FeatureId;
use crate::validate::{Build, ErrorSink, Requirement};

wire_enum!(
    /// The kind of a call feature.
    pub enum FeatureType {
        Privacy => "Privacy",
        Handset => "Handset",
        Headset => "Headset",
        SpeakerChannel => "SpeakerChannel",
        VoiceRecorder => "VoiceRecorder",
    }
);

/// An on/off feature such as a handset, headset or privacy indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanFeature {
    id: Option<FeatureId>,
    kind: Option<FeatureType>,
    label: Option<String>,
    enabled: Option<bool>,
}

impl BooleanFeature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: FeatureId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_kind(mut self, kind: FeatureType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn id(&self) -> Option<&FeatureId> {
        self.id.as_ref()
    }

    pub fn kind(&self) -> Option<FeatureType> {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }
}

/// A speaker channel the call is routed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerChannelFeature {
    id: Option<FeatureId>,
    label: Option<String>,
    channel: Option<i64>,
    microphone: Option<bool>,
    mute: Option<bool>,
}

impl SpeakerChannelFeature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: FeatureId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_channel(mut self, channel: i64) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_microphone(mut self, microphone: bool) -> Self {
        self.microphone = Some(microphone);
        self
    }

    pub fn with_mute(mut self, mute: bool) -> Self {
        self.mute = Some(mute);
        self
    }

    pub fn id(&self) -> Option<&FeatureId> {
        self.id.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn channel(&self) -> Option<i64> {
        self.channel
    }

    pub fn microphone(&self) -> Option<bool> {
        self.microphone
    }

    pub fn mute(&self) -> Option<bool> {
        self.mute
    }
}

/// A feature reported on a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallFeature {
    Boolean(BooleanFeature),
    SpeakerChannel(SpeakerChannelFeature),
}

impl CallFeature {
    pub fn id(&self) -> Option<&FeatureId> {
        match self {
            Self::Boolean(feature) => feature.id(),
            Self::SpeakerChannel(feature) => feature.id(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Boolean(feature) => feature.label(),
            Self::SpeakerChannel(feature) => feature.label(),
        }
    }

    /// The feature kind; speaker channels always report [`FeatureType::SpeakerChannel`].
    pub fn kind(&self) -> Option<FeatureType> {
        match self {
            Self::Boolean(feature) => feature.kind(),
            Self::SpeakerChannel(_) => Some(FeatureType::SpeakerChannel),
        }
    }
}

impl From<BooleanFeature> for CallFeature {
    fn from(feature: BooleanFeature) -> Self {
        Self::Boolean(feature)
    }
}

impl From<SpeakerChannelFeature> for CallFeature {
    fn from(feature: SpeakerChannelFeature) -> Self {
        Self::SpeakerChannel(feature)
    }
}

const MAKE_CALL_FEATURE_ID: Requirement = Requirement::new(
    "The feature id has not been set",
    "Invalid feature; missing feature id is mandatory",
);

/// A feature to apply when placing a call, with up to two free-form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeCallFeature {
    id: Option<FeatureId>,
    value1: Option<String>,
    value2: Option<String>,
}

impl MakeCallFeature {
    pub fn builder() -> MakeCallFeatureBuilder {
        MakeCallFeatureBuilder::default()
    }

    pub fn id(&self) -> Option<&FeatureId> {
        self.id.as_ref()
    }

    pub fn value1(&self) -> Option<&str> {
        self.value1.as_deref()
    }

    pub fn value2(&self) -> Option<&str> {
        self.value2.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MakeCallFeatureBuilder {
    id: Option<FeatureId>,
    value1: Option<String>,
    value2: Option<String>,
}

impl MakeCallFeatureBuilder {
    pub fn set_id(&mut self, id: FeatureId) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn set_value1(&mut self, value: impl Into<String>) -> &mut Self {
        self.value1 = Some(value.into());
        self
    }

    pub fn set_value2(&mut self, value: impl Into<String>) -> &mut Self {
        self.value2 = Some(value.into());
        self
    }
}

impl Build for MakeCallFeatureBuilder {
    type Output = MakeCallFeature;

    fn validate<S: ErrorSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.check(self.id.is_some(), &MAKE_CALL_FEATURE_ID)
    }

    fn assemble(&self) -> MakeCallFeature {
        MakeCallFeature {
            id: self.id.clone(),
            value1: self.value1.clone(),
            value2: self.value2.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature_id(raw: &str) -> FeatureId {
        FeatureId::from(Some(raw)).unwrap()
    }

    #[test]
    fn boolean_feature_accessors() {
        let feature = BooleanFeature::new()
            .with_id(feature_id("hs_1"))
            .with_kind(FeatureType::Handset)
            .with_label("Handset 1")
            .with_enabled(true);

        assert_eq!(feature.id(), Some(&feature_id("hs_1")));
        assert_eq!(feature.kind(), Some(FeatureType::Handset));
        assert_eq!(feature.label(), Some("Handset 1"));
        assert_eq!(feature.enabled(), Some(true));
    }

    #[test]
    fn call_feature_dispatch() {
        let handset: CallFeature = BooleanFeature::new()
            .with_id(feature_id("hs_1"))
            .with_kind(FeatureType::Handset)
            .into();
        let speaker: CallFeature = SpeakerChannelFeature::new()
            .with_id(feature_id("spk_1"))
            .with_label("Speaker 1")
            .with_channel(3)
            .into();

        assert_eq!(handset.kind(), Some(FeatureType::Handset));
        assert_eq!(handset.label(), None);
        assert_eq!(speaker.kind(), Some(FeatureType::SpeakerChannel));
        assert_eq!(speaker.id(), Some(&feature_id("spk_1")));
        assert_eq!(speaker.label(), Some("Speaker 1"));
    }

    #[test]
    fn make_call_feature_requires_id() {
        let error = MakeCallFeature::builder()
            .set_value1("true")
            .build()
            .unwrap_err();
        assert_eq!(error.to_string(), "The feature id has not been set");

        let mut diagnostics = Vec::new();
        let feature = MakeCallFeature::builder()
            .set_value1("true")
            .build_with_diagnostics(&mut diagnostics);
        assert_eq!(
            diagnostics,
            vec!["Invalid feature; missing feature id is mandatory"]
        );
        assert_eq!(feature.value1(), Some("true"));
        assert_eq!(feature.value2(), None);
    }
}
