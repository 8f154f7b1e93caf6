//! Call-control domain model: identifiers, entities and validating builders

#[macro_use]
mod macros;

pub mod call;
pub mod call_status;
pub mod error;
pub mod feature;
pub mod interest;
pub mod iq;
pub mod participant;
pub mod profile;
pub mod site;
pub mod tracing;
pub mod types;
pub mod validate;

pub use call::{Call, CallBuilder, CallDirection, CallState, OriginatorReference};
pub use call_status::{CallStatus, CallStatusBuilder};
pub use error::{BuildError, BuildResult};
pub use feature::{
    BooleanFeature, CallFeature, FeatureType, MakeCallFeature, MakeCallFeatureBuilder,
    SpeakerChannelFeature,
};
pub use interest::{Interest, InterestBuilder};
pub use iq::{CommandStatus, IqType};
pub use participant::{Participant, ParticipantBuilder, ParticipantType};
pub use profile::{Profile, ProfileAction, ProfileBuilder, RequestAction};
pub use site::{Site, SiteBuilder, SiteType};
pub use self::tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
pub use types::{
    CallId, ConferenceId, DeviceId, FeatureId, InterestId, InterestType, Jid, PhoneNumber,
    ProfileId, RecorderType, TelephonyCallId, UserId,
};
pub use validate::{Build, ErrorSink, FailFast, Requirement};
