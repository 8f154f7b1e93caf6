//! Tree forms of the domain entities.

use openlink_core::{
    BooleanFeature, Build, Call, CallDirection, CallFeature, CallId, CallState, CallStatus,
    ConferenceId, DeviceId, FeatureId, FeatureType, Interest, InterestId, InterestType, Jid,
    MakeCallFeature, OriginatorReference, Participant, ParticipantType, PhoneNumber, Profile,
    ProfileAction, ProfileId, RequestAction, Site, SiteType, SpeakerChannelFeature,
    TelephonyCallId,
};

use super::{
    decode, format_instant, format_millis, non_empty, parse_bool, parse_instant, parse_integer,
    parse_millis, text_element,
};
use crate::CALL_STATUS_NS;
use crate::element::Element;

const SITE: &str = "site";
const PROFILE: &str = "profile";
const INTEREST: &str = "interest";
const PARTICIPANT: &str = "participant";
const CALL_STATUS: &str = "call status";
const ORIGINATOR_REFERENCE: &str = "originator reference";

pub(crate) fn encode_site(site: &Site) -> Element {
    let element = Element::new("site")
        .with_optional_attribute("id", site.id())
        .with_optional_attribute("default", site.is_default())
        .with_optional_attribute("type", site.site_type().map(|kind| kind.label()));
    match site.name() {
        Some(name) => element.with_text(name),
        None => element,
    }
}

pub(crate) fn decode_site(element: &Element, diagnostics: &mut Vec<String>) -> Site {
    let mut builder = Site::builder();
    if let Some(id) = decode(element.attribute("id"), SITE, "id", diagnostics, parse_integer) {
        builder.set_id(id);
    }
    if let Some(default) = decode(
        element.attribute("default"),
        SITE,
        "default",
        diagnostics,
        parse_bool,
    ) {
        builder.set_default(default);
    }
    if let Some(kind) = decode(
        element.attribute("type"),
        SITE,
        "type",
        diagnostics,
        SiteType::from_label,
    ) {
        builder.set_type(kind);
    }
    if let Some(name) = non_empty(element.text()) {
        builder.set_name(name);
    }
    builder.build_with_diagnostics(diagnostics)
}

pub(crate) fn encode_profile(profile: &Profile) -> Element {
    let mut element = Element::new("profile")
        .with_optional_attribute("id", profile.id())
        .with_optional_attribute("default", profile.is_default())
        .with_optional_attribute("device", profile.device())
        .with_optional_attribute("label", profile.label())
        .with_optional_attribute("online", profile.is_online());
    if let Some(site) = profile.site() {
        element.push_child(encode_site(site));
    }
    if !profile.actions().is_empty() {
        element.push_child(Element::new("actions").with_children(
            profile.actions().iter().map(|action| {
                Element::new("action")
                    .with_attribute("id", action.action().label())
                    .with_attribute("label", action.label())
            }),
        ));
    }
    element
}

pub(crate) fn decode_profile(element: &Element, diagnostics: &mut Vec<String>) -> Profile {
    let mut builder = Profile::builder();
    if let Some(id) = ProfileId::from(element.attribute("id")) {
        builder.set_id(id);
    }
    if let Some(site) = element.child("site") {
        builder.set_site(decode_site(site, diagnostics));
    }
    if let Some(default) = decode(
        element.attribute("default"),
        PROFILE,
        "default",
        diagnostics,
        parse_bool,
    ) {
        builder.set_default(default);
    }
    if let Some(device) = DeviceId::from(element.attribute("device")) {
        builder.set_device(device);
    }
    if let Some(label) = non_empty(element.attribute("label")) {
        builder.set_label(label);
    }
    if let Some(online) = decode(
        element.attribute("online"),
        PROFILE,
        "online",
        diagnostics,
        parse_bool,
    ) {
        builder.set_online(online);
    }
    for action_element in children(element, "actions", "action") {
        if let Some(action) = decode(
            action_element.attribute("id"),
            PROFILE,
            "action",
            diagnostics,
            RequestAction::from_label,
        ) {
            let entry = ProfileAction::new(action);
            builder.add_action(match non_empty(action_element.attribute("label")) {
                Some(label) => entry.with_label(label),
                None => entry,
            });
        }
    }
    builder.build_with_diagnostics(diagnostics)
}

pub(crate) fn encode_interest(interest: &Interest) -> Element {
    Element::new("interest")
        .with_optional_attribute("id", interest.id())
        .with_optional_attribute("type", interest.interest_type())
        .with_optional_attribute("label", interest.label())
        .with_optional_attribute("default", interest.is_default())
}

pub(crate) fn decode_interest(element: &Element, diagnostics: &mut Vec<String>) -> Interest {
    let mut builder = Interest::builder();
    if let Some(id) = InterestId::from(element.attribute("id")) {
        builder.set_id(id);
    }
    if let Some(kind) = InterestType::from(element.attribute("type")) {
        builder.set_type(kind);
    }
    if let Some(label) = non_empty(element.attribute("label")) {
        builder.set_label(label);
    }
    if let Some(default) = decode(
        element.attribute("default"),
        INTEREST,
        "default",
        diagnostics,
        parse_bool,
    ) {
        builder.set_default(default);
    }
    builder.build_with_diagnostics(diagnostics)
}

pub(crate) fn encode_make_call_feature(feature: &MakeCallFeature) -> Element {
    let mut element = Element::new("feature");
    if let Some(id) = feature.id() {
        element.push_child(text_element("id", id.value()));
    }
    if let Some(value) = feature.value1() {
        element.push_child(text_element("value1", value));
    }
    if let Some(value) = feature.value2() {
        element.push_child(text_element("value2", value));
    }
    element
}

pub(crate) fn decode_make_call_feature(
    element: &Element,
    diagnostics: &mut Vec<String>,
) -> MakeCallFeature {
    let mut builder = MakeCallFeature::builder();
    if let Some(id) = FeatureId::from(element.child_text("id")) {
        builder.set_id(id);
    }
    if let Some(value) = non_empty(element.child_text("value1")) {
        builder.set_value1(value);
    }
    if let Some(value) = non_empty(element.child_text("value2")) {
        builder.set_value2(value);
    }
    builder.build_with_diagnostics(diagnostics)
}

/// `None` for an empty list, so nothing is rendered.
pub(crate) fn encode_originator_references(
    references: &[OriginatorReference],
) -> Option<Element> {
    if references.is_empty() {
        return None;
    }
    Some(
        Element::new("originator-ref").with_children(references.iter().map(|reference| {
            Element::new("property")
                .with_attribute("id", reference.key())
                .with_child(text_element("value", reference.value()))
        })),
    )
}

pub(crate) fn decode_originator_references(
    element: Option<&Element>,
    diagnostics: &mut Vec<String>,
) -> Vec<OriginatorReference> {
    let Some(element) = element else {
        return Vec::new();
    };
    element
        .children_named("property")
        .filter_map(|property| match non_empty(property.attribute("id")) {
            Some(key) => Some(OriginatorReference::new(
                key,
                property.child_text("value").unwrap_or_default(),
            )),
            None => {
                diagnostics.push(format!(
                    "Invalid {}; missing 'id' attribute is mandatory",
                    ORIGINATOR_REFERENCE
                ));
                None
            }
        })
        .collect()
}

fn encode_feature(feature: &CallFeature) -> Element {
    let element = Element::new("feature")
        .with_optional_attribute("id", feature.id())
        .with_optional_attribute("type", feature.kind().map(|kind| kind.label()))
        .with_optional_attribute("label", feature.label());
    match feature {
        CallFeature::Boolean(flag) => match flag.enabled() {
            Some(enabled) => element.with_text(enabled.to_string()),
            None => element,
        },
        CallFeature::SpeakerChannel(speaker) => {
            let mut channel = Element::new("speakerchannel");
            if let Some(number) = speaker.channel() {
                channel.push_child(text_element("channel", number.to_string()));
            }
            if let Some(microphone) = speaker.microphone() {
                channel.push_child(text_element("microphone", microphone.to_string()));
            }
            if let Some(mute) = speaker.mute() {
                channel.push_child(text_element("mute", mute.to_string()));
            }
            element.with_child(channel)
        }
    }
}

fn decode_feature(element: &Element, diagnostics: &mut Vec<String>) -> CallFeature {
    let id = FeatureId::from(element.attribute("id"));
    let label = non_empty(element.attribute("label"));
    let kind = decode(
        element.attribute("type"),
        CALL_STATUS,
        "feature type",
        diagnostics,
        FeatureType::from_label,
    );

    let speaker = element.child("speakerchannel");
    if kind == Some(FeatureType::SpeakerChannel) || speaker.is_some() {
        let mut feature = SpeakerChannelFeature::new();
        if let Some(id) = id {
            feature = feature.with_id(id);
        }
        if let Some(label) = label {
            feature = feature.with_label(label);
        }
        if let Some(speaker) = speaker {
            if let Some(channel) = decode(
                speaker.child_text("channel"),
                CALL_STATUS,
                "speaker channel",
                diagnostics,
                parse_integer,
            ) {
                feature = feature.with_channel(channel);
            }
            if let Some(microphone) = decode(
                speaker.child_text("microphone"),
                CALL_STATUS,
                "speaker microphone",
                diagnostics,
                parse_bool,
            ) {
                feature = feature.with_microphone(microphone);
            }
            if let Some(mute) = decode(
                speaker.child_text("mute"),
                CALL_STATUS,
                "speaker mute",
                diagnostics,
                parse_bool,
            ) {
                feature = feature.with_mute(mute);
            }
        }
        return feature.into();
    }

    let mut feature = BooleanFeature::new();
    if let Some(id) = id {
        feature = feature.with_id(id);
    }
    if let Some(kind) = kind {
        feature = feature.with_kind(kind);
    }
    if let Some(label) = label {
        feature = feature.with_label(label);
    }
    if let Some(enabled) = decode(
        element.text(),
        CALL_STATUS,
        "feature value",
        diagnostics,
        parse_bool,
    ) {
        feature = feature.with_enabled(enabled);
    }
    feature.into()
}

fn encode_participant(participant: &Participant) -> Element {
    Element::new("participant")
        .with_optional_attribute("jid", participant.jid())
        .with_optional_attribute("type", participant.participant_type().map(|kind| kind.label()))
        .with_optional_attribute("direction", participant.direction().map(|d| d.label()))
        .with_optional_attribute("start", participant.start_time().as_ref().map(format_instant))
        .with_optional_attribute("duration", participant.duration().as_ref().map(format_millis))
}

fn decode_participant(element: &Element, diagnostics: &mut Vec<String>) -> Participant {
    let mut builder = Participant::builder();
    if let Some(jid) = decode(
        element.attribute("jid"),
        PARTICIPANT,
        "jid",
        diagnostics,
        Jid::parse,
    ) {
        builder.set_jid(jid);
    }
    if let Some(kind) = decode(
        element.attribute("type"),
        PARTICIPANT,
        "type",
        diagnostics,
        ParticipantType::from_label,
    ) {
        builder.set_type(kind);
    }
    if let Some(direction) = decode(
        element.attribute("direction"),
        PARTICIPANT,
        "direction",
        diagnostics,
        CallDirection::from_label,
    ) {
        builder.set_direction(direction);
    }
    if let Some(start) = decode(
        element.attribute("start"),
        PARTICIPANT,
        "start",
        diagnostics,
        parse_instant,
    ) {
        builder.set_start_time(start);
    }
    if let Some(duration) = decode(
        element.attribute("duration"),
        PARTICIPANT,
        "duration",
        diagnostics,
        parse_millis,
    ) {
        builder.set_duration(duration);
    }
    builder.build_with_diagnostics(diagnostics)
}

fn join_numbers(numbers: &[PhoneNumber]) -> Option<String> {
    if numbers.is_empty() {
        return None;
    }
    Some(
        numbers
            .iter()
            .map(PhoneNumber::value)
            .collect::<Vec<_>>()
            .join(","),
    )
}

fn split_numbers(raw: Option<&str>) -> Vec<PhoneNumber> {
    raw.unwrap_or_default()
        .split(',')
        .filter_map(|number| PhoneNumber::from(Some(number.trim())))
        .collect()
}

/// `<caller>` or `<called>`; `None` when there is nothing to say.
fn encode_party(
    name: &str,
    number: Option<&PhoneNumber>,
    destination: Option<&PhoneNumber>,
    e164: &[PhoneNumber],
    display_name: Option<&str>,
) -> Option<Element> {
    let e164 = join_numbers(e164);
    let mut party = Element::new(name);
    if number.is_some() || destination.is_some() || e164.is_some() {
        let element = Element::new("number")
            .with_optional_attribute("destination", destination)
            .with_optional_attribute("e164", e164);
        party.push_child(match number {
            Some(number) => element.with_text(number.value()),
            None => element,
        });
    }
    if let Some(display_name) = display_name {
        party.push_child(text_element("name", display_name));
    }
    (!party.children().is_empty()).then_some(party)
}

pub(crate) fn encode_call(call: &Call) -> Element {
    let mut element = Element::new("call");
    if call.id().is_some() || call.telephony_call_id().is_some() {
        let id = Element::new("id").with_optional_attribute("telephony", call.telephony_call_id());
        element.push_child(match call.id() {
            Some(id_value) => id.with_text(id_value.value()),
            None => id,
        });
    }
    if let Some(conference) = call.conference_id() {
        element.push_child(text_element("conference", conference.value()));
    }
    if let Some(site) = call.site() {
        element.push_child(encode_site(site));
    }
    if let Some(profile) = call.profile_id() {
        element.push_child(text_element("profile", profile.value()));
    }
    if let Some(interest) = call.interest_id() {
        element.push_child(text_element("interest", interest.value()));
    }
    if let Some(state) = call.state() {
        element.push_child(text_element("state", state.label()));
    }
    if let Some(direction) = call.direction() {
        element.push_child(text_element("direction", direction.label()));
    }
    if let Some(caller) = encode_party(
        "caller",
        call.caller_number(),
        None,
        call.caller_e164_numbers(),
        call.caller_name(),
    ) {
        element.push_child(caller);
    }
    if let Some(called) = encode_party(
        "called",
        call.called_number(),
        call.called_destination(),
        call.called_e164_numbers(),
        call.called_name(),
    ) {
        element.push_child(called);
    }
    if let Some(references) = encode_originator_references(call.originator_references()) {
        element.push_child(references);
    }
    if let Some(start) = call.start_time() {
        element.push_child(text_element("starttime", format_instant(&start)));
    }
    if let Some(duration) = call.duration() {
        element.push_child(text_element("duration", format_millis(&duration)));
    }
    if !call.actions().is_empty() {
        element.push_child(
            Element::new("actions").with_children(
                call.actions()
                    .iter()
                    .map(|action| Element::new(action.label())),
            ),
        );
    }
    if !call.features().is_empty() {
        element.push_child(
            Element::new("features").with_children(call.features().iter().map(encode_feature)),
        );
    }
    if !call.participants().is_empty() {
        element.push_child(
            Element::new("participants")
                .with_children(call.participants().iter().map(encode_participant)),
        );
    }
    element
}

pub(crate) fn decode_call(element: &Element, diagnostics: &mut Vec<String>) -> Call {
    let mut builder = Call::builder();

    if let Some(id) = element.child("id") {
        if let Some(call_id) = CallId::from(id.text()) {
            builder.set_id(call_id);
        }
        if let Some(telephony) = TelephonyCallId::from(id.attribute("telephony")) {
            builder.set_telephony_call_id(telephony);
        }
    }
    if let Some(conference) = ConferenceId::from(element.child_text("conference")) {
        builder.set_conference_id(conference);
    }
    if let Some(site) = element.child("site") {
        builder.set_site(decode_site(site, diagnostics));
    }
    if let Some(profile) = ProfileId::from(element.child_text("profile")) {
        builder.set_profile_id(profile);
    }
    if let Some(interest) = InterestId::from(element.child_text("interest")) {
        builder.set_interest_id(interest);
    }
    if let Some(state) = decode(
        element.child_text("state"),
        CALL_STATUS,
        "state",
        diagnostics,
        CallState::from_label,
    ) {
        builder.set_state(state);
    }
    if let Some(direction) = decode(
        element.child_text("direction"),
        CALL_STATUS,
        "direction",
        diagnostics,
        CallDirection::from_label,
    ) {
        builder.set_direction(direction);
    }

    if let Some(caller) = element.child("caller") {
        if let Some(number) = caller.child("number") {
            if let Some(value) = PhoneNumber::from(number.text()) {
                builder.set_caller_number(value);
            }
            builder.add_caller_e164_numbers(split_numbers(number.attribute("e164")));
        }
        if let Some(name) = non_empty(caller.child_text("name")) {
            builder.set_caller_name(name);
        }
    }
    if let Some(called) = element.child("called") {
        if let Some(number) = called.child("number") {
            if let Some(value) = PhoneNumber::from(number.text()) {
                builder.set_called_number(value);
            }
            if let Some(destination) = PhoneNumber::from(number.attribute("destination")) {
                builder.set_called_destination(destination);
            }
            builder.add_called_e164_numbers(split_numbers(number.attribute("e164")));
        }
        if let Some(name) = non_empty(called.child_text("name")) {
            builder.set_called_name(name);
        }
    }

    builder.add_originator_references(decode_originator_references(
        element.child("originator-ref"),
        diagnostics,
    ));
    if let Some(start) = decode(
        element.child_text("starttime"),
        CALL_STATUS,
        "starttime",
        diagnostics,
        parse_instant,
    ) {
        builder.set_start_time(start);
    }
    if let Some(duration) = decode(
        element.child_text("duration"),
        CALL_STATUS,
        "duration",
        diagnostics,
        parse_millis,
    ) {
        builder.set_duration(duration);
    }

    if let Some(actions) = element.child("actions") {
        for action in actions.children() {
            if let Some(action) = decode(
                Some(action.name()),
                CALL_STATUS,
                "action",
                diagnostics,
                RequestAction::from_label,
            ) {
                builder.add_action(action);
            }
        }
    }
    for feature in children(element, "features", "feature") {
        builder.add_feature(decode_feature(feature, diagnostics));
    }
    for participant in children(element, "participants", "participant") {
        builder.add_participant(decode_participant(participant, diagnostics));
    }

    builder.build_with_diagnostics(diagnostics)
}

pub(crate) fn encode_call_status(status: &CallStatus) -> Element {
    Element::new("callstatus")
        .with_attribute("xmlns", CALL_STATUS_NS)
        .with_optional_attribute("busy", status.is_busy())
        .with_children(status.calls().iter().map(encode_call))
}

pub(crate) fn decode_call_status(element: &Element, diagnostics: &mut Vec<String>) -> CallStatus {
    let mut builder = CallStatus::builder();
    if let Some(busy) = decode(
        element.attribute("busy"),
        CALL_STATUS,
        "busy",
        diagnostics,
        parse_bool,
    ) {
        builder.set_busy(busy);
    }
    for call in element.children_named("call") {
        builder.add_call(decode_call(call, diagnostics));
    }
    builder.build_with_diagnostics(diagnostics)
}

/// Children named `item` inside the first `wrapper` child, if any.
fn children<'a>(
    element: &'a Element,
    wrapper: &'a str,
    item: &'a str,
) -> impl Iterator<Item = &'a Element> + 'a {
    element
        .child(wrapper)
        .into_iter()
        .flat_map(move |wrapper| wrapper.children_named(item))
}
