//! Mapping between stanza values and [`Element`] trees.
//!
//! Rendering is total: whatever a value holds is written, whatever it lacks is
//! left out. Reading is tolerant: a malformed leaf value becomes one
//! diagnostic and is treated as absent, and the stanza builder is finalized in
//! diagnostic mode. Only trees that are not a known OpenLink command, and
//! duplicate ids, are errors.
//!
//! Diagnostics come out in a fixed order: envelope, then problems found while
//! reading the payload, then the stanza's own mandatory fields, then checks on
//! the payload's overall shape.

mod entities;
mod stanzas;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use openlink_core::{Build, IqType, Jid};
use tracing::warn;

use crate::config::XmlConfig;
use crate::element::{EMPTY, Element};
use crate::error::{ProtocolError, ProtocolResult};
use crate::stanza::{Command, Envelope, EnvelopeBuilder, StanzaBuilder};
use crate::xml::{parse_xml, to_xml};
use crate::{COMMANDS_NS, IO_DATA_NS};

/// Conversion of one stanza kind to and from its tree form.
pub trait StanzaCodec: Sized {
    /// Renders the stanza, including any partial content it carries.
    fn to_element(&self) -> Element;

    /// Reads a stanza, appending one message per problem to `diagnostics`.
    ///
    /// # Errors
    ///
    /// Fails when the tree is not this kind of stanza, or when the payload
    /// repeats an id that must be unique.
    fn from_element(element: &Element, diagnostics: &mut Vec<String>) -> ProtocolResult<Self>;

    fn to_xml(&self, config: &XmlConfig) -> ProtocolResult<String> {
        to_xml(&self.to_element(), config)
    }

    fn from_xml(
        text: &str,
        config: &XmlConfig,
        diagnostics: &mut Vec<String>,
    ) -> ProtocolResult<Self> {
        Self::from_element(&parse_xml(text, config)?, diagnostics)
    }
}

const STANZA: &str = "stanza";

/// Reads an optional leaf value.
///
/// Absent or empty input is simply absent. Input `parse` rejects is reported
/// as `Invalid <description>; invalid <name> '<raw>'` and treated as absent.
pub(crate) fn decode<T>(
    raw: Option<&str>,
    description: &str,
    name: &str,
    diagnostics: &mut Vec<String>,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let raw = raw.filter(|raw| !raw.is_empty())?;
    let value = parse(raw);
    if value.is_none() {
        diagnostics.push(format!(
            "Invalid {}; invalid {} '{}'",
            description, name, raw
        ));
    }
    value
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_integer(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

pub(crate) fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

pub(crate) fn parse_millis(raw: &str) -> Option<Duration> {
    raw.parse().ok().map(Duration::milliseconds)
}

/// RFC 3339, UTC, millisecond precision: `2017-10-09T08:07:00.000Z`.
pub(crate) fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn format_millis(duration: &Duration) -> String {
    duration.num_milliseconds().to_string()
}

pub(crate) fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|raw| !raw.is_empty())
}

pub(crate) fn text_element(name: &str, text: impl Into<String>) -> Element {
    Element::new(name).with_text(text)
}

fn encode_iq(envelope: &Envelope, command: Element) -> Element {
    Element::new("iq")
        .with_optional_attribute("type", envelope.kind().map(|kind| kind.label()))
        .with_optional_attribute("id", envelope.id())
        .with_optional_attribute("to", envelope.to())
        .with_optional_attribute("from", envelope.from())
        .with_child(command)
}

pub(crate) fn encode_request(envelope: &Envelope, command: Command, input: Vec<Element>) -> Element {
    let iodata = Element::new("iodata")
        .with_attribute("xmlns", IO_DATA_NS)
        .with_attribute("type", "input")
        .with_child(Element::new("in").with_children(input));
    let command = Element::new("command")
        .with_attribute("xmlns", COMMANDS_NS)
        .with_attribute("action", "execute")
        .with_attribute("node", command.node())
        .with_child(iodata);
    encode_iq(envelope, command)
}

pub(crate) fn encode_result(envelope: &Envelope, command: Command, output: Vec<Element>) -> Element {
    let iodata = Element::new("iodata")
        .with_attribute("xmlns", IO_DATA_NS)
        .with_attribute("type", "output")
        .with_child(Element::new("out").with_children(output));
    let command = Element::new("command")
        .with_attribute("xmlns", COMMANDS_NS)
        .with_attribute("node", command.node())
        .with_attribute("status", openlink_core::CommandStatus::Completed.label())
        .with_child(iodata);
    encode_iq(envelope, command)
}

/// Returns the command element of an `iq`, whatever its node.
pub(crate) fn command_element(iq: &Element) -> ProtocolResult<&Element> {
    if iq.name() != "iq" {
        return Err(ProtocolError::UnexpectedElement {
            expected: "iq",
            found: iq.name().to_string(),
        });
    }
    iq.child("command")
        .ok_or_else(|| ProtocolError::UnexpectedElement {
            expected: "command",
            found: iq
                .children()
                .first()
                .map(|child| child.name().to_string())
                .unwrap_or_default(),
        })
}

/// Returns the `in` or `out` section of a command, checking it is `command`.
///
/// A missing section reads as an empty one.
pub(crate) fn io_section<'a>(
    iq: &'a Element,
    command: Command,
    section: &str,
) -> ProtocolResult<&'a Element> {
    let element = command_element(iq)?;
    let node = element.attribute("node").unwrap_or_default();
    if Command::from_node(node) != Some(command) {
        return Err(ProtocolError::UnexpectedCommand {
            expected: command.name(),
            found: node.to_string(),
        });
    }
    Ok(element.descend(&["iodata", section]).unwrap_or(&EMPTY))
}

/// Reads envelope attributes. Addresses that do not parse are reported and
/// left unset, as is anything missing, for the envelope checks to flag.
fn decode_envelope(iq: &Element, diagnostics: &mut Vec<String>) -> EnvelopeBuilder {
    EnvelopeBuilder {
        to: decode(iq.attribute("to"), STANZA, "to", diagnostics, Jid::parse),
        from: decode(iq.attribute("from"), STANZA, "from", diagnostics, Jid::parse),
        id: non_empty(iq.attribute("id")).map(str::to_string),
        kind: iq.attribute("type").and_then(IqType::from_label),
    }
}

/// Finalizes a builder read from the wire in diagnostic mode.
///
/// The envelope is read from `iq` first. `read` holds problems found while
/// reading the payload; `shape` holds checks on the payload structure that
/// run after the builder's own.
pub(crate) fn finalize<B>(
    builder: &mut B,
    iq: &Element,
    read: Vec<String>,
    shape: Vec<String>,
    diagnostics: &mut Vec<String>,
) -> B::Output
where
    B: StanzaBuilder + Build,
{
    let first = diagnostics.len();
    *builder.envelope_mut() = decode_envelope(iq, diagnostics);
    let Ok(()) = builder.envelope().validate(B::EXPECTED_TYPE, diagnostics);
    diagnostics.extend(read);
    let Ok(()) = builder.validate_payload(diagnostics);
    diagnostics.extend(shape);

    for diagnostic in &diagnostics[first..] {
        warn!(%diagnostic, "invalid stanza content");
    }
    builder.assemble()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    mod leaves {
        use super::*;

        #[test]
        fn absent_and_empty_are_silent() {
            let mut diagnostics = Vec::new();
            assert_eq!(decode(None, "site", "id", &mut diagnostics, parse_integer), None);
            assert_eq!(decode(Some(""), "site", "id", &mut diagnostics, parse_integer), None);
            assert!(diagnostics.is_empty());
        }

        #[test]
        fn malformed_values_are_reported_once() {
            let mut diagnostics = Vec::new();
            let value = decode(Some("maybe"), "profile", "online", &mut diagnostics, parse_bool);
            assert_eq!(value, None);
            assert_eq!(diagnostics, vec!["Invalid profile; invalid online 'maybe'"]);
        }

        #[test]
        fn booleans_are_lowercase_words() {
            assert_eq!(parse_bool("true"), Some(true));
            assert_eq!(parse_bool("false"), Some(false));
            assert_eq!(parse_bool("TRUE"), None);
            assert_eq!(parse_bool("1"), None);
        }

        #[test]
        fn instants_use_millisecond_utc() {
            let instant = Utc.with_ymd_and_hms(2017, 10, 9, 8, 7, 0).unwrap();
            assert_eq!(format_instant(&instant), "2017-10-09T08:07:00.000Z");
            assert_eq!(parse_instant("2017-10-09T09:07:00.000+01:00"), Some(instant));
            assert_eq!(parse_instant("yesterday"), None);
        }

        #[test]
        fn durations_are_whole_milliseconds() {
            let duration = Duration::milliseconds(60_500);
            assert_eq!(format_millis(&duration), "60500");
            assert_eq!(parse_millis("60500"), Some(duration));
            assert_eq!(parse_millis("1.5"), None);
        }
    }

    mod framing {
        use super::*;

        #[test]
        fn rejects_non_iq_roots() {
            let error = command_element(&Element::new("message")).unwrap_err();
            assert_eq!(
                error.to_string(),
                "unexpected element 'message', expected 'iq'"
            );
        }

        #[test]
        fn rejects_iq_without_command() {
            let iq = Element::new("iq").with_child(Element::new("query"));
            let error = command_element(&iq).unwrap_err();
            assert_eq!(
                error.to_string(),
                "unexpected element 'query', expected 'command'"
            );
        }

        #[test]
        fn rejects_other_commands() {
            let iq = Element::new("iq").with_child(
                Element::new("command").with_attribute("node", Command::GetProfiles.node()),
            );
            let error = io_section(&iq, Command::MakeCall, "in").unwrap_err();
            assert!(matches!(
                error,
                ProtocolError::UnexpectedCommand { expected: "make-call", .. }
            ));
        }

        #[test]
        fn missing_section_reads_as_empty() {
            let iq = Element::new("iq").with_child(
                Element::new("command").with_attribute("node", Command::MakeCall.node()),
            );
            let input = io_section(&iq, Command::MakeCall, "in").unwrap();
            assert!(input.children().is_empty());
        }

        #[test]
        fn envelope_reports_unparsable_addresses() {
            let iq = Element::new("iq")
                .with_attribute("type", "sideways")
                .with_attribute("to", "not a jid")
                .with_attribute("from", "user@example.com")
                .with_attribute("id", "");
            let mut diagnostics = Vec::new();
            let envelope = decode_envelope(&iq, &mut diagnostics);
            assert_eq!(diagnostics, vec!["Invalid stanza; invalid to 'not a jid'"]);
            assert_eq!(envelope.kind(), None);
            assert_eq!(envelope.to(), None);
            assert_eq!(envelope.from().map(ToString::to_string).as_deref(), Some("user@example.com"));
            assert_eq!(envelope.id(), None);
        }
    }
}
