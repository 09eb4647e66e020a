//! OSC (`ESC ] ... BEL|ST`) dispatch.
//!
//! Grounded in `core/osc/osc_event.rs`'s `OscEvent` enum shape (this module defines the
//! equivalent for the OSC codes this engine's spec actually requires: title, palette set/reset;
//! the teacher's hyperlink/progress variants are not part of this spec and are not carried over).

/// A semantic event produced by parsing an OSC payload, handed to the host via
/// [`crate::engine::Renderer`] callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum OscEvent {
    SetTitle(String),
    SetIconName(String),
    SetTitleAndIcon(String),
    SetPalette { index: u8, spec: String },
    ResetPalette(Option<u8>),
}

/// Parse one OSC payload (the bytes between `ESC ]` and the terminator, terminator excluded).
/// Unrecognized leading codes (`k`, `P`, `^`, `_`) are consumed without effect, matching §4.E.
#[must_use]
pub fn parse_osc(payload: &[&[u8]]) -> Option<OscEvent> {
    let code = payload.first()?;
    let code_str = std::str::from_utf8(code).ok()?;
    match code_str {
        "0" => payload.get(1).map(|t| OscEvent::SetTitleAndIcon(lossy(t))),
        "1" => payload.get(1).map(|t| OscEvent::SetIconName(lossy(t))),
        "2" => payload.get(1).map(|t| OscEvent::SetTitle(lossy(t))),
        "4" => {
            let index: u8 = std::str::from_utf8(payload.get(1)?).ok()?.parse().ok()?;
            let spec = lossy(payload.get(2)?);
            Some(OscEvent::SetPalette { index, spec })
        }
        "104" => match payload.get(1) {
            Some(n) => std::str::from_utf8(n).ok()?.parse().ok().map(|i| OscEvent::ResetPalette(Some(i))),
            None => Some(OscEvent::ResetPalette(None)),
        },
        _ => {
            tracing::debug!(code = code_str, "OSC code consumed without effect");
            None
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_title() {
        let payload: Vec<&[u8]> = vec![b"2", b"my title"];
        assert_eq!(parse_osc(&payload), Some(OscEvent::SetTitle("my title".to_string())));
    }

    #[test]
    fn unknown_code_consumed() {
        let payload: Vec<&[u8]> = vec![b"999"];
        assert_eq!(parse_osc(&payload), None);
    }
}
