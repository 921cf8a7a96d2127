//! Output helpers shared by the command handlers.

use serde::Serialize;

use crate::error::AlfredError;

/// Serialize `value` as pretty-printed JSON.
///
/// # Errors
///
/// Returns `AlfredError::Parse` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, AlfredError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FocusState;

    #[test]
    fn test_to_json() {
        #[derive(Serialize)]
        struct Sample {
            focus: FocusState,
            remaining_seconds: u32,
        }

        let json = to_json(&Sample {
            focus: FocusState::On,
            remaining_seconds: 90,
        })
        .unwrap();
        assert!(json.contains("\"focus\": \"on\""));
        assert!(json.contains("\"remaining_seconds\": 90"));
    }
}
