//! Decoding of position feed frames.

use serde_json::Value;
use tracing::debug;

use crate::domain::VehiclePosition;

use super::error::MessageError;

/// Decode a `{ "positions": [...] }` text frame.
///
/// The frame as a whole must be a JSON object with a `positions` array.
/// Entries inside the array that do not describe a vehicle are skipped so
/// that one bad record does not blank the map.
pub fn parse_positions(text: &str) -> Result<Vec<VehiclePosition>, MessageError> {
    let mut message: Value = serde_json::from_str(text)?;

    let Some(Value::Array(entries)) = message.get_mut("positions").map(Value::take) else {
        return Err(MessageError::MissingPositions);
    };

    let total = entries.len();
    let positions: Vec<VehiclePosition> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(position) => Some(position),
            Err(e) => {
                debug!("skipping malformed vehicle position: {e}");
                None
            }
        })
        .collect();

    if positions.len() < total {
        debug!(
            kept = positions.len(),
            skipped = total - positions.len(),
            "dropped malformed vehicle positions"
        );
    }

    Ok(positions)
}
