use crate::error::WireError;
use crate::model::{CellIndex, Symbol};
use serde::{Deserialize, Serialize};

/// The only payload ever sent over the data channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveMessage {
    pub cell_index: CellIndex,
    pub symbol: Symbol,
}

impl MoveMessage {
    pub fn new(cell_index: CellIndex, symbol: Symbol) -> Self {
        Self { cell_index, symbol }
    }

    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(WireError::Encode)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, WireError> {
        Ok(serde_json::from_slice(data)?)
    }
}
