//! Per-instance game configuration.

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessErrors;
use crate::game::sync::InstanceId;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;

/// Which pieces local input may move, and whose undos retire history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalSide {
    /// Hot-seat play: both colors are local.
    #[default]
    Both,
    Only(Color),
}

impl LocalSide {
    #[inline]
    pub fn controls(self, color: Color) -> bool {
        match self {
            LocalSide::Both => true,
            LocalSide::Only(side) => side == color,
        }
    }

    /// `"white"`/`"light"`, `"black"`/`"dark"` or anything else for both.
    pub fn from_color_param(param: Option<&str>) -> Self {
        match param.map(str::to_ascii_lowercase).as_deref() {
            Some("white" | "light" | "w") => LocalSide::Only(Color::Light),
            Some("black" | "dark" | "b") => LocalSide::Only(Color::Dark),
            _ => LocalSide::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub local_side: LocalSide,
    pub starting_fen: String,
    /// Fixed id for this instance; a random one is drawn when absent.
    pub instance_id: Option<InstanceId>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            local_side: LocalSide::Both,
            starting_fen: STARTING_POSITION_FEN.to_owned(),
            instance_id: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, ChessErrors> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_local_side(mut self, local_side: LocalSide) -> Self {
        self.local_side = local_side;
        self
    }

    pub fn with_starting_fen(mut self, fen: impl Into<String>) -> Self {
        self.starting_fen = fen.into();
        self
    }
}
