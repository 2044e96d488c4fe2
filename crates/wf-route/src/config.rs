//! Wayfinder configuration file.
//!
//! ```json
//! {
//!   "cost":  { "floor_penalty": 8000.0, "escalator_penalty": 50000.0 },
//!   "kiosk": { "id": "K-ML-01", "name": "Atrium Kiosk", "floor": "ML", "x": 1650.0, "y": 820.0 },
//!   "default_mode": "shortest"
//! }
//! ```
//!
//! Every section is optional; missing fields take their compile-time
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bridge::Kiosk;
use crate::cost::CostModel;
use crate::mode::RouteMode;
use crate::{RouteError, RouteResult};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WayfinderConfig {
    pub cost:         CostModel,
    /// The kiosk this process runs on, if any.
    pub kiosk:        Option<Kiosk>,
    /// Mode preselected in the kiosk UI.
    pub default_mode: RouteMode,
}

impl WayfinderConfig {
    pub fn from_json_str(json: &str) -> RouteResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RouteError::Config(format!("invalid wayfinder config: {e}")))?;
        config.cost.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> RouteResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
