//! Route modes and their edge-eligibility policy.
//!
//! Eligibility is a hard include/exclude decided per neighbour expansion,
//! before any cost is computed.  The rules, in order:
//!
//! 1. A blocked connection is never eligible.
//! 2. A restricted connection is eligible only when the caller passes the
//!    restricted-access override.  No mode grants it implicitly; emergency
//!    tooling sets the flag itself.
//! 3. [`RouteMode::Accessible`] and [`RouteMode::Stroller`] never use a
//!    connection that is not step-free.
//! 4. No further constraint for [`RouteMode::Shortest`] and
//!    [`RouteMode::Emergency`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use wf_graph::Connection;

use crate::RouteError;

/// Routing policy selected by the rider (or by the emergency controller).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// Minimum cost, any connection.
    #[default]
    Shortest,
    /// Wheelchair: step-free connections only, escalators penalised.
    Accessible,
    /// Same constraints as `Accessible`.
    Stroller,
    /// Evacuation.  Same eligibility as `Shortest`; the evacuation
    /// controller passes the restricted-access override.
    Emergency,
}

impl RouteMode {
    pub const ALL: [RouteMode; 4] = [
        RouteMode::Shortest,
        RouteMode::Accessible,
        RouteMode::Stroller,
        RouteMode::Emergency,
    ];

    /// `true` if connections with `accessible == false` are excluded outright.
    #[inline]
    pub fn requires_step_free(self) -> bool {
        matches!(self, RouteMode::Accessible | RouteMode::Stroller)
    }

    /// `true` if escalator waypoints carry the escalator surcharge.
    #[inline]
    pub fn avoids_escalators(self) -> bool {
        matches!(self, RouteMode::Accessible | RouteMode::Stroller)
    }

    /// Whether `conn` may be traversed under this mode.
    pub fn is_eligible(self, conn: &Connection, allow_restricted: bool) -> bool {
        if conn.blocked {
            return false;
        }
        if conn.restricted && !allow_restricted {
            return false;
        }
        if self.requires_step_free() && !conn.accessible {
            return false;
        }
        true
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteMode::Shortest   => "shortest",
            RouteMode::Accessible => "accessible",
            RouteMode::Stroller   => "stroller",
            RouteMode::Emergency  => "emergency",
        }
    }
}

impl FromStr for RouteMode {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RouteMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RouteError::Config(format!("unknown route mode {s:?}")))
    }
}

impl std::fmt::Display for RouteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RouteOptions ──────────────────────────────────────────────────────────────

/// Per-query routing options.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct RouteOptions {
    pub mode: RouteMode,
    /// Staff override for restricted connections.  Never set by the public
    /// kiosk UI.
    #[serde(default)]
    pub allow_restricted: bool,
}

impl RouteOptions {
    pub fn new(mode: RouteMode) -> Self {
        Self { mode, allow_restricted: false }
    }

    pub fn with_restricted_access(mut self) -> Self {
        self.allow_restricted = true;
        self
    }

    /// Shorthand for `self.mode.is_eligible(conn, self.allow_restricted)`.
    #[inline]
    pub fn is_eligible(&self, conn: &Connection) -> bool {
        self.mode.is_eligible(conn, self.allow_restricted)
    }
}

impl From<RouteMode> for RouteOptions {
    fn from(mode: RouteMode) -> Self {
        Self::new(mode)
    }
}
