// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

/// Dashboard user roles.
///
/// Roles decide whether a user is restricted to their assigned venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular operator, restricted to assigned venues.
    #[default]
    User,
    /// Marketing staff. Sees every venue.
    Marketing,
    /// Administrator. Sees every venue and every organization.
    Admin,
    /// Master account. Sees every venue.
    Master,
}

impl Role {
    /// Converts this role to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Marketing => "marketing",
            Self::Admin => "admin",
            Self::Master => "master",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "marketing" => Ok(Self::Marketing),
            "admin" => Ok(Self::Admin),
            "master" => Ok(Self::Master),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-request access context of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAccessContext {
    /// Whether the user carries the admin flag.
    pub is_admin: bool,
    /// The user's role.
    pub role: Role,
    /// Venues the user is allowed to see.
    pub assigned_venues: Vec<String>,
    /// The organization the user belongs to.
    pub organization_id: Option<String>,
}

impl UserAccessContext {
    /// Creates a new access context.
    #[must_use]
    pub const fn new(
        is_admin: bool,
        role: Role,
        assigned_venues: Vec<String>,
        organization_id: Option<String>,
    ) -> Self {
        Self {
            is_admin,
            role,
            assigned_venues,
            organization_id,
        }
    }

    /// Returns whether the user bypasses per-venue restrictions.
    ///
    /// Admins, marketing and master users have full city access.
    #[must_use]
    pub const fn has_full_city_access(&self) -> bool {
        self.is_admin || matches!(self.role, Role::Marketing | Role::Master)
    }
}

/// Organization scope sent to the backend.
///
/// `All` is serialized as `null`, which the backend honours as
/// "no organization restriction" for admins only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OrganizationScope {
    /// No organization restriction.
    #[default]
    All,
    /// Restricted to a single organization.
    Organization(String),
}

impl OrganizationScope {
    /// Derives the scope from an optional user context.
    #[must_use]
    pub fn for_user(user: Option<&UserAccessContext>) -> Self {
        let Some(user) = user else {
            return Self::All;
        };
        if user.is_admin {
            return Self::All;
        }
        match user.organization_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Self::Organization(id.to_string()),
            _ => {
                tracing::warn!(
                    role = user.role.as_str(),
                    "non-admin user has no organization; sending unscoped filter"
                );
                Self::All
            }
        }
    }

    /// Returns the organization id, if scoped.
    #[must_use]
    pub fn organization_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Organization(id) => Some(id),
        }
    }
}

impl Serialize for OrganizationScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_none(),
            Self::Organization(id) => serializer.serialize_some(id),
        }
    }
}

impl<'de> Deserialize<'de> for OrganizationScope {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id: Option<String> = Option::deserialize(deserializer)?;
        Ok(id.map_or(Self::All, Self::Organization))
    }
}

/// Wire tag for the active filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FilterModeKind {
    /// Year plus ISO week.
    #[default]
    #[serde(rename = "ano_semana")]
    YearWeek,
    /// Absolute date range.
    #[serde(rename = "intervalo")]
    DateRange,
}

impl FilterModeKind {
    /// Converts this mode to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::YearWeek => "ano_semana",
            Self::DateRange => "intervalo",
        }
    }
}

impl FromStr for FilterModeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ano_semana" | "year_week" => Ok(Self::YearWeek),
            "intervalo" | "date_range" => Ok(Self::DateRange),
            other => Err(format!("unknown filter mode '{other}'")),
        }
    }
}

/// The period part of a filter selection.
///
/// Only one of the two period shapes can be authoritative at a time, so the
/// inactive pair cannot be left stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "filterMode")]
pub enum FilterMode {
    /// Year plus ISO week selection.
    #[serde(rename = "ano_semana", rename_all = "camelCase")]
    YearWeek {
        /// Selected year.
        #[serde(default)]
        year: Option<i32>,
        /// Legacy single-week selection.
        #[serde(default)]
        week: Option<u32>,
        /// Multi-week selection, as raw labels.
        #[serde(default)]
        weeks: Vec<String>,
    },
    /// Absolute date range selection, as raw date strings.
    #[serde(rename = "intervalo", rename_all = "camelCase")]
    DateRange {
        /// Inclusive start date.
        #[serde(default)]
        date_start: Option<String>,
        /// Inclusive end date.
        #[serde(default)]
        date_end: Option<String>,
    },
}

impl Default for FilterMode {
    fn default() -> Self {
        Self::YearWeek {
            year: None,
            week: None,
            weeks: Vec::new(),
        }
    }
}

impl FilterMode {
    /// Returns the wire tag of this mode.
    #[must_use]
    pub const fn kind(&self) -> FilterModeKind {
        match self {
            Self::YearWeek { .. } => FilterModeKind::YearWeek,
            Self::DateRange { .. } => FilterModeKind::DateRange,
        }
    }
}

/// User-facing filter selection as held by the dashboard.
///
/// A missing `filterMode` tag reads as `ano_semana`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawFilterState")]
pub struct FilterState {
    /// The active period selection.
    #[serde(flatten)]
    pub mode: FilterMode,
    /// Selected venue (praça).
    pub venue: Option<String>,
    /// Legacy single sub-venue selection.
    pub sub_venue: Option<String>,
    /// Multi-select sub-venues.
    pub sub_venues: Vec<String>,
    /// Legacy single origin selection.
    pub origin: Option<String>,
    /// Multi-select origins.
    pub origins: Vec<String>,
    /// Legacy single shift selection.
    pub shift: Option<String>,
    /// Multi-select shifts.
    pub shifts: Vec<String>,
}

/// Untagged-tolerant input shape of [`FilterState`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawFilterState {
    filter_mode: Option<FilterModeKind>,
    year: Option<i32>,
    week: Option<u32>,
    weeks: Vec<String>,
    date_start: Option<String>,
    date_end: Option<String>,
    venue: Option<String>,
    sub_venue: Option<String>,
    sub_venues: Vec<String>,
    origin: Option<String>,
    origins: Vec<String>,
    shift: Option<String>,
    shifts: Vec<String>,
}

impl From<RawFilterState> for FilterState {
    fn from(raw: RawFilterState) -> Self {
        let mode: FilterMode = match raw.filter_mode.unwrap_or_default() {
            FilterModeKind::YearWeek => FilterMode::YearWeek {
                year: raw.year,
                week: raw.week,
                weeks: raw.weeks,
            },
            FilterModeKind::DateRange => FilterMode::DateRange {
                date_start: raw.date_start,
                date_end: raw.date_end,
            },
        };
        Self {
            mode,
            venue: raw.venue,
            sub_venue: raw.sub_venue,
            sub_venues: raw.sub_venues,
            origin: raw.origin,
            origins: raw.origins,
            shift: raw.shift,
            shifts: raw.shifts,
        }
    }
}

impl FilterState {
    /// Creates a year/week selection with no facets.
    #[must_use]
    pub const fn year_week(year: Option<i32>, week: Option<u32>) -> Self {
        Self {
            mode: FilterMode::YearWeek {
                year,
                week,
                weeks: Vec::new(),
            },
            venue: None,
            sub_venue: None,
            sub_venues: Vec::new(),
            origin: None,
            origins: Vec::new(),
            shift: None,
            shifts: Vec::new(),
        }
    }

    /// Creates a date range selection with no facets.
    #[must_use]
    pub fn date_range(date_start: Option<&str>, date_end: Option<&str>) -> Self {
        Self {
            mode: FilterMode::DateRange {
                date_start: date_start.map(str::to_string),
                date_end: date_end.map(str::to_string),
            },
            ..Self::default()
        }
    }

    /// Sets the venue selection.
    #[must_use]
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }
}
