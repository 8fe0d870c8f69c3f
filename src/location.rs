//! Map coordinates and "use my current location" lookups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ReporterError;
use crate::i18n::Localized;

/// Centre used by the report map before a location is picked.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 40.7128,
    lng: -74.006,
};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, ReporterError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(ReporterError::InvalidCoordinates(format!("{lat},{lng}")));
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

impl FromStr for Coordinates {
    type Err = ReporterError;

    /// Parses `lat,lng`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReporterError::InvalidCoordinates(s.to_string());

        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

        Coordinates::new(lat, lng)
    }
}

/// Why the current position could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
}

impl LocationError {
    /// Map a geolocation failure code (1, 2 or 3).
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Self::PermissionDenied => 1,
            Self::PositionUnavailable => 2,
            Self::Timeout => 3,
        }
    }

    pub fn message(self) -> Localized {
        match self {
            Self::PermissionDenied => Localized::new(
                "Location access was denied. Enable location sharing in your settings",
                "تم رفض الوصول إلى الموقع. يرجى تمكين مشاركة الموقع في الإعدادات",
            ),
            Self::PositionUnavailable => Localized::new(
                "Unable to get your current location",
                "غير قادر على الحصول على الموقع الحالي",
            ),
            Self::Timeout => Localized::new(
                "Timed out while determining your location",
                "انتهت مهلة تحديد الموقع",
            ),
        }
    }
}

/// Resolve the device position from configuration. A `current_location`
/// holding a bare failure code (1, 2 or 3) reports that failure.
pub fn current_position(config: &Config) -> Result<Coordinates, LocationError> {
    if !config.allow_location {
        return Err(LocationError::PermissionDenied);
    }

    let raw = config
        .current_location
        .as_deref()
        .ok_or(LocationError::PositionUnavailable)?;

    if let Some(reason) = raw.trim().parse().ok().and_then(LocationError::from_code) {
        return Err(reason);
    }

    raw.parse().map_err(|err| {
        tracing::warn!(%err, "configured current_location is not usable");
        LocationError::PositionUnavailable
    })
}
