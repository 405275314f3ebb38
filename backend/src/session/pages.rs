//! Dashboard pages and the role table that gates them.

use crate::database::models::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Weather,
    Reports,
    Alerts,
    Recommendations,
    Agriculture,
    SolarMonitoring,
    Profile,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Home,
        Page::Weather,
        Page::Reports,
        Page::Alerts,
        Page::Recommendations,
        Page::Agriculture,
        Page::SolarMonitoring,
        Page::Profile,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Weather => "weather",
            Page::Reports => "reports",
            Page::Alerts => "alerts",
            Page::Recommendations => "recommendations",
            Page::Agriculture => "agriculture",
            Page::SolarMonitoring => "solar_monitoring",
            Page::Profile => "profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Weather => "Weather Reports",
            Page::Reports => "Reports & Analytics",
            Page::Alerts => "Alerts & Notifications",
            Page::Recommendations => "Smart Recommendations",
            Page::Agriculture => "Agriculture",
            Page::SolarMonitoring => "Solar Monitoring",
            Page::Profile => "Profile",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.key() == value)
            .ok_or_else(|| format!("Unknown page: {}", value))
    }
}

use Page::*;

/// Pages each known role may open, before the trailing profile page.
static ROLE_PAGES: [(Role, &[Page]); 5] = [
    (
        Role::Admin,
        &[Home, Weather, Reports, Alerts, Recommendations, Agriculture, SolarMonitoring],
    ),
    (
        Role::GovernmentOfficer,
        &[Home, Weather, Reports, Alerts, Recommendations, Agriculture, SolarMonitoring],
    ),
    (
        Role::FieldOfficer,
        &[Home, Weather, Alerts, Recommendations, Agriculture, SolarMonitoring],
    ),
    (
        Role::Farmer,
        &[Home, Weather, Recommendations, Agriculture, SolarMonitoring],
    ),
    (
        Role::Researcher,
        &[Home, Weather, Reports, Recommendations, Agriculture, SolarMonitoring],
    ),
];

/// Pages for a missing or unrecognised role.
static DEFAULT_PAGES: &[Page] = &[Home, Weather, SolarMonitoring];

/// Ordered navigation for a role; `profile` is always last.
pub fn available_pages(role: Option<Role>) -> Vec<Page> {
    let pages = ROLE_PAGES
        .iter()
        .find(|(known, _)| Some(*known) == role)
        .map(|(_, pages)| *pages)
        .unwrap_or(DEFAULT_PAGES);

    pages.iter().copied().chain([Profile]).collect()
}
