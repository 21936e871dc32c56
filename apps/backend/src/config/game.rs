//! Game tunables resolved from a key-value settings source.

use std::collections::HashMap;
use std::env;

use time::Duration;
use tracing::warn;

pub const AUTO_PLACED_AFTER_MINUTES: &str = "autoPlacedAfterMinutes";
pub const RECENT_POST_DAYS: &str = "recentPostDays";
pub const ACTIVE_USER_DAYS: &str = "activeUserDays";
pub const DISCUSSION_WEIGHT: &str = "discussionWeight";
pub const POST_WEIGHT: &str = "postWeight";
pub const USER_WEIGHT: &str = "userWeight";

/// Upper bound for `autoPlacedAfterMinutes` (one year).
pub const MAX_AUTO_PLACED_AFTER_MINUTES: i64 = 365 * 24 * 60;
/// Upper bound for `recentPostDays` and `activeUserDays` (ten years).
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Key-value settings store.
pub trait Settings: Send + Sync {
    fn get_int(&self, key: &str, default: i64) -> i64;
}

/// Reads `CATCHFISH_<KEY>` environment variables, with the camelCase key
/// converted to SCREAMING_SNAKE (`autoPlacedAfterMinutes` ->
/// `CATCHFISH_AUTO_PLACED_AFTER_MINUTES`). Unparsable values fall back to the default.
#[derive(Debug, Default, Clone)]
pub struct EnvSettings;

impl EnvSettings {
    pub fn var_name(key: &str) -> String {
        let mut out = String::from("CATCHFISH_");
        for (i, c) in key.chars().enumerate() {
            if c.is_ascii_uppercase() && i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_uppercase());
        }
        out
    }
}

impl Settings for EnvSettings {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        let name = Self::var_name(key);
        match env::var(&name) {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(var = %name, value = %raw, "ignoring non-integer setting");
                default
            }),
            Err(_) => default,
        }
    }
}

/// In-memory settings, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MapSettings(HashMap<String, i64>);

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: i64) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }
}

impl Settings for MapSettings {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.0.get(key).copied().unwrap_or(default)
    }
}

/// Resolved game configuration, passed to services at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub auto_placed_after: Duration,
    pub recent_post_days: i64,
    pub active_user_days: i64,
    pub discussion_weight: u32,
    pub post_weight: u32,
    pub user_weight: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::load(&MapSettings::new())
    }
}

impl GameSettings {
    pub fn load(settings: &dyn Settings) -> Self {
        let weight = |key: &str| bounded(settings, key, 1, u32::MAX as i64) as u32;
        Self {
            auto_placed_after: Duration::minutes(bounded(
                settings,
                AUTO_PLACED_AFTER_MINUTES,
                5,
                MAX_AUTO_PLACED_AFTER_MINUTES,
            )),
            recent_post_days: bounded(settings, RECENT_POST_DAYS, 30, MAX_WINDOW_DAYS),
            active_user_days: bounded(settings, ACTIVE_USER_DAYS, 30, MAX_WINDOW_DAYS),
            discussion_weight: weight(DISCUSSION_WEIGHT),
            post_weight: weight(POST_WEIGHT),
            user_weight: weight(USER_WEIGHT),
        }
    }
}

/// Reads `key` and clamps it into `0..=max`, warning when the stored value is out of range.
fn bounded(settings: &dyn Settings, key: &str, default: i64, max: i64) -> i64 {
    let raw = settings.get_int(key, default);
    let value = raw.clamp(0, max);
    if value != raw {
        warn!(key, value = raw, clamped = value, "setting out of range");
    }
    value
}
