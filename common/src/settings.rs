//! User settings and change notification.
//!
//! [`SettingsStore`] is a keyed in-memory store. Every `set` is broadcast to
//! all live subscribers over a `flume` channel. A subscriber unregisters by
//! dropping its receiver; the store prunes dead senders on the next broadcast.
//!
//! [`ClockConfig`] is the typed view the engine reads once per frame. It is
//! built from the store at construction and afterwards only changed through
//! [`ClockConfig::apply`], one notification at a time.
//!
//! # Keys
//!
//! | Key | Type | Values |
//! |-----|------|--------|
//! | `enable_clock` | bool | overlay on/off |
//! | `clock_format` | text | `"24"`, `"12"` |
//! | `clock_hash` | bool | `#` prefix on/off |
//! | `clock_divider` | text | `"colon"`, `"space"`, `"none"` |
//! | `clock_size` | text | `"small"`, `"medium"`, `"large"` |
//! | `clock_horizontal` | float | 0.0-1.0, clamped |
//! | `clock_vertical` | float | 0.0-1.0, clamped |

use std::collections::HashMap;

use flume::{Receiver, Sender};
use log::debug;
use thiserror::Error;

use crate::config::{DEFAULT_HORIZONTAL, DEFAULT_OVERLAY_ENABLED, DEFAULT_SHOW_HASH, DEFAULT_VERTICAL};

// =============================================================================
// Keys
// =============================================================================

pub const KEY_ENABLE_CLOCK: &str = "enable_clock";
pub const KEY_CLOCK_FORMAT: &str = "clock_format";
pub const KEY_CLOCK_HASH: &str = "clock_hash";
pub const KEY_CLOCK_DIVIDER: &str = "clock_divider";
pub const KEY_CLOCK_SIZE: &str = "clock_size";
pub const KEY_CLOCK_HORIZONTAL: &str = "clock_horizontal";
pub const KEY_CLOCK_VERTICAL: &str = "clock_vertical";

/// Every key [`ClockConfig`] reads, in the order it reads them.
pub const CLOCK_KEYS: [&str; 7] = [
    KEY_ENABLE_CLOCK,
    KEY_CLOCK_FORMAT,
    KEY_CLOCK_HASH,
    KEY_CLOCK_DIVIDER,
    KEY_CLOCK_SIZE,
    KEY_CLOCK_HORIZONTAL,
    KEY_CLOCK_VERTICAL,
];

// =============================================================================
// Values and Errors
// =============================================================================

/// A stored setting value.
#[derive(Clone, PartialEq, Debug)]
pub enum SettingValue {
    Bool(bool),
    Float(f32),
    Text(String),
}

impl SettingValue {
    /// Name of the variant, for error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self { Self::Bool(value) }
}

impl From<f32> for SettingValue {
    fn from(value: f32) -> Self { Self::Float(value) }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self { Self::Text(value.to_owned()) }
}

/// A rejected setting change. The configuration is left untouched.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("setting `{key}` expects a {expected} value, got {found}")]
    TypeMismatch {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("setting `{key}` does not accept `{value}`")]
    InvalidValue { key: &'static str, value: String },
}

/// One notification: `key` now holds `value`.
#[derive(Clone, PartialEq, Debug)]
pub struct SettingChange {
    pub key: String,
    pub value: SettingValue,
}

/// Receives setting changes. Implemented by the engine.
pub trait SettingsListener {
    /// Called once per change, in the order the changes were made.
    fn on_setting_changed(
        &mut self,
        key: &str,
        value: &SettingValue,
    );
}

// =============================================================================
// Store
// =============================================================================

/// In-memory settings with change broadcast.
#[derive(Default, Debug)]
pub struct SettingsStore {
    values: HashMap<String, SettingValue>,
    subscribers: Vec<Sender<SettingChange>>,
}

impl SettingsStore {
    pub fn new() -> Self { Self::default() }

    /// Current value for `key`, if set.
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Store `value` under `key` and notify every live subscriber.
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<SettingValue>,
    ) {
        let value = value.into();
        self.values.insert(key.to_owned(), value.clone());

        let change = SettingChange { key: key.to_owned(), value };
        // A failed send means the receiver was dropped: unregister it.
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
        debug!("setting {key} changed, {} subscriber(s)", self.subscribers.len());
    }

    /// Register for change notifications. Drop the receiver to unregister.
    pub fn subscribe(&mut self) -> Receiver<SettingChange> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Number of registered subscribers whose receiver may still be alive.
    #[inline]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|tx| !tx.is_disconnected()).count()
    }
}

// =============================================================================
// Clock Configuration
// =============================================================================

/// Hour display for the overlay. The color always uses the 24-hour value.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum TimeFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

/// Separator between hour, minute and second in the overlay.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Divider {
    #[default]
    Colon,
    Space,
    None,
}

impl Divider {
    /// Separator text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Colon => ":",
            Self::Space => " ",
            Self::None => "",
        }
    }

    /// Next style in the cycle colon -> space -> none -> colon.
    pub const fn next(self) -> Self {
        match self {
            Self::Colon => Self::Space,
            Self::Space => Self::None,
            Self::None => Self::Colon,
        }
    }

    pub const fn setting_value(self) -> &'static str {
        match self {
            Self::Colon => "colon",
            Self::Space => "space",
            Self::None => "none",
        }
    }
}

/// Overlay font size.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ClockSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ClockSize {
    /// Next size in the cycle small -> medium -> large -> small.
    pub const fn next(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Small,
        }
    }

    pub const fn setting_value(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Everything the clock face needs from the user's settings.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ClockConfig {
    pub overlay_enabled: bool,
    pub format: TimeFormat,
    pub show_hash: bool,
    pub divider: Divider,
    pub size: ClockSize,
    /// Horizontal anchor, fraction of width in `[0, 1]`.
    pub horizontal: f32,
    /// Vertical anchor, fraction of height in `[0, 1]`.
    pub vertical: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            overlay_enabled: DEFAULT_OVERLAY_ENABLED,
            format: TimeFormat::default(),
            show_hash: DEFAULT_SHOW_HASH,
            divider: Divider::default(),
            size: ClockSize::default(),
            horizontal: DEFAULT_HORIZONTAL,
            vertical: DEFAULT_VERTICAL,
        }
    }
}

impl ClockConfig {
    /// Defaults overridden by whatever valid values the store already holds.
    ///
    /// Invalid stored values are skipped with a debug log; they never fail construction.
    pub fn from_settings(store: &SettingsStore) -> Self {
        let mut config = Self::default();
        for key in CLOCK_KEYS {
            let Some(value) = store.get(key) else { continue };
            if let Err(err) = config.apply(key, value) {
                debug!("ignoring stored setting: {err}");
            }
        }
        config
    }

    /// Apply one change.
    ///
    /// Returns `Ok(true)` if `key` is recognised and applied, `Ok(false)` if the
    /// key is not a clock setting, or an error if the value is unusable.
    pub fn apply(
        &mut self,
        key: &str,
        value: &SettingValue,
    ) -> Result<bool, SettingsError> {
        match key {
            KEY_ENABLE_CLOCK => self.overlay_enabled = expect_bool(KEY_ENABLE_CLOCK, value)?,
            KEY_CLOCK_HASH => self.show_hash = expect_bool(KEY_CLOCK_HASH, value)?,
            KEY_CLOCK_FORMAT => {
                self.format = match expect_text(KEY_CLOCK_FORMAT, value)? {
                    "24" => TimeFormat::TwentyFourHour,
                    "12" => TimeFormat::TwelveHour,
                    other => return Err(invalid(KEY_CLOCK_FORMAT, other)),
                };
            }
            KEY_CLOCK_DIVIDER => {
                self.divider = match expect_text(KEY_CLOCK_DIVIDER, value)? {
                    "colon" => Divider::Colon,
                    "space" => Divider::Space,
                    "none" => Divider::None,
                    other => return Err(invalid(KEY_CLOCK_DIVIDER, other)),
                };
            }
            KEY_CLOCK_SIZE => {
                self.size = match expect_text(KEY_CLOCK_SIZE, value)? {
                    "small" => ClockSize::Small,
                    "medium" => ClockSize::Medium,
                    "large" => ClockSize::Large,
                    other => return Err(invalid(KEY_CLOCK_SIZE, other)),
                };
            }
            KEY_CLOCK_HORIZONTAL => self.horizontal = expect_fraction(KEY_CLOCK_HORIZONTAL, value)?,
            KEY_CLOCK_VERTICAL => self.vertical = expect_fraction(KEY_CLOCK_VERTICAL, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn expect_bool(
    key: &'static str,
    value: &SettingValue,
) -> Result<bool, SettingsError> {
    match value {
        SettingValue::Bool(value) => Ok(*value),
        other => Err(SettingsError::TypeMismatch { key, expected: "bool", found: other.kind() }),
    }
}

fn expect_text<'a>(
    key: &'static str,
    value: &'a SettingValue,
) -> Result<&'a str, SettingsError> {
    match value {
        SettingValue::Text(value) => Ok(value.as_str()),
        other => Err(SettingsError::TypeMismatch { key, expected: "text", found: other.kind() }),
    }
}

/// Float clamped to `[0, 1]`. NaN is rejected.
fn expect_fraction(
    key: &'static str,
    value: &SettingValue,
) -> Result<f32, SettingsError> {
    match value {
        SettingValue::Float(value) if value.is_nan() => Err(invalid(key, "NaN")),
        SettingValue::Float(value) => Ok(value.clamp(0.0, 1.0)),
        other => Err(SettingsError::TypeMismatch { key, expected: "float", found: other.kind() }),
    }
}

fn invalid(
    key: &'static str,
    value: &str,
) -> SettingsError {
    SettingsError::InvalidValue { key, value: value.to_owned() }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClockConfig::default();
        assert!(config.overlay_enabled);
        assert!(config.show_hash);
        assert_eq!(config.format, TimeFormat::TwentyFourHour);
        assert_eq!(config.divider, Divider::Colon);
        assert_eq!(config.size, ClockSize::Medium);
        assert_eq!(config.horizontal, 0.5);
        assert_eq!(config.vertical, 0.5);
    }

    #[test]
    fn test_from_settings_reads_store() {
        let mut store = SettingsStore::new();
        store.set(KEY_ENABLE_CLOCK, false);
        store.set(KEY_CLOCK_FORMAT, "12");
        store.set(KEY_CLOCK_VERTICAL, 0.25_f32);

        let config = ClockConfig::from_settings(&store);
        assert!(!config.overlay_enabled);
        assert_eq!(config.format, TimeFormat::TwelveHour);
        assert_eq!(config.vertical, 0.25);
    }

    #[test]
    fn test_from_settings_skips_invalid_values() {
        let mut store = SettingsStore::new();
        store.set(KEY_ENABLE_CLOCK, "yes");
        store.set(KEY_CLOCK_SIZE, "huge");

        assert_eq!(ClockConfig::from_settings(&store), ClockConfig::default());
    }

    #[test]
    fn test_apply_enable_clock() {
        let mut config = ClockConfig::default();
        assert_eq!(config.apply(KEY_ENABLE_CLOCK, &false.into()), Ok(true));
        assert!(!config.overlay_enabled);
        assert_eq!(config.apply(KEY_ENABLE_CLOCK, &true.into()), Ok(true));
        assert!(config.overlay_enabled);
    }

    #[test]
    fn test_apply_unknown_key_ignored() {
        let mut config = ClockConfig::default();
        assert_eq!(config.apply("wallpaper_blur", &true.into()), Ok(false));
        assert_eq!(config, ClockConfig::default());
    }

    #[test]
    fn test_apply_type_mismatch_leaves_config() {
        let mut config = ClockConfig::default();
        let err = config.apply(KEY_ENABLE_CLOCK, &0.5_f32.into()).unwrap_err();
        assert_eq!(
            err,
            SettingsError::TypeMismatch { key: KEY_ENABLE_CLOCK, expected: "bool", found: "float" }
        );
        assert!(config.overlay_enabled);
    }

    #[test]
    fn test_apply_invalid_text() {
        let mut config = ClockConfig::default();
        let err = config.apply(KEY_CLOCK_DIVIDER, &"dash".into()).unwrap_err();
        assert_eq!(err.to_string(), "setting `clock_divider` does not accept `dash`");
        assert_eq!(config.divider, Divider::Colon);
    }

    #[test]
    fn test_position_clamped() {
        let mut config = ClockConfig::default();
        config.apply(KEY_CLOCK_HORIZONTAL, &1.7_f32.into()).unwrap();
        config.apply(KEY_CLOCK_VERTICAL, &(-0.3_f32).into()).unwrap();
        assert_eq!(config.horizontal, 1.0);
        assert_eq!(config.vertical, 0.0);
    }

    #[test]
    fn test_position_rejects_nan() {
        let mut config = ClockConfig::default();
        assert!(config.apply(KEY_CLOCK_HORIZONTAL, &f32::NAN.into()).is_err());
        assert_eq!(config.horizontal, 0.5);
    }

    #[test]
    fn test_divider_and_size_cycles_round_trip_through_settings() {
        let mut config = ClockConfig::default();
        let mut divider = Divider::Colon;
        for _ in 0..3 {
            divider = divider.next();
            config.apply(KEY_CLOCK_DIVIDER, &divider.setting_value().into()).unwrap();
            assert_eq!(config.divider, divider);
        }
        let mut size = ClockSize::Medium;
        for _ in 0..3 {
            size = size.next();
            config.apply(KEY_CLOCK_SIZE, &size.setting_value().into()).unwrap();
            assert_eq!(config.size, size);
        }
    }

    #[test]
    fn test_store_broadcasts_to_subscribers() {
        let mut store = SettingsStore::new();
        let first = store.subscribe();
        let second = store.subscribe();

        store.set(KEY_CLOCK_HASH, false);

        let expected = SettingChange { key: KEY_CLOCK_HASH.to_owned(), value: SettingValue::Bool(false) };
        assert_eq!(first.try_recv(), Ok(expected.clone()));
        assert_eq!(second.try_recv(), Ok(expected));
        assert!(first.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut store = SettingsStore::new();
        let kept = store.subscribe();
        let dropped = store.subscribe();
        assert_eq!(store.subscriber_count(), 2);

        drop(dropped);
        assert_eq!(store.subscriber_count(), 1);

        store.set(KEY_ENABLE_CLOCK, false);
        assert_eq!(store.subscribers.len(), 1);
        assert!(kept.try_recv().is_ok());
    }

    #[test]
    fn test_get_returns_latest_value() {
        let mut store = SettingsStore::new();
        assert_eq!(store.get(KEY_ENABLE_CLOCK), None);
        store.set(KEY_ENABLE_CLOCK, true);
        store.set(KEY_ENABLE_CLOCK, false);
        assert_eq!(store.get(KEY_ENABLE_CLOCK), Some(&SettingValue::Bool(false)));
    }

    #[test]
    fn test_from_settings_reads_only_clock_keys() {
        let mut store = SettingsStore::new();
        store.set("live_wallpaper_background", false);
        store.set(KEY_CLOCK_HORIZONTAL, 0.75_f32);

        let config = ClockConfig::from_settings(&store);
        assert_eq!(config.horizontal, 0.75);
        assert_eq!(config, ClockConfig { horizontal: 0.75, ..ClockConfig::default() });
    }

    #[test]
    fn test_clock_keys_are_all_recognised() {
        for key in CLOCK_KEYS {
            // Wrong type for some keys, but never "not a clock setting".
            assert_ne!(ClockConfig::default().apply(key, &true.into()), Ok(false), "{key}");
        }
    }
}
