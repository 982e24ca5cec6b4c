use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

/// Bump when the persisted shape changes; a mismatched file falls back to
/// defaults instead of being migrated in place.
pub const SETTINGS_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Monthly,
    Yearly,
}

/// A time of day on the 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTime {
    pub hour: u32,
    pub minute: u32,
}

impl ShiftTime {
    /// Out-of-range values are clamped, not rejected.
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    pub fn seconds_from_midnight(&self) -> i64 {
        i64::from(self.hour) * 3600 + i64::from(self.minute) * 60
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: String,
    pub period: Period,
    pub pay: f64,
    pub shift_start: ShiftTime,
    pub shift_end: ShiftTime,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            period: Period::Yearly,
            pay: 120_000.0,
            shift_start: ShiftTime { hour: 9, minute: 0 },
            shift_end: ShiftTime { hour: 17, minute: 0 },
        }
    }
}

/// Coerce free-form pay input the way the widget's number field does:
/// empty, non-numeric, or negative text all become 0.
pub fn coerce_pay(input: &str) -> f64 {
    let parsed = input.trim().parse::<f64>().unwrap_or(0.0);
    if parsed.is_finite() && parsed > 0.0 {
        parsed
    } else {
        0.0
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSettings {
    version: u32,
    settings: Settings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<Settings>,
}

impl SettingsStore {
    /// Open the store at `path`. Never fails: an absent, unreadable, or
    /// version-mismatched file yields defaults for the session.
    pub fn open(path: PathBuf) -> Self {
        let data = match Self::load(&path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!("failed to load settings from {}: {err:#}", path.display());
                Settings::default()
            }
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    fn load(path: &Path) -> Result<Option<Settings>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let stored: StoredSettings = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings from {}", path.display()))?;

        if stored.version != SETTINGS_VERSION {
            warn!(
                "settings file {} has version {}, expected {}; using defaults",
                path.display(),
                stored.version,
                SETTINGS_VERSION
            );
            return Ok(None);
        }

        Ok(Some(stored.settings))
    }

    pub fn settings(&self) -> Settings {
        self.data.read().unwrap().clone()
    }

    pub fn set_currency(&self, currency: String) {
        self.update(|settings| settings.currency = currency);
    }

    pub fn set_period(&self, period: Period) {
        self.update(|settings| settings.period = period);
    }

    pub fn set_pay(&self, pay: f64) {
        let pay = if pay.is_finite() && pay > 0.0 { pay } else { 0.0 };
        self.update(|settings| settings.pay = pay);
    }

    pub fn set_shift_start(&self, hour: u32, minute: u32) {
        self.update(|settings| settings.shift_start = ShiftTime::new(hour, minute));
    }

    pub fn set_shift_end(&self, hour: u32, minute: u32) {
        self.update(|settings| settings.shift_end = ShiftTime::new(hour, minute));
    }

    /// Apply one mutation and re-save the whole record. Write failures are
    /// swallowed; the in-memory value stands for the session.
    fn update(&self, apply: impl FnOnce(&mut Settings)) {
        let mut guard = self.data.write().unwrap();
        apply(&mut guard);
        if let Err(err) = self.persist(&guard) {
            warn!("failed to persist settings: {err:#}");
        }
    }

    fn persist(&self, data: &Settings) -> Result<()> {
        let stored = StoredSettings {
            version: SETTINGS_VERSION,
            settings: data.clone(),
        };
        let serialized = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))
    }

    /// Re-read the file on demand, replacing the in-memory record.
    pub fn reload(&self) -> Result<()> {
        if let Some(settings) = Self::load(&self.path)? {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
        }
        Ok(())
    }
}
