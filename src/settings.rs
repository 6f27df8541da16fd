use std::ffi::OsString;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TerminalError;
use crate::registry::validation::validate_link_url;

// ── Content tables ──────────────────────────────────────────────

/// A social network reachable through `connect --<platform>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts-bindings", ts(export))]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    /// Full command that selects this link, e.g. `connect --github`.
    pub command: String,
}

impl SocialLink {
    pub fn new(name: &str, url: &str, command: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            command: command.to_string(),
        }
    }

    /// The `--platform` flag embedded in `command`.
    pub fn flag(&self) -> Option<&str> {
        self.command.split_whitespace().find(|t| t.starts_with("--"))
    }
}

/// An audio clip played by a long-running command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts-bindings", ts(export))]
pub struct AudioTrack {
    pub name: String,
    pub src: String,
    /// Playback length used by players that cannot read it from the file.
    #[serde(default = "default_track_secs")]
    pub duration_secs: f64,
}

fn default_track_secs() -> f64 {
    30.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorSettings {
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            frame_width: 240,
            frame_height: 160,
        }
    }
}

// ── Terminal settings ───────────────────────────────────────────

/// User-editable settings stored as `settings.json` in the config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalSettings {
    pub version: u32,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default = "default_social_links")]
    pub social_links: Vec<SocialLink>,
    #[serde(default = "default_audio_tracks")]
    pub audio_tracks: Vec<AudioTrack>,
    #[serde(default)]
    pub mirror: MirrorSettings,
}

const SETTINGS_VERSION: u32 = 1;

fn default_prompt() -> String {
    ">".to_string()
}

fn default_volume() -> f32 {
    1.0
}

fn default_social_links() -> Vec<SocialLink> {
    vec![
        SocialLink::new("GitHub", "https://github.com/b4rb13", "connect --github"),
        SocialLink::new("Telegram", "https://t.me/derkhachatryan", "connect --telegram"),
        SocialLink::new(
            "LinkedIn",
            "https://linkedin.com/in/derenik-khachatryan/",
            "connect --linkedin",
        ),
    ]
}

fn default_audio_tracks() -> Vec<AudioTrack> {
    vec![
        AudioTrack {
            name: "starwars".into(),
            src: "/audio/sw.mp3".into(),
            duration_secs: default_track_secs(),
        },
        AudioTrack {
            name: "marvel".into(),
            src: "/audio/av.mp3".into(),
            duration_secs: default_track_secs(),
        },
    ]
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            prompt: default_prompt(),
            volume: default_volume(),
            social_links: default_social_links(),
            audio_tracks: default_audio_tracks(),
            mirror: MirrorSettings::default(),
        }
    }
}

impl TerminalSettings {
    /// Volume clamped to `[0, 1]`; NaN falls back to full volume.
    pub fn effective_volume(&self) -> f32 {
        if self.volume.is_nan() {
            return 1.0;
        }
        self.volume.clamp(0.0, 1.0)
    }

    /// Reject link and track tables the handlers could not act on.
    pub fn validate(&self) -> Result<(), TerminalError> {
        for link in &self.social_links {
            validate_link_url(&link.url)?;
            if link.flag().is_none() {
                return Err(TerminalError::Settings {
                    message: format!("Social link \"{}\" has no --flag in its command", link.name),
                });
            }
        }
        for track in &self.audio_tracks {
            if track.name.trim().is_empty() || track.src.trim().is_empty() {
                return Err(TerminalError::Settings {
                    message: "Audio tracks need a name and a src".to_string(),
                });
            }
            if !track.duration_secs.is_finite() || track.duration_secs <= 0.0 {
                return Err(TerminalError::Settings {
                    message: format!("Audio track \"{}\" has an invalid duration", track.name),
                });
            }
        }
        Ok(())
    }
}

/// Load settings from the config directory. Returns None if no settings file exists.
pub fn load_settings(config_dir: &Path) -> Result<Option<TerminalSettings>, TerminalError> {
    let path = crate::paths::settings_path(config_dir);
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&path)?;
    let settings: TerminalSettings = serde_json::from_str(&raw)?;
    settings.validate()?;
    Ok(Some(settings))
}

/// Load settings, falling back to defaults when the file is absent.
pub fn load_or_default(config_dir: &Path) -> Result<TerminalSettings, TerminalError> {
    Ok(load_settings(config_dir)?.unwrap_or_default())
}

/// Save settings to the config directory (temp file + rename).
pub fn save_settings(config_dir: &Path, settings: &TerminalSettings) -> Result<(), TerminalError> {
    std::fs::create_dir_all(config_dir)?;
    let path = crate::paths::settings_path(config_dir);
    let json = serde_json::to_string_pretty(settings)?;

    let mut tmp_name = OsString::from(path.file_name().unwrap_or_default());
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}
