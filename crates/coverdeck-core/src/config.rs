use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::deck::MediaKind;
use crate::draw::DrawMode;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Deck file (JSON array of items)
    #[serde(default = "default_deck_path")]
    pub deck_path: PathBuf,
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fixed shuffle seed, mostly useful for demos and bug reports
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            deck_path: default_deck_path(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            seed: None,
        }
    }
}

/// Navigation and gesture tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Pixel-equivalent drag distance for one index step
    #[serde(default = "default_slot_pitch")]
    pub slot_pitch: f64,
    /// Cards further than this from the center are de-emphasized
    #[serde(default = "default_max_visible_side")]
    pub max_visible_side: u32,
    /// Cards further than this from the center are not rendered at all
    #[serde(default = "default_hide_beyond")]
    pub hide_beyond: u32,
    /// Pointer sequences that never move this far are taps
    #[serde(default = "default_jitter_threshold")]
    pub jitter_threshold: f64,
    /// Wheel deltas smaller than this are ignored
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f64,
    /// Tapping a side card also flips it once it has been centered
    #[serde(default = "default_true")]
    pub flip_after_select: bool,
    /// Render passes to wait between a tap recenter and its flip
    #[serde(default = "default_flip_settle_frames")]
    pub flip_settle_frames: u32,
    /// A tap on the front face of a revealed card toggles its overlay
    #[serde(default = "default_true")]
    pub front_tap_toggles_overlay: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slot_pitch: default_slot_pitch(),
            max_visible_side: default_max_visible_side(),
            hide_beyond: default_hide_beyond(),
            jitter_threshold: default_jitter_threshold(),
            wheel_threshold: default_wheel_threshold(),
            flip_after_select: default_true(),
            flip_settle_frames: default_flip_settle_frames(),
            front_tap_toggles_overlay: default_true(),
        }
    }
}

/// Overlay disclosure timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Overlay delay for image cards (ms)
    #[serde(default = "default_image_delay")]
    pub image_delay_ms: u64,
    /// Overlay delay for video cards (ms)
    #[serde(default = "default_video_delay")]
    pub video_delay_ms: u64,
    /// Delay multiplier applied on compact viewports
    #[serde(default = "default_compact_scale")]
    pub compact_scale: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            image_delay_ms: default_image_delay(),
            video_delay_ms: default_video_delay(),
            compact_scale: default_compact_scale(),
        }
    }
}

impl RevealConfig {
    /// Overlay delay for a media kind, shortened when the viewport is compact
    pub fn overlay_delay(&self, kind: MediaKind, compact: bool) -> Duration {
        let ms = match kind {
            MediaKind::Image => self.image_delay_ms,
            MediaKind::Video => self.video_delay_ms,
        };
        if compact {
            Duration::from_millis((ms as f64 * self.compact_scale).round() as u64)
        } else {
            Duration::from_millis(ms)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Starting mode: "replace" or "no-replace"
    #[serde(default)]
    pub mode: DrawMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixel-equivalent width of one terminal column
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: f64,
    /// Card width in columns
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    /// Horizontal distance between neighbouring card centers in columns
    #[serde(default = "default_card_spacing")]
    pub card_spacing: u16,
    /// Terminals narrower than this count as compact viewports
    #[serde(default = "default_compact_below_cols")]
    pub compact_below_cols: u16,
    /// Wheel delta reported per mouse scroll notch
    #[serde(default = "default_wheel_step")]
    pub wheel_step: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_width_px: default_cell_width_px(),
            card_width: default_card_width(),
            card_spacing: default_card_spacing(),
            compact_below_cols: default_compact_below_cols(),
            wheel_step: default_wheel_step(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "h", "<C-r>" (Ctrl+r), "<S-Tab>" (Shift+Tab), "<CR>" (Enter), "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Step one card to the left
    #[serde(default = "default_key_step_left")]
    pub step_left: String,
    /// Step one card to the right
    #[serde(default = "default_key_step_right")]
    pub step_right: String,
    /// Flip the centered card
    #[serde(default = "default_key_flip")]
    pub flip: String,
    /// Toggle the overlay of the centered card
    #[serde(default = "default_key_toggle_overlay")]
    pub toggle_overlay: String,
    /// Reshuffle the deck
    #[serde(default = "default_key_reshuffle")]
    pub reshuffle: String,
    /// Switch between replace and no-replace
    #[serde(default = "default_key_toggle_mode")]
    pub toggle_mode: String,
    /// Open the centered card's link in the browser
    #[serde(default = "default_key_open_link")]
    pub open_link: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            step_left: default_key_step_left(),
            step_right: default_key_step_right(),
            flip: default_key_flip(),
            toggle_overlay: default_key_toggle_overlay(),
            reshuffle: default_key_reshuffle(),
            toggle_mode: default_key_toggle_mode(),
            open_link: default_key_open_link(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_step_left() -> String { "h".to_string() }
fn default_key_step_right() -> String { "l".to_string() }
fn default_key_flip() -> String { "<CR>".to_string() }
fn default_key_toggle_overlay() -> String { "i".to_string() }
fn default_key_reshuffle() -> String { "r".to_string() }
fn default_key_toggle_mode() -> String { "m".to_string() }
fn default_key_open_link() -> String { "o".to_string() }

fn default_deck_path() -> PathBuf {
    PathBuf::from("data/deck.json")
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coverdeck")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_slot_pitch() -> f64 {
    140.0
}

fn default_max_visible_side() -> u32 {
    3
}

fn default_hide_beyond() -> u32 {
    6
}

fn default_jitter_threshold() -> f64 {
    6.0
}

fn default_wheel_threshold() -> f64 {
    4.0
}

fn default_flip_settle_frames() -> u32 {
    2
}

fn default_image_delay() -> u64 {
    1200
}

fn default_video_delay() -> u64 {
    1500
}

fn default_compact_scale() -> f64 {
    0.6
}

fn default_tick_rate() -> u64 {
    50
}

fn default_cell_width_px() -> f64 {
    10.0
}

fn default_card_width() -> u16 {
    24
}

fn default_card_spacing() -> u16 {
    14
}

fn default_compact_below_cols() -> u16 {
    100
}

fn default_wheel_step() -> f64 {
    10.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        let config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Reject values the navigation math cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let c = &self.carousel;
        if !(c.slot_pitch > 0.0) {
            return Err(crate::Error::Config(format!(
                "carousel.slot_pitch must be positive, got {}",
                c.slot_pitch
            )));
        }
        if c.jitter_threshold < 0.0 || c.wheel_threshold < 0.0 {
            return Err(crate::Error::Config(
                "carousel thresholds must not be negative".to_string(),
            ));
        }
        if c.hide_beyond < c.max_visible_side {
            return Err(crate::Error::Config(format!(
                "carousel.hide_beyond ({}) must be >= carousel.max_visible_side ({})",
                c.hide_beyond, c.max_visible_side
            )));
        }
        if !(self.reveal.compact_scale > 0.0) {
            return Err(crate::Error::Config(
                "reveal.compact_scale must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/coverdeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("coverdeck")
            .join("config.toml")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("coverdeck.log")
    }

    /// Get the deck path (with tilde expansion)
    pub fn deck_path(&self) -> PathBuf {
        expand_tilde(&self.general.deck_path)
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.carousel.slot_pitch, 140.0);
        assert_eq!(config.draw.mode, DrawMode::Replace);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [carousel]
            slot_pitch = 90.0

            [draw]
            mode = "no-replace"
            "#,
        )
        .unwrap();

        assert_eq!(config.carousel.slot_pitch, 90.0);
        assert_eq!(config.carousel.max_visible_side, 3);
        assert_eq!(config.draw.mode, DrawMode::NoReplace);
        assert_eq!(config.reveal.image_delay_ms, 1200);
        assert_eq!(config.keymap.reshuffle, "r");
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let mut config = AppConfig::default();
        config.carousel.max_visible_side = 4;
        config.carousel.hide_beyond = 2;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_pitch() {
        let mut config = AppConfig::default();
        config.carousel.slot_pitch = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overlay_delay_by_kind() {
        let reveal = RevealConfig::default();
        assert_eq!(
            reveal.overlay_delay(MediaKind::Image, false),
            Duration::from_millis(1200)
        );
        assert_eq!(
            reveal.overlay_delay(MediaKind::Video, false),
            Duration::from_millis(1500)
        );
        assert_eq!(
            reveal.overlay_delay(MediaKind::Video, true),
            Duration::from_millis(900)
        );
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        let p = PathBuf::from("/tmp/deck.json");
        assert_eq!(expand_tilde(&p), p);
    }
}
