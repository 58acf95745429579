use crate::events::AppEvent;
use crate::timer::Millis;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// Horizontal swipe direction that closes the navigation menu.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    #[strum(serialize = "Left", serialize = "l")]
    Left,
    #[strum(serialize = "Right", serialize = "r")]
    Right,
    #[default]
    #[strum(serialize = "Either", serialize = "any", serialize = "both")]
    Either,
}

impl SwipeDirection {
    pub fn closes(&self, delta: f64, threshold: f64) -> bool {
        match self {
            Self::Left => -delta > threshold,
            Self::Right => delta > threshold,
            Self::Either => delta.abs() > threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: Millis,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TestimonialConfig {
    pub interval_ms: Millis,
}

impl Default for TestimonialConfig {
    fn default() -> Self {
        Self { interval_ms: 7000 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub breakpoint: f64,
    pub swipe_threshold: f64,
    pub swipe_direction: SwipeDirection,
    pub close_delay_ms: Millis,
    pub focus_first_link: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            swipe_threshold: 50.0,
            swipe_direction: SwipeDirection::Either,
            close_delay_ms: 300,
            focus_first_link: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    pub type_ms: Millis,
    pub delete_ms: Millis,
    pub end_pause_ms: Millis,
    pub between_pause_ms: Millis,
    pub start_delay_ms: Millis,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Gentle Care".to_string(),
                "Bright Smiles".to_string(),
                "Modern Dentistry".to_string(),
            ],
            type_ms: 100,
            delete_ms: 50,
            end_pause_ms: 2500,
            between_pause_ms: 500,
            start_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub debounce_ms: Millis,
    pub header_threshold: f64,
    pub parallax_factor: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            header_threshold: 100.0,
            parallax_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub bottom_margin: f64,
    pub stagger_ms: Millis,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin: 100.0,
            stagger_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BookingConfig {
    pub url: String,
    pub service_key: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            url: "https://booking.brightsmile.example/appointments".to_string(),
            service_key: "selectedService".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub carousel: CarouselConfig,
    pub testimonials: TestimonialConfig,
    pub menu: MenuConfig,
    pub typewriter: TypewriterConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub booking: BookingConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No platform config directory for clinic-ui")]
    NoConfigDir,
    #[error("Invalid clinic-ui settings: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("Cannot write settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings watcher failed: {0}")]
    Watch(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "brightsmile", "clinic-ui").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Settings file, then `CLINIC__SECTION__FIELD` environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = get_config_path()?;

    let settings = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("CLINIC").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        log::warn!("Using built-in settings: {}", e);
        Config::default()
    })
}

/// Writes the default settings unless a file is already there.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if path.exists() {
        log::info!("Keeping existing settings at {}", path.display());
        return Ok(path);
    }
    if let Some(dir) = path.parent() {
        fs_err::create_dir_all(dir)?;
    }
    fs_err::write(&path, DEFAULT_CONFIG)?;
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether a filesystem event changed the settings file itself.
fn touches_settings(event: &notify::Event, path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == path)
}

/// Sends `ConfigReload` whenever the settings file changes. The parent
/// directory is watched so editors that replace the file are seen too.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Settings reload disabled: {}", e);
            return;
        }
    };
    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        return;
    };
    if let Err(e) = fs_err::create_dir_all(&dir) {
        log::error!("Settings reload disabled, cannot create {}: {}", dir.display(), e);
        return;
    }

    let (fs_tx, fs_rx) = async_channel::unbounded();
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = fs_tx.send_blocking(res);
        },
        notify::Config::default(),
    );
    let mut watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            log::error!("{}", ConfigError::from(e));
            return;
        }
    };
    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        log::error!("{}", ConfigError::from(e));
        return;
    }
    log::debug!("Watching {} for settings changes", path.display());

    while let Ok(res) = fs_rx.recv().await {
        match res {
            Ok(event) if touches_settings(&event, &path) => {
                log::debug!("Settings file changed ({:?})", event.kind);
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("{}", ConfigError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_direction_deserialization() {
        let cases = vec![
            ("\"left\"", SwipeDirection::Left),
            ("\"Left\"", SwipeDirection::Left),
            ("\"L\"", SwipeDirection::Left),
            ("\"right\"", SwipeDirection::Right),
            ("\"r\"", SwipeDirection::Right),
            ("\"either\"", SwipeDirection::Either),
            ("\"BOTH\"", SwipeDirection::Either),
        ];

        for (json, expected) in cases {
            let deserialized: SwipeDirection = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_swipe_threshold_is_exclusive() {
        assert!(!SwipeDirection::Either.closes(50.0, 50.0));
        assert!(!SwipeDirection::Either.closes(-49.0, 50.0));
        assert!(SwipeDirection::Either.closes(-51.0, 50.0));
        assert!(SwipeDirection::Right.closes(51.0, 50.0));
        assert!(!SwipeDirection::Right.closes(-80.0, 50.0));
        assert!(SwipeDirection::Left.closes(-80.0, 50.0));
    }

    #[test]
    fn test_embedded_default_config_matches_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_section_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[carousel]\ninterval_ms = 3000\n\n[menu]\nswipe_direction = \"right\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed.carousel.interval_ms, 3000);
        assert_eq!(parsed.testimonials.interval_ms, 7000);
        assert_eq!(parsed.menu.swipe_direction, SwipeDirection::Right);
        assert_eq!(parsed.menu.breakpoint, 768.0);
        assert_eq!(parsed.typewriter, TypewriterConfig::default());
    }

    #[test]
    fn test_empty_slide_sections_use_their_own_defaults() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[carousel]\n\n[testimonials]\n\n[scroll]\ndebounce_ms = 20\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed.carousel.interval_ms, 5000);
        assert_eq!(parsed.testimonials.interval_ms, 7000);
        assert_eq!(parsed.scroll.debounce_ms, 20);
    }

    #[test]
    fn test_only_settings_file_changes_trigger_reload() {
        let path = Path::new("/home/u/.config/clinic-ui/config.toml");
        let modified = notify::Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(path.to_path_buf());
        let sibling = notify::Event::new(EventKind::Create(notify::event::CreateKind::File))
            .add_path(PathBuf::from("/home/u/.config/clinic-ui/config.toml~"));
        let accessed = notify::Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path(path.to_path_buf());

        assert!(touches_settings(&modified, path));
        assert!(!touches_settings(&sibling, path));
        assert!(!touches_settings(&accessed, path));
    }
}
