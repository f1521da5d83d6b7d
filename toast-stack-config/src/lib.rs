use serde::{Deserialize, Deserializer, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

pub const ID: &str = "io.github.ToastStack";

/// Screen-relative anchor of the toast stack.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    #[default]
    BottomRight,
    BottomLeft,
    BottomMiddle,
    TopRight,
    TopLeft,
    TopMiddle,
}

impl ToastPosition {
    pub const ALL: [ToastPosition; 6] = [
        ToastPosition::BottomRight,
        ToastPosition::BottomLeft,
        ToastPosition::BottomMiddle,
        ToastPosition::TopRight,
        ToastPosition::TopLeft,
        ToastPosition::TopMiddle,
    ];

    /// Whether the stack grows upward from the bottom edge of the screen.
    pub fn is_bottom(self) -> bool {
        matches!(
            self,
            ToastPosition::BottomRight | ToastPosition::BottomLeft | ToastPosition::BottomMiddle
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToastPosition::BottomRight => "bottom-right",
            ToastPosition::BottomLeft => "bottom-left",
            ToastPosition::BottomMiddle => "bottom-middle",
            ToastPosition::TopRight => "top-right",
            ToastPosition::TopLeft => "top-left",
            ToastPosition::TopMiddle => "top-middle",
        }
    }
}

impl fmt::Display for ToastPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a position name matches none of the six presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPosition(pub String);

impl fmt::Display for UnknownPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown toast position '{}'", self.0)
    }
}

impl std::error::Error for UnknownPosition {}

impl FromStr for ToastPosition {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ToastPosition::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| UnknownPosition(s.to_string()))
    }
}

/// Order in which queued toasts are promoted when a slot frees up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueDiscipline {
    /// Promote the most recently queued toast first.
    #[default]
    Lifo,
    /// Promote the oldest queued toast first.
    Fifo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastsConfig {
    /// The maximum number of toasts that can be displayed at once.
    #[serde(default = "default_maximum_on_screen")]
    pub maximum_on_screen: u32,
    /// Vertical gap between stacked toasts in pixels.
    #[serde(default = "default_spacing")]
    pub spacing: i32,
    /// Horizontal distance from the anchored screen edge.
    #[serde(default = "default_offset_x")]
    pub offset_x: i32,
    /// Vertical distance from the anchored screen edge.
    #[serde(default = "default_offset_y")]
    pub offset_y: i32,
    /// Always place the stack on the primary screen instead of the screen
    /// holding the host window.
    #[serde(default)]
    pub always_on_main_screen: bool,
    #[serde(default, deserialize_with = "lenient_position")]
    pub position: ToastPosition,
    #[serde(default)]
    pub queue_discipline: QueueDiscipline,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            maximum_on_screen: default_maximum_on_screen(),
            spacing: default_spacing(),
            offset_x: default_offset_x(),
            offset_y: default_offset_y(),
            always_on_main_screen: false,
            position: ToastPosition::default(),
            queue_discipline: QueueDiscipline::default(),
        }
    }
}

impl ToastsConfig {
    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;
        serde_json::from_str(&raw)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }

    /// Set the position from its name. Unrecognized names leave the current
    /// value untouched.
    ///
    /// Returns whether the position was changed.
    pub fn set_position_name(&mut self, name: &str) -> bool {
        match name.parse::<ToastPosition>() {
            Ok(position) => {
                self.position = position;
                true
            }
            Err(err) => {
                tracing::warn!("Ignoring position update: {}", err);
                false
            }
        }
    }
}

/// Errors raised while loading a config file
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(PathBuf, String),
    /// The file is not valid config JSON
    Parse(PathBuf, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config {:?}: {}", path, e),
            ConfigError::Parse(path, e) => write!(f, "Invalid config {:?}: {}", path, e),
        }
    }
}

impl std::error::Error for ConfigError {}

// An unknown preset in a config file keeps the default instead of failing the whole load.
fn lenient_position<'de, D>(deserializer: D) -> Result<ToastPosition, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse::<ToastPosition>().unwrap_or_else(|err| {
        tracing::warn!("{}, using {}", err, ToastPosition::default());
        ToastPosition::default()
    }))
}

// Default value helpers for serde
const fn default_maximum_on_screen() -> u32 {
    3
}

const fn default_spacing() -> i32 {
    10
}

const fn default_offset_x() -> i32 {
    20
}

const fn default_offset_y() -> i32 {
    45
}
