pub mod loader;
pub mod settings;

use serde::{Deserialize, Serialize};

pub use loader::{ConfigError, load_config_from, load_config_from_file, save_config_to};
pub use settings::{GameConfig, PlayerConfig, TimerConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub timer: TimerConfig,
    pub player: PlayerConfig,
}
