#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::{Config, GameConfig, PlayerConfig, TimerConfig};

    #[test]
    fn test_default_game_config() {
        let game = GameConfig::default();
        assert_eq!(game.columns, 5);
        assert_eq!(game.rows, 5);
        assert_eq!(game.lives, 3);
        assert_eq!(game.skips, 3);
    }

    #[test]
    fn test_default_timer_config() {
        let timer = TimerConfig::default();
        assert_eq!(timer.base_delay_ms, 12_000);
        assert_eq!(timer.min_delay_ms, 2_500);
        assert_eq!(timer.delay_step_ms, 500);
    }

    #[test]
    fn test_default_player_name() {
        assert_eq!(PlayerConfig::default().name, "Player");
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[game]"));
        assert!(text.contains("[timer]"));
        assert!(text.contains("[player]"));

        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_custom_timer_floor() {
        let timer = TimerConfig {
            base_delay_ms: 1_000,
            min_delay_ms: 600,
            delay_step_ms: 300,
        };
        assert_eq!(timer.delay_for_level(1), Duration::from_millis(700));
        assert_eq!(timer.delay_for_level(2), Duration::from_millis(600));
    }
}
