#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub initial_rating: i32,
    pub k_factor: f64,
    pub game_log_cap: usize,
    pub history_cap: usize,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            initial_rating: 1000,
            k_factor: 32.0,
            game_log_cap: 100,
            history_cap: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
        }
    }
}
