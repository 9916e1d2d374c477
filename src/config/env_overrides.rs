use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("WRITEWISE_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .or_else(|_| std::env::var("API_KEY"))
            && !key.is_empty()
        {
            self.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("WRITEWISE_MODEL")
            && !model.is_empty()
        {
            self.default_model = model;
        }

        if let Ok(db) = std::env::var("WRITEWISE_DB")
            && !db.is_empty()
        {
            self.storage.path = Some(db);
        }

        if let Ok(level) = std::env::var("WRITEWISE_LOG")
            && !level.is_empty()
        {
            self.observability.log_level = level;
        }

        if let Ok(temp_str) = std::env::var("WRITEWISE_TEMPERATURE")
            && let Ok(temp) = temp_str.parse::<f64>()
            && (0.0..=2.0).contains(&temp)
        {
            self.default_temperature = temp;
        }
    }
}
