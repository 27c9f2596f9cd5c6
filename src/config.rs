use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

pub const DATA_PATH_VAR: &str = "SALES_DATA_PATH";
pub const TOP_N_VAR: &str = "SALES_TOP_N";

const DEFAULT_DATA_PATH: &str = "sales.csv";
const DEFAULT_TOP_N: usize = 10;

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Source opened when the window starts.
    pub data_path: PathBuf,
    /// How many cakes the bar chart shows.
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl DashboardConfig {
    /// Read the process environment, after loading a `.env` file if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(DATA_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path.trim());
        }

        if let Some(raw) = lookup(TOP_N_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.top_n = n,
                _ => log::warn!(
                    "Ignoring {TOP_N_VAR}={raw:?}: expected a positive integer, using {DEFAULT_TOP_N}"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> DashboardConfig {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config_from(&[]), DashboardConfig::default());
        assert_eq!(DashboardConfig::default().data_path, PathBuf::from("sales.csv"));
        assert_eq!(DashboardConfig::default().top_n, 10);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[(DATA_PATH_VAR, " data/orders.csv "), (TOP_N_VAR, "5")]);
        assert_eq!(config.data_path, PathBuf::from("data/orders.csv"));
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn invalid_values_fall_back() {
        for bad in ["0", "-2", "ten", ""] {
            let config = config_from(&[(TOP_N_VAR, bad), (DATA_PATH_VAR, "  ")]);
            assert_eq!(config, DashboardConfig::default(), "input {bad:?}");
        }
    }
}
