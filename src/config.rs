use serde::Deserialize;
use std::path::PathBuf;

use audiobars::encode::json::OutputFormat;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    #[serde(default = "default_max_int")]
    pub max_int: f64,
    #[serde(default)]
    pub temporal_smoothing: bool,
    #[serde(default)]
    pub channel: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            max_int: default_max_int(),
            temporal_smoothing: false,
            channel: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            format: OutputFormat::default(),
        }
    }
}

pub fn default_sample_size() -> usize { 128 }
pub fn default_max_int() -> f64 { 32768.0 }
pub fn default_fps() -> f64 { 30.0 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::debug!("Invalid config {}: {}", path.display(), err);
            None
        }
    }
}

/// Explicit path first, then `./audiobars.toml`, then the user config directories.
pub fn find_config(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let local = PathBuf::from("audiobars.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("audiobars").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("audiobars").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.analysis.sample_size, 128);
        assert_eq!(config.analysis.max_int, 32768.0);
        assert!(!config.analysis.temporal_smoothing);
        assert_eq!(config.analysis.channel, None);
        assert_eq!(config.output.fps, 30.0);
        assert_eq!(config.output.format, OutputFormat::Jsonl);
    }

    #[test]
    fn parses_all_sections() {
        let config: Config = toml::from_str(
            r#"
            [analysis]
            sample_size = 256
            max_int = 16384.0
            temporal_smoothing = true
            channel = 1

            [output]
            fps = 60.0
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.analysis.sample_size, 256);
        assert_eq!(config.analysis.max_int, 16384.0);
        assert!(config.analysis.temporal_smoothing);
        assert_eq!(config.analysis.channel, Some(1));
        assert_eq!(config.output.fps, 60.0);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn load_config_reads_file() {
        let path = std::env::temp_dir().join(format!("audiobars-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[analysis]\nsample_size = 32\n").unwrap();
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.analysis.sample_size, 32);
    }

    #[test]
    fn load_config_rejects_invalid_toml() {
        let path = std::env::temp_dir().join(format!("audiobars-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[analysis\nsample_size = ").unwrap();
        let config = load_config(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn explicit_config_path_wins() {
        let explicit = PathBuf::from("/tmp/custom.toml");
        assert_eq!(find_config(Some(explicit.clone())), Some(explicit));
    }
}
