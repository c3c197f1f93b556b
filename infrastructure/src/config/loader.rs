//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const APP_DIR: &str = "glp1-advisor";
const PROJECT_FILES: [&str; 2] = ["glp1-advisor.toml", ".glp1-advisor.toml"];
const ENV_PREFIX: &str = "GLP1_ADVISOR_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `GLP1_ADVISOR_<SECTION>__<KEY>` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./glp1-advisor.toml` or `./.glp1-advisor.toml`
    /// 4. Global: `<config dir>/glp1-advisor/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!(
                "  [     ] Project: ./{} or ./{}",
                PROJECT_FILES[0], PROJECT_FILES[1]
            );
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{}] Global:  {}", mark, path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_domain::OutputFormat;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.fallback.enabled);
        assert_eq!(config.api.max_attempts, 3);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains(APP_DIR));
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("glp1-advisor.toml", "[api]\ntimeout_secs = 20")?;
            jail.create_file("custom.toml", "[api]\ntimeout_secs = 42\n\n[output]\nformat = \"json\"")?;
            let path = PathBuf::from("custom.toml");

            let config = ConfigLoader::load(Some(&path)).map_err(|e| *e)?;
            assert_eq!(config.api.timeout_secs, 42);
            assert_eq!(config.output.format, OutputFormat::Json);
            assert_eq!(config.api.check_timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("glp1-advisor.toml", "[api]\nmax_attempts = 4")?;
            jail.set_env("GLP1_ADVISOR_FALLBACK__ENABLED", "false");
            jail.set_env("GLP1_ADVISOR_API__MAX_ATTEMPTS", "7");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.api.max_attempts, 7);
            assert!(!config.fallback.enabled);
            Ok(())
        });
    }

    #[test]
    fn test_project_file_is_read() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(".glp1-advisor.toml", "[fallback]\nforce_mock = true")?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert!(config.fallback.force_mock);
            Ok(())
        });
    }
}
