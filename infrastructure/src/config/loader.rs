//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "treasury-council";
const PROJECT_FILES: [&str; 2] = ["council.toml", ".council.toml"];
const ENV_PREFIX: &str = "COUNCIL_";

/// Files that feed one configuration load, lowest priority first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSources {
    pub global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub explicit: Option<PathBuf>,
}

impl ConfigSources {
    /// Discover the global and project files around `project_dir`
    pub fn discover(project_dir: &Path, explicit: Option<&Path>) -> Self {
        Self {
            global: ConfigLoader::global_config_path().filter(|p| p.exists()),
            project: ConfigLoader::project_config_path(project_dir),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        for path in [&self.global, &self.project, &self.explicit]
            .into_iter()
            .flatten()
        {
            figment = figment.merge(Toml::file(path));
        }
        figment
    }
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `COUNCIL_` environment variables, `__` separating section and key
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./council.toml` or `./.council.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/treasury-council/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let project_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let sources = ConfigSources::discover(&project_dir, config_path);
        sources
            .figment()
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only the given files, without environment overrides
    pub fn load_sources(sources: &ConfigSources) -> Result<FileConfig, Box<figment::Error>> {
        sources.figment().extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/treasury-council/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path(project_dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| project_dir.join(name))
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let project_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] {}* variables", ENV_PREFIX));
        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{}] Explicit: {}", mark, path.display()));
        }
        match Self::project_config_path(&project_dir) {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./council.toml or ./.council.toml".to_string()),
        }
        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }
        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.autonomous.interval_ms, 30_000);
        assert!(!config.execution.dry_run);
    }

    #[test]
    fn test_global_config_path_names_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("treasury-council"));
        }
    }

    #[test]
    fn test_project_file_discovery() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::project_config_path(dir.path()).is_none());

        fs::write(dir.path().join(".council.toml"), "").unwrap();
        assert_eq!(
            ConfigLoader::project_config_path(dir.path()),
            Some(dir.path().join(".council.toml"))
        );

        fs::write(dir.path().join("council.toml"), "").unwrap();
        assert_eq!(
            ConfigLoader::project_config_path(dir.path()),
            Some(dir.path().join("council.toml"))
        );
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("council.toml");
        let explicit = dir.path().join("explicit.toml");

        fs::write(
            &global,
            "[voters]\nrisk = \"global-model\"\nethics = \"global-model\"\n",
        )
        .unwrap();
        fs::write(&project, "[voters]\nrisk = \"project-model\"\n").unwrap();
        fs::write(&explicit, "[autonomous]\ninterval_ms = 5000\n").unwrap();

        let config = ConfigLoader::load_sources(&ConfigSources {
            global: Some(global),
            project: Some(project),
            explicit: Some(explicit),
        })
        .unwrap();

        assert_eq!(config.voters.risk, "project-model");
        assert_eq!(config.voters.ethics, "global-model");
        assert_eq!(config.voters.structure, "gpt-4o-mini");
        assert_eq!(config.autonomous.interval_ms, 5000);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("council.toml");
        fs::write(&path, "[autonomous]\ninterval_ms = \"soon\"\n").unwrap();

        let result = ConfigLoader::load_sources(&ConfigSources {
            project: Some(path),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
