// File: src/paths.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

// Allow injecting a base path (from the mobile host's files directory)
static MOBILE_BASE_DIR: OnceLock<PathBuf> = OnceLock::new();

pub const TEST_DIR_ENV: &str = "DAILYNEWS_TEST_DIR";

pub struct AppPaths;

impl AppPaths {
    /// Initialize the mobile base directory. Only the first call takes effect.
    pub fn init_mobile_path(path: String) {
        let _ = MOBILE_BASE_DIR.set(PathBuf::from(path));
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "dailynews", "dailynews")
    }

    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    /// Mobile override first, then the test override, then the OS default.
    fn resolve_base(subdir: &str) -> Option<PathBuf> {
        if let Some(mobile_root) = MOBILE_BASE_DIR.get() {
            return Some(mobile_root.join(subdir));
        }

        if let Ok(test_dir) = env::var(TEST_DIR_ENV) {
            return Some(PathBuf::from(test_dir).join(subdir));
        }

        let proj = Self::get_proj_dirs()?;
        let dir = match subdir {
            "data" => proj.data_dir(),
            "config" => proj.config_dir(),
            _ => return None,
        };
        Some(dir.to_path_buf())
    }

    pub fn get_data_dir() -> Result<PathBuf> {
        let path = Self::resolve_base("data")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Self::ensure_exists(path)
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        let path = Self::resolve_base("config")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::ensure_exists(path)
    }

    pub fn get_log_dir() -> Result<PathBuf> {
        Self::ensure_exists(Self::get_data_dir()?.join("logs"))
    }

    pub fn get_config_file_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }
}
