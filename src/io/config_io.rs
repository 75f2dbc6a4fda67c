use std::fs;
use std::path::Path;

use crate::model::Config;

/// Read config.toml from the data directory.
/// Missing or malformed files read as `None`; callers fall back to defaults.
pub fn read_config(dir: &Path) -> Option<Config> {
    let path = dir.join("config.toml");
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_color_overrides() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"[ui.colors]
priority_high = "#ff0000"
done = "#777777"
"##,
        )
        .unwrap();

        let config = read_config(tmp.path()).unwrap();
        assert_eq!(
            config.ui.colors.get("priority_high").map(String::as_str),
            Some("#ff0000")
        );
        assert_eq!(
            config.ui.colors.get("done").map(String::as_str),
            Some("#777777")
        );
    }

    #[test]
    fn missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(read_config(tmp.path()).is_none());
    }

    #[test]
    fn malformed_file_is_none() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[ui.colors\nbroken").unwrap();
        assert!(read_config(tmp.path()).is_none());
    }

    #[test]
    fn empty_file_is_default_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "").unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert!(config.ui.colors.is_empty());
    }
}
