//! Static asset layout. Every resolved icon is `<base-dir>/<filename>`; the
//! directories are flat and shared with the frontend build, so these values
//! must not change.

pub const FILL_BASE_DIR: &str = "/assets/weather-icons/fill/all";
pub const LINE_BASE_DIR: &str = "/assets/weather-icons/line/all";
pub const GIF_BASE_DIR: &str = "/assets/weather-icons/gif";

/// Shipped under both vector directories.
pub const DEFAULT_ICON: &str = "not-available.svg";

pub(crate) fn join(base_dir: &str, filename: &str) -> String {
    format!("{}/{}", base_dir, filename.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_does_not_double_slashes() {
        assert_eq!(join(FILL_BASE_DIR, "clear-day.svg"), "/assets/weather-icons/fill/all/clear-day.svg");
        assert_eq!(join(GIF_BASE_DIR, "/rain.gif"), "/assets/weather-icons/gif/rain.gif");
    }
}
