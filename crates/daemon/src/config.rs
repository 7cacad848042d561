//! Host configuration read from the environment at start-up

use std::path::PathBuf;

pub const DEFAULT_DICTIONARY_PATH: &str = "/mnt/sdcard/PIN4.TXT";
pub const DEFAULT_LEDGER_PATH: &str = "/mnt/sdcard/pin.log";
pub const DEFAULT_HIDG_PATH: &str = "/dev/hidg0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonConfig {
    pub dictionary_path: PathBuf,
    pub ledger_path: PathBuf,
    pub hidg_path: PathBuf,
    /// None: discover the first controller under /sys/class/udc
    pub udc_state_path: Option<PathBuf>,
    /// None: status levels are only logged
    pub led_path: Option<PathBuf>,
    pub log_format: LogFormat,
    /// None: no file log
    pub log_dir: Option<PathBuf>,
}

impl DaemonConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(|value| PathBuf::from(shellexpand::tilde(value.trim()).into_owned()))
        };

        let log_format = match lookup("PINCRAWL_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            dictionary_path: path("PINCRAWL_DICTIONARY_PATH")
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARY_PATH)),
            ledger_path: path("PINCRAWL_LEDGER_PATH")
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH)),
            hidg_path: path("PINCRAWL_HIDG_PATH").unwrap_or_else(|| PathBuf::from(DEFAULT_HIDG_PATH)),
            udc_state_path: path("PINCRAWL_UDC_STATE_PATH"),
            led_path: path("PINCRAWL_LED_PATH"),
            log_format,
            log_dir: path("PINCRAWL_LOG_DIR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> DaemonConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DaemonConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);

        assert_eq!(config.dictionary_path, PathBuf::from("/mnt/sdcard/PIN4.TXT"));
        assert_eq!(config.ledger_path, PathBuf::from("/mnt/sdcard/pin.log"));
        assert_eq!(config.hidg_path, PathBuf::from("/dev/hidg0"));
        assert_eq!(config.udc_state_path, None);
        assert_eq!(config.led_path, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PINCRAWL_DICTIONARY_PATH", "/data/PIN6.TXT"),
            ("PINCRAWL_LEDGER_PATH", "/data/pin6.log"),
            ("PINCRAWL_HIDG_PATH", "/dev/hidg1"),
            ("PINCRAWL_UDC_STATE_PATH", "/sys/class/udc/fe980000.usb/state"),
            ("PINCRAWL_LED_PATH", "/sys/class/leds/led0/brightness"),
            ("PINCRAWL_LOG_FORMAT", "json"),
            ("PINCRAWL_LOG_DIR", "/data/logs"),
        ]);

        assert_eq!(config.dictionary_path, PathBuf::from("/data/PIN6.TXT"));
        assert_eq!(config.ledger_path, PathBuf::from("/data/pin6.log"));
        assert_eq!(config.hidg_path, PathBuf::from("/dev/hidg1"));
        assert_eq!(
            config.udc_state_path,
            Some(PathBuf::from("/sys/class/udc/fe980000.usb/state"))
        );
        assert_eq!(
            config.led_path,
            Some(PathBuf::from("/sys/class/leds/led0/brightness"))
        );
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_dir, Some(PathBuf::from("/data/logs")));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config(&[("PINCRAWL_LEDGER_PATH", "  "), ("PINCRAWL_LED_PATH", "")]);

        assert_eq!(config.ledger_path, PathBuf::from(DEFAULT_LEDGER_PATH));
        assert_eq!(config.led_path, None);
    }

    #[test]
    fn test_tilde_expansion() {
        let config = config(&[("PINCRAWL_LOG_DIR", "~/pincrawl-logs")]);

        let expected = shellexpand::tilde("~/pincrawl-logs").into_owned();
        assert_eq!(config.log_dir, Some(PathBuf::from(expected)));
    }

    #[test]
    fn test_unknown_log_format_is_pretty() {
        assert_eq!(config(&[("PINCRAWL_LOG_FORMAT", "xml")]).log_format, LogFormat::Pretty);
    }
}
