//! Runtime configuration: backend endpoint from the environment, plus typed
//! defaults for tracking and map behavior.

use crate::surface::ZoomLimits;

pub const SUPABASE_URL_ENV: &str = "VOYAGETRACK_SUPABASE_URL";
pub const SUPABASE_KEY_ENV: &str = "VOYAGETRACK_SUPABASE_KEY";

/// Hosted backend endpoint. When either variable is missing the app runs in
/// demo mode against built-in sample data.
#[derive(Clone, Debug, Default)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl BackendConfig {
    pub fn from_env() -> Self {
        BackendConfig {
            base_url: std::env::var(SUPABASE_URL_ENV).ok().filter(|s| !s.is_empty()),
            api_key: std::env::var(SUPABASE_KEY_ENV).ok().filter(|s| !s.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }
}

/// Tracking and map tuning knobs, adjustable from the settings panel.
#[derive(Clone, Copy, Debug)]
pub struct TrackingConfig {
    /// Seconds between live-tracking position updates.
    pub tick_period_secs: f64,
    /// Per-axis bound on the simulated position offset, in degrees.
    pub jitter_max_deg: f64,
    /// Padding the viewport fitter keeps around the journey points.
    pub viewport_padding_px: u32,
    pub zoom_limits: ZoomLimits,
    /// Seconds between automatic shipment refreshes, 0 disables.
    pub refresh_interval_secs: f64,
}

impl TrackingConfig {
    pub fn new() -> Self {
        TrackingConfig {
            tick_period_secs: 15.0,
            jitter_max_deg: 0.005,
            viewport_padding_px: 32,
            zoom_limits: ZoomLimits { min: 1.0, max: 8.0 },
            refresh_interval_secs: 60.0,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_backend_means_demo_mode() {
        let cfg = BackendConfig::default();
        assert!(!cfg.is_configured());
        let partial = BackendConfig {
            base_url: Some("https://example.supabase.co".to_string()),
            api_key: None,
        };
        assert!(!partial.is_configured());
    }

    #[test]
    fn tracking_defaults_match_design() {
        let cfg = TrackingConfig::new();
        assert_eq!(cfg.tick_period_secs, 15.0);
        assert_eq!(cfg.jitter_max_deg, 0.005);
        assert!(cfg.zoom_limits.min < cfg.zoom_limits.max);
    }
}
