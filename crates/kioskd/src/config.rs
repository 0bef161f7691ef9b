use std::path::PathBuf;

/// Which message bus the daemon registers on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusKind {
    Session,
    System,
}

/// Daemon configuration, loaded from environment variables.
pub struct Config {
    /// Catalog TOML file; the embedded sample catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
    /// Message bus to connect to (default: session).
    pub bus: BusKind,
    /// Well-known bus name to request.
    pub bus_name: String,
    /// Capacity of the request queue in front of the store thread.
    pub request_queue: usize,
}

impl Config {
    /// Load configuration from `KIOSK_*` environment variables with defaults.
    pub fn from_env() -> Self {
        let bus = parse_bus(std::env::var("KIOSK_BUS").ok().as_deref());

        Self {
            catalog_path: std::env::var("KIOSK_CATALOG_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            bus,
            bus_name: std::env::var("KIOSK_BUS_NAME")
                .unwrap_or_else(|_| crate::dbus_interface::BUS_NAME.to_string()),
            request_queue: env_usize("KIOSK_REQUEST_QUEUE", 16).max(1),
        }
    }
}

/// `KIOSK_BUS=system` selects the system bus; anything else is the session bus.
fn parse_bus(value: Option<&str>) -> BusKind {
    match value {
        Some("system") => BusKind::System,
        _ => BusKind::Session,
    }
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
