// DOM hooks and drawing constants for the browser dashboards

// Mount points
pub const SCENARIO_ATTR: &str = "data-story-scenario";
pub const CORRIDOR_ATTR: &str = "data-corridor-console";

// Class names toggled on the dashboard root
pub const CLASS_OFFLINE: &str = "is-offline";
pub const CLASS_ALERT: &str = "is-alert";

// Corridor console
pub const CLASS_COMMUNITY: &str = "is-community";
pub const CLASS_VISIBLE: &str = "is-visible";
pub const LEDGER_OVERLAY_TEXT: &str = "CERTIFICANDO PROTOCOLOS DE TRÁNSITO SEGURO · \
    Validando geocercas, velocidad en pueblos y temperatura de carga.";

// Route drawing (in view units, scaled with the canvas)
pub const ROUTE_LINE_WIDTH: f64 = 4.0;
pub const ROUTE_DASH: [f64; 2] = [10.0, 8.0];
pub const MARKER_SIZE: f64 = 14.0;
pub const ZONE_LINE_WIDTH: f64 = 10.0;

// Palette
pub const COLOR_BACKGROUND: &str = "#020617";
pub const COLOR_ROUTE: &str = "#334155";
pub const COLOR_TRAVELLED: &str = "#38bdf8";
pub const COLOR_ZONE: &str = "rgba(248, 113, 113, 0.25)";
pub const COLOR_MARKER: &str = "#f8fafc";
pub const COLOR_MARKER_ALERT: &str = "#f87171";

// Operator log
pub const LOG_INPUT_MAX_CHARS: u32 = 140;
