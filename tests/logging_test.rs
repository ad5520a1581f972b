use rask_log_adapter::app::{DiagnosticsConfig, DiagnosticsFormat, LoggingError, init_diagnostics};
use tracing::{info, warn};

// Installs the process-wide subscriber, so it lives in its own test binary
// and stays the only test here.
#[test]
fn test_init_diagnostics_installs_once() {
    let config = DiagnosticsConfig {
        format: DiagnosticsFormat::Json,
        ..DiagnosticsConfig::default()
    };

    init_diagnostics(&config).unwrap();
    info!("diagnostics installed");
    warn!("diagnostics go to stderr");

    let second = init_diagnostics(&config).unwrap_err();
    assert!(matches!(second, LoggingError::AlreadyInitialized(_)));
}
