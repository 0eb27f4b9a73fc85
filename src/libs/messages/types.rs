/// Every user-facing and log-facing message the application emits.
///
/// Text lives in `display.rs`; call sites only pick a variant and pass its
/// parameters, so wording stays in one place.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String), // path
    ConfigLoaded,
    ConfigParseError(String),
    ConfigExists(String), // path

    // === SCREEN MESSAGES ===
    ScreenStateLoaded(bool),
    ScreenStateMissing(String),    // path
    ScreenStateUnreadable(String), // error
    ScreenTurningOn,
    ScreenTurningOff,
    ScreenToggled(bool),

    // === ACTIVITY MESSAGES ===
    MotionDetected,
    InactivityDetected,

    // === EVENT STORE MESSAGES ===
    SavingEvent(String), // row description
    EventSaveFailed(String),
    EventDropped(String),
    NoEventsRecorded,
    EventRow {
        created_at: String,
        event: String,
        seconds: f64,
        name: String,
    },

    // === GPIO MESSAGES ===
    GpioExported(u32), // pin
    GpioSetupFailed(String),
    GpioCleanupFailed(String),
    EdgeWatcherFailed(String),

    // === WATCHER MESSAGES ===
    WatcherStarting { screen: bool },
    WatcherReady,
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String),
    WatcherSignalHandlingNotSupported,
    WatcherCleaningUp,
    WatcherExitedNormally,
    WatcherShuttingDown,
    WatcherError(String),
    WatcherTaskPanicked(String),

    // === ERROR MESSAGES ===
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,
    PlatformNotSupported,
}
