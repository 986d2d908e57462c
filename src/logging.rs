//! Logging facade for the router.
//!
//! Matching and navigation code logs through the macros below instead of
//! naming a backend directly. The backend is picked by feature flag:
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! Enable at most one of them. With neither enabled the macros expand to
//! nothing and the arguments are not evaluated.
//!
//! | Macro        | Used for                                        |
//! |--------------|-------------------------------------------------|
//! | `trace_log!` | per-pattern matching and tree walk detail       |
//! | `debug_log!` | navigation phases and URL match results         |
//! | `info_log!`  | URLs opened as routes                           |
//! | `warn_log!`  | errors that reached the unhandled sink          |
//! | `error_log!` | unused by the router; for toolkit integrations  |
//!
//! ```ignore
//! use route_navigator::{debug_log, warn_log};
//!
//! debug_log!("Resolved destination {:?} for route '{}'", node, route.name());
//! warn_log!("Unhandled navigation error: {}", err);
//! ```

/// Forward a message to the enabled backend's macro of the same level.
#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    };
}

/// Emit a **trace**-level log message.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(trace, $($arg)*)
    };
}

/// Emit a **debug**-level log message.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(debug, $($arg)*)
    };
}

/// Emit an **info**-level log message.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(info, $($arg)*)
    };
}

/// Emit a **warn**-level log message.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(warn, $($arg)*)
    };
}

/// Emit an **error**-level log message.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(error, $($arg)*)
    };
}
