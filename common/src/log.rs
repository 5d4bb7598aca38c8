/// Target used for positive outcomes, so front-ends can render them differently from plain info.
pub const SUCCESS_TARGET: &str = "pingsweep::success";

/// Logs a positive outcome at `INFO` level under [`SUCCESS_TARGET`].
#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        ::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)+)
    };
}
