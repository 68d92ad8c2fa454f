//! Logging macros.

/// Evaluates the expression and returns its value. If logging is enabled at
/// the given level, the time the evaluation took is logged in microseconds
/// after the message.
///
/// ```ignore
/// let q = with_timing_logging!(Debug, "Normalizing {}", q; q.normalized());
/// ```
#[macro_export]
macro_rules! with_timing_logging {
    ($level:ident, $message:expr $(,$arg:expr)*; $expression:expr) => {{
        if $crate::log_enabled!($crate::Level::$level) {
            let start_time = ::std::time::Instant::now();
            let result = $expression;
            $crate::log!(
                $crate::Level::$level,
                concat!($message, " ({:.1} µs)")$(,$arg)*,
                start_time.elapsed().as_secs_f64() * 1e6
            );
            result
        } else {
            $expression
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn timed_expression_gives_its_value() {
        let value = with_timing_logging!(Debug, "Adding {} and {}", 2, 3; 2 + 3);
        assert_eq!(value, 5);
    }

    #[test]
    fn timed_block_is_evaluated_once() {
        let mut count = 0;
        with_timing_logging!(Trace, "Counting"; count += 1);
        assert_eq!(count, 1);
    }
}
