//! crates/levels/src/macros.rs
//! Convenience macros for stamping formatted messages.
//!
//! These macros wrap the thread-local stamping functions with format-args
//! support so call sites read like the standard logging macros.

/// Stamp a message at the highest level (a top-level phase).
///
/// # Example
/// ```ignore
/// high_level_step!("running suite {}", name);
/// ```
#[macro_export]
macro_rules! high_level_step {
    ($($arg:tt)*) => {
        $crate::thread_local::high_level_step(::std::format!($($arg)*))
    };
}

/// Stamp a message at the second highest level (a sub-step).
///
/// # Example
/// ```ignore
/// detail_step!("checking {}", precondition);
/// ```
#[macro_export]
macro_rules! detail_step {
    ($($arg:tt)*) => {
        $crate::thread_local::detail_step(::std::format!($($arg)*))
    };
}

/// Stamp a message at an explicit level, or repeat the previous level when no
/// level is given.
///
/// # Example
/// ```ignore
/// step!(level: 3, "verifying {}", target);
/// step!("still verifying {}", target);
/// ```
#[macro_export]
macro_rules! step {
    (level: $level:expr, $($arg:tt)*) => {
        $crate::thread_local::step(::std::format!($($arg)*), ::std::option::Option::Some($level))
    };
    ($($arg:tt)*) => {
        $crate::thread_local::step(::std::format!($($arg)*), ::std::option::Option::None)
    };
}

/// Move the current level by one and stamp the message at the new level.
///
/// # Example
/// ```ignore
/// step_increment!("drilling into {}", detail);
/// ```
#[macro_export]
macro_rules! step_increment {
    ($($arg:tt)*) => {
        $crate::thread_local::step_increment(::std::format!($($arg)*), 1)
    };
}
