/// Evaluates the block, logging how long it took at `debug` level under the
/// given label.
#[doc(hidden)]
#[macro_export]
macro_rules! time {
    ($label:expr, $($token:tt)*) => ({
        let start = std::time::Instant::now();
        let value = { $($token)* };
        $crate::log::debug!("{} took {}ms", $label, start.elapsed().as_millis());
        value
    });
}

pub use time;
