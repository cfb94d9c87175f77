use std::time::Duration;

/// Retry settings for probing the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first try.
    pub max_attempts: usize,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            delay: Duration::from_millis(250),
        }
    }
}

/// Retry an operation with a fixed pause while the predicate allows it.
///
/// Returns the last error once the attempts are used up.
pub fn retry_fixed<T, E, F, R>(config: RetryConfig, mut action: F, mut should_retry: R) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    R: FnMut(&E) -> bool,
{
    let mut attempt = 0usize;
    loop {
        attempt += 1;
        match action() {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= config.max_attempts.max(1) || !should_retry(&err) {
                    return Err(err);
                }
                std::thread::sleep(config.delay);
            }
        }
    }
}
