use env_logger::{Builder, Env, Target};

/// Initialize the logger. `RUST_LOG` overrides the default `info` level.
///
/// Calling it again is harmless; only the first call installs the logger.
pub fn init() {
    let result = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init();
    if let Err(e) = result {
        log::trace!("logger already installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init();
        init();
        log::info!("still logging");
    }
}
