//! One-shot server initialization.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::DevConfig;
use crate::error::Error;
use crate::http::DevServer;

/// Process-wide mount slot. Never cleared once a mount succeeds.
static MOUNTED: AtomicBool = AtomicBool::new(false);

/// Attach the dev server to the process exactly once.
///
/// A second call fails fast with [`Error::AlreadyMounted`] instead of
/// silently replacing the running server. Construction failures release
/// the slot, since nothing was attached.
///
/// Embedders and tests that need several servers in one process should
/// use [`DevServer::new`] directly.
pub fn mount(config: DevConfig) -> Result<DevServer, Error> {
    if MOUNTED.swap(true, Ordering::SeqCst) {
        return Err(Error::AlreadyMounted);
    }

    let server = match DevServer::new(config) {
        Ok(server) => server,
        Err(error) => {
            MOUNTED.store(false, Ordering::SeqCst);
            return Err(error);
        }
    };

    // Overlapping prefixes are legal but order-sensitive; say so once at
    // startup instead of resolving it silently.
    let rules = server.routes().rules();
    for (earlier, later) in server.routes().shadowed() {
        tracing::warn!(
            shadowing = %rules[earlier].path_prefix,
            unreachable = %rules[later].path_prefix,
            "route is declared after a broader prefix and will never match"
        );
    }

    let covered = server.scan().walk(&server.config().content.root);
    tracing::debug!(
        patterns = server.scan().patterns().len(),
        files = covered.len(),
        "content scan configured"
    );

    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test for the mount slot: the guard is process-global, so
    // splitting this into several tests would make them order-dependent.
    #[test]
    fn second_mount_fails_fast() {
        let first = mount(DevConfig::default());
        assert!(first.is_ok());

        let second = mount(DevConfig::default());
        assert!(matches!(second, Err(Error::AlreadyMounted)));
    }
}
