use std::collections::HashSet;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Every variable `AppConfig::load` reads.
pub const MEEUS_VARS: [&str; 6] = [
    "MEEUS_CONFIG",
    "MEEUS_HOST",
    "MEEUS_PORT",
    "MEEUS_LONGITUDE",
    "MEEUS_LATITUDE",
    "MEEUS_LOCATION_NAME",
];

/// Runs `f` with environment variables temporarily modified.
///
/// Every `MEEUS_*` variable not named in `changes` is cleared for the duration
/// so a developer's shell cannot leak into the test. Access is serialized and
/// the previous values are restored on unwind.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_meeus_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let named: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
    let mut all: Vec<(&str, Option<&str>)> = MEEUS_VARS
        .iter()
        .filter(|k| !named.contains(*k))
        .map(|k| (*k, None))
        .collect();
    all.extend_from_slice(changes);

    let _guard = ScopedEnv::new(&all);
    f()
}

struct ScopedEnv {
    previous: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let previous = changes
            .iter()
            .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { previous }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.previous.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
