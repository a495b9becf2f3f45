/// Snapshots the live config: picks up external edits, then hands back an
/// owned copy so no lock is held across the caller's awaits.
macro_rules! config {
    ($data:expr) => {{
        let mut config = $data.config.write().await;
        config.update();
        config.downgrade().clone()
    }};
}

pub(crate) use config;
