use thiserror::Error;

/// Construction-time failures.
///
/// Ordinary usage mistakes (operations before `init`, bad scene-mode labels,
/// empty geometry) degrade to logged no-ops instead; only a fundamentally
/// broken configuration surfaces as an error.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("mount point '{0}' not present on the shell surface")]
    MountPointMissing(String),

    #[error("engine construction failed: {0}")]
    Construction(String),
}
