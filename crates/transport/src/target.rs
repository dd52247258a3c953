use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::TransportError;

/// Remote destination split into its ssh endpoint and root path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteTarget {
    endpoint: String,
    root: PathBuf,
}

impl RemoteTarget {
    /// The `user@host` endpoint handed to `ssh` and `rsync`.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The remote root every mirrored path is mapped under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FromStr for RemoteTarget {
    type Err = TransportError;

    fn from_str(operand: &str) -> Result<Self, Self::Err> {
        let (endpoint, path) = operand
            .split_once(':')
            .ok_or_else(|| TransportError::InvalidTarget {
                operand: operand.to_owned(),
            })?;
        if endpoint.is_empty() {
            return Err(TransportError::InvalidTarget {
                operand: operand.to_owned(),
            });
        }
        if path.is_empty() {
            return Err(TransportError::MissingRemotePath {
                operand: operand.to_owned(),
            });
        }
        Ok(Self {
            endpoint: endpoint.to_owned(),
            root: PathBuf::from(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RemoteTarget;
    use crate::TransportError;

    #[test]
    fn splits_endpoint_and_path() {
        let target: RemoteTarget = "user@host:/srv/mirror".parse().unwrap();
        assert_eq!(target.endpoint(), "user@host");
        assert_eq!(target.root().to_str(), Some("/srv/mirror"));
    }

    #[test]
    fn relative_remote_paths_are_accepted() {
        let target: RemoteTarget = "user@host:mirror/src".parse().unwrap();
        assert_eq!(target.root().to_str(), Some("mirror/src"));
    }

    #[test]
    fn missing_colon_is_rejected() {
        let error = "user@host".parse::<RemoteTarget>().unwrap_err();
        assert!(matches!(error, TransportError::InvalidTarget { .. }));
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let error = ":/srv/mirror".parse::<RemoteTarget>().unwrap_err();
        assert!(matches!(error, TransportError::InvalidTarget { .. }));
    }

    #[test]
    fn empty_path_is_rejected() {
        let error = "user@host:".parse::<RemoteTarget>().unwrap_err();
        assert!(matches!(error, TransportError::MissingRemotePath { .. }));
    }
}
