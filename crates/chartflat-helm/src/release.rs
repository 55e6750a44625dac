//! Install configuration and its result

/// Settings for a simulated install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    /// Release name
    pub release_name: String,

    /// Target namespace
    pub namespace: String,

    /// Render only, never apply
    pub dry_run: bool,

    /// Render the chart's crds/ directory too
    pub include_crds: bool,

    /// Do not contact a cluster
    pub client_only: bool,

    /// Kubernetes version to render against (renderer default when `None`)
    pub kube_version: Option<String>,
}

impl InstallConfig {
    pub const DEFAULT_NAMESPACE: &'static str = "default";

    /// Client-only dry run into the default namespace, CRDs included
    pub fn dry_run(release_name: impl Into<String>) -> Self {
        Self {
            release_name: release_name.into(),
            namespace: Self::DEFAULT_NAMESPACE.to_string(),
            dry_run: true,
            include_crds: true,
            client_only: true,
            kube_version: None,
        }
    }

    /// Set the Kubernetes version to render against
    pub fn with_kube_version(mut self, kube_version: Option<String>) -> Self {
        self.kube_version = kube_version;
        self
    }
}

/// Outcome of a simulated install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    pub namespace: String,
    /// Rendered manifest text, hooks excluded
    pub manifest: String,
}
