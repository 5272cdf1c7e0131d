// kubectl configuration (environment driven)

/// kubectl binary override
pub const ENV_KUBECTL: &str = "QDPROBE_KUBECTL";
/// Namespace of the router pods
pub const ENV_NAMESPACE: &str = "QDPROBE_NAMESPACE";
/// Container running qdrouterd (multi-container pods)
pub const ENV_CONTAINER: &str = "QDPROBE_CONTAINER";
/// kubectl context
pub const ENV_CONTEXT: &str = "QDPROBE_CONTEXT";
/// Standard kubeconfig location variable
pub const ENV_KUBECONFIG: &str = "KUBECONFIG";

const DEFAULT_KUBECTL: &str = "kubectl";

/// Where and how `kubectl exec` runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubectlConfig {
    pub kubectl: String,
    pub namespace: Option<String>,
    pub container: Option<String>,
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
}

impl Default for KubectlConfig {
    fn default() -> Self {
        Self {
            kubectl: DEFAULT_KUBECTL.to_string(),
            namespace: None,
            container: None,
            kubeconfig: None,
            context: None,
        }
    }
}

impl KubectlConfig {
    /// Load from `QDPROBE_*` / `KUBECONFIG` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            kubectl: non_empty(ENV_KUBECTL).unwrap_or_else(|| DEFAULT_KUBECTL.to_string()),
            namespace: non_empty(ENV_NAMESPACE),
            container: non_empty(ENV_CONTAINER),
            kubeconfig: non_empty(ENV_KUBECONFIG).map(|p| expand_path(&p)),
            context: non_empty(ENV_CONTEXT),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_kubeconfig(mut self, path: &str) -> Self {
        self.kubeconfig = Some(expand_path(path));
        self
    }
}

/// `~/.kube/config` -> `/home/<user>/.kube/config`
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}
