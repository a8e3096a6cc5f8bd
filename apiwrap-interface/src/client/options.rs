use std::path::PathBuf;
use std::time::Duration;

/// Timeout applied when a client is built without one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// A request timeout. `None` waits indefinitely.
pub type Timeout = Option<Duration>;

/// TLS certificate verification policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Verify {
    /// Verify against the platform roots.
    #[default]
    Enabled,
    /// Accept any certificate.
    Disabled,
    /// Verify against the PEM bundle at this path.
    CaBundle(PathBuf),
}

impl From<bool> for Verify {
    fn from(verify: bool) -> Self {
        if verify {
            Verify::Enabled
        } else {
            Verify::Disabled
        }
    }
}

/// Client certificate presented during the TLS handshake.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClientCert {
    /// A single PEM file holding both certificate and private key.
    Pem(PathBuf),
    /// Separate certificate and private key PEM files.
    Pair {
        /// Certificate chain.
        cert: PathBuf,
        /// Private key.
        key: PathBuf,
    },
}

/// A per-call override that is either absent or carries a value.
///
/// `Override::Value(None)` and `Override::NoValue` differ for optional settings:
/// the former disables the setting, the latter keeps the client's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Override<T> {
    /// Use the client's default.
    #[default]
    NoValue,
    /// Use this value.
    Value(T),
}

impl<T> Override<T> {
    /// Returns the override value, or `default` when absent.
    pub fn resolve(self, default: T) -> T {
        match self {
            Override::NoValue => default,
            Override::Value(value) => value,
        }
    }

    /// Whether no value was given.
    pub fn is_no_value(&self) -> bool {
        matches!(self, Override::NoValue)
    }

    /// Converts from `&Override<T>` to `Override<&T>`.
    pub fn as_ref(&self) -> Override<&T> {
        match self {
            Override::NoValue => Override::NoValue,
            Override::Value(value) => Override::Value(value),
        }
    }
}

impl<T> From<T> for Override<T> {
    fn from(value: T) -> Self {
        Override::Value(value)
    }
}

/// Fully resolved transport options handed to a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Time allowed for the whole exchange.
    pub timeout: Timeout,
    /// Certificate verification policy.
    pub verify: Verify,
    /// Client certificate, if any.
    pub cert: Option<ClientCert>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            verify: Verify::Enabled,
            cert: None,
        }
    }
}

/// Per-call overrides of a client's [`RequestOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Timeout override.
    pub timeout: Override<Timeout>,
    /// Verification override.
    pub verify: Override<Verify>,
    /// Client certificate override.
    pub cert: Override<Option<ClientCert>>,
}

impl FetchOptions {
    /// Merges these overrides over `defaults`.
    pub fn resolve(&self, defaults: &RequestOptions) -> RequestOptions {
        RequestOptions {
            timeout: self.timeout.resolve(defaults.timeout),
            verify: self.verify.as_ref().resolve(&defaults.verify).clone(),
            cert: self.cert.as_ref().resolve(&defaults.cert).clone(),
        }
    }
}
