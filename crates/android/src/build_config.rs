//! Resolved build configuration
//!
//! A [`BuildConfig`] is produced once per build invocation by the
//! [`ConfigResolver`](crate::resolver::ConfigResolver) and is read-only from
//! then on: fields are private and only exposed through accessors.

use crate::signing::{self, SigningCredentials};
use crate::variant::BuildVariant;
use buildvar_core::properties::PropertySource;
use serde::Serialize;

/// Property keys understood by the resolver
pub mod keys {
    /// Application (package) identifier
    pub const APPLICATION_ID: &str = "applicationId";
    /// Code namespace, defaults to the application id
    pub const NAMESPACE: &str = "namespace";
    /// Minimum supported SDK level
    pub const MIN_SDK: &str = "minSdk";
    /// Target SDK level
    pub const TARGET_SDK: &str = "targetSdk";
    /// SDK level compiled against
    pub const COMPILE_SDK: &str = "compileSdk";
    /// Monotonic integer version
    pub const VERSION_CODE: &str = "versionCode";
    /// User-visible version string
    pub const VERSION_NAME: &str = "versionName";
    /// NDK version, passed through
    pub const NDK_VERSION: &str = "ndkVersion";
    /// Java source/target compatibility level
    pub const JVM_TARGET: &str = "jvmTarget";
}

/// JVM target used when nothing overrides it
pub const DEFAULT_JVM_TARGET: &str = "11";

/// Signing entry for every build variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningMap {
    debug: SigningCredentials,
    release: SigningCredentials,
}

impl SigningMap {
    pub(crate) fn new(debug: SigningCredentials, release: SigningCredentials) -> Self {
        Self { debug, release }
    }

    /// Credentials for `variant`
    pub fn get(&self, variant: BuildVariant) -> &SigningCredentials {
        match variant {
            BuildVariant::Debug => &self.debug,
            BuildVariant::Release => &self.release,
        }
    }

    /// Entries in variant order
    pub fn iter(&self) -> impl Iterator<Item = (BuildVariant, &SigningCredentials)> {
        BuildVariant::ALL.into_iter().map(move |v| (v, self.get(v)))
    }
}

/// Fully resolved, immutable set of build parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    application_id: String,
    namespace: String,
    min_sdk: u32,
    target_sdk: u32,
    compile_sdk: u32,
    version_code: u32,
    version_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ndk_version: Option<String>,
    jvm_target: String,
    signing: SigningMap,
    release_signing_fallback: bool,
}

/// Field values for [`BuildConfig`], assembled by the resolver
pub(crate) struct BuildConfigParts {
    pub application_id: String,
    pub namespace: String,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub compile_sdk: u32,
    pub version_code: u32,
    pub version_name: String,
    pub ndk_version: Option<String>,
    pub jvm_target: String,
    pub signing: SigningMap,
    pub release_signing_fallback: bool,
}

impl From<BuildConfigParts> for BuildConfig {
    fn from(parts: BuildConfigParts) -> Self {
        Self {
            application_id: parts.application_id,
            namespace: parts.namespace,
            min_sdk: parts.min_sdk,
            target_sdk: parts.target_sdk,
            compile_sdk: parts.compile_sdk,
            version_code: parts.version_code,
            version_name: parts.version_name,
            ndk_version: parts.ndk_version,
            jvm_target: parts.jvm_target,
            signing: parts.signing,
            release_signing_fallback: parts.release_signing_fallback,
        }
    }
}

impl BuildConfig {
    /// Application identifier
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Code namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Minimum SDK level
    pub fn min_sdk(&self) -> u32 {
        self.min_sdk
    }

    /// Target SDK level
    pub fn target_sdk(&self) -> u32 {
        self.target_sdk
    }

    /// Compile SDK level
    pub fn compile_sdk(&self) -> u32 {
        self.compile_sdk
    }

    /// Version code
    pub fn version_code(&self) -> u32 {
        self.version_code
    }

    /// Version name
    pub fn version_name(&self) -> &str {
        &self.version_name
    }

    /// NDK version, if one was configured
    pub fn ndk_version(&self) -> Option<&str> {
        self.ndk_version.as_deref()
    }

    /// Java compatibility level
    pub fn jvm_target(&self) -> &str {
        &self.jvm_target
    }

    /// Signing entries for all variants
    pub fn signing_map(&self) -> &SigningMap {
        &self.signing
    }

    /// Signing credentials for one variant
    pub fn signing(&self, variant: BuildVariant) -> &SigningCredentials {
        self.signing.get(variant)
    }

    /// True when release builds are signed with the debug keystore
    pub fn release_signing_fallback(&self) -> bool {
        self.release_signing_fallback
    }

    /// Express this configuration as a single property source.
    ///
    /// Release signing keys are only emitted when release has real
    /// credentials, so resolving the result against the same defaults
    /// reproduces this configuration.
    pub fn to_property_source(&self) -> PropertySource {
        let mut source = PropertySource::new().with_origin("<resolved>");
        source.insert(keys::APPLICATION_ID, self.application_id.as_str());
        source.insert(keys::NAMESPACE, self.namespace.as_str());
        source.insert(keys::MIN_SDK, self.min_sdk.to_string());
        source.insert(keys::TARGET_SDK, self.target_sdk.to_string());
        source.insert(keys::COMPILE_SDK, self.compile_sdk.to_string());
        source.insert(keys::VERSION_CODE, self.version_code.to_string());
        source.insert(keys::VERSION_NAME, self.version_name.as_str());
        if let Some(ndk) = &self.ndk_version {
            source.insert(keys::NDK_VERSION, ndk.as_str());
        }
        source.insert(keys::JVM_TARGET, self.jvm_target.as_str());

        if !self.release_signing_fallback {
            let release = self.signing(BuildVariant::Release);
            for key in signing::SIGNING_KEYS {
                if let Some(value) = release.get(key) {
                    source.insert(key, value);
                }
            }
        }

        source
    }
}
