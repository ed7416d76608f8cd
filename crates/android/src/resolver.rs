//! Build-variant configuration resolver
//!
//! Resolves a [`BuildConfig`] from layered, optionally-absent property
//! sources on top of [`BuildDefaults`]:
//!
//! 1. Seed an accumulator from the defaults.
//! 2. Overlay every present source in order; later layers win, absent
//!    layers are skipped. Blank values count as absent.
//! 3. Resolve signing: complete release credentials are used as-is, partial
//!    ones are rejected, and no credentials at all makes `release` alias the
//!    `debug` entry.
//! 4. Validate required fields, identifiers and SDK ordering.
//!
//! Resolution performs no I/O; callers load the sources.
//!
//! # Example
//!
//! ```rust
//! use buildvar_android::defaults::BuildDefaults;
//! use buildvar_android::resolver::resolve;
//! use buildvar_android::variant::BuildVariant;
//! use buildvar_core::properties::PropertySource;
//!
//! let defaults = BuildDefaults {
//!     min_sdk: Some(21),
//!     target_sdk: Some(33),
//!     compile_sdk: Some(33),
//!     version_code: Some(1),
//!     version_name: Some("1.0".into()),
//!     ..BuildDefaults::default()
//! };
//! let local = PropertySource::from_pairs([("applicationId", "com.example.app")]);
//! let key_properties = None; // android/key.properties is not checked in
//!
//! let config = resolve(&[Some(local), key_properties], &defaults).unwrap();
//! assert_eq!(config.application_id(), "com.example.app");
//! assert_eq!(
//!     config.signing(BuildVariant::Release),
//!     config.signing(BuildVariant::Debug)
//! );
//! ```

use crate::build_config::{keys, BuildConfig, BuildConfigParts, SigningMap, DEFAULT_JVM_TARGET};
use crate::defaults::BuildDefaults;
use crate::error::{ConfigError, Result};
use crate::signing::{self, SigningCredentials};
use buildvar_core::properties::PropertySource;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Keys the cross-platform toolkit writes into `local.properties`
pub mod toolkit_keys {
    /// Alias of `minSdk`
    pub const MIN_SDK: &str = "flutter.minSdkVersion";
    /// Alias of `targetSdk`
    pub const TARGET_SDK: &str = "flutter.targetSdkVersion";
    /// Alias of `compileSdk`
    pub const COMPILE_SDK: &str = "flutter.compileSdkVersion";
    /// Alias of `versionCode`
    pub const VERSION_CODE: &str = "flutter.versionCode";
    /// Alias of `versionName`
    pub const VERSION_NAME: &str = "flutter.versionName";
    /// Alias of `ndkVersion`
    pub const NDK_VERSION: &str = "flutter.ndkVersion";
}

/// Reverse-domain name: two or more segments, each starting with a letter
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap());

/// A configurable field, after alias normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Field {
    ApplicationId,
    Namespace,
    MinSdk,
    TargetSdk,
    CompileSdk,
    VersionCode,
    VersionName,
    NdkVersion,
    JvmTarget,
    Signing(&'static str),
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        let field = match key {
            keys::APPLICATION_ID => Field::ApplicationId,
            keys::NAMESPACE => Field::Namespace,
            keys::MIN_SDK | toolkit_keys::MIN_SDK => Field::MinSdk,
            keys::TARGET_SDK | toolkit_keys::TARGET_SDK => Field::TargetSdk,
            keys::COMPILE_SDK | toolkit_keys::COMPILE_SDK => Field::CompileSdk,
            keys::VERSION_CODE | toolkit_keys::VERSION_CODE => Field::VersionCode,
            keys::VERSION_NAME | toolkit_keys::VERSION_NAME => Field::VersionName,
            keys::NDK_VERSION | toolkit_keys::NDK_VERSION => Field::NdkVersion,
            keys::JVM_TARGET => Field::JvmTarget,
            signing::STORE_FILE => Field::Signing(signing::STORE_FILE),
            signing::STORE_PASSWORD => Field::Signing(signing::STORE_PASSWORD),
            signing::KEY_ALIAS => Field::Signing(signing::KEY_ALIAS),
            signing::KEY_PASSWORD => Field::Signing(signing::KEY_PASSWORD),
            _ => return None,
        };
        Some(field)
    }

    fn key(self) -> &'static str {
        match self {
            Field::ApplicationId => keys::APPLICATION_ID,
            Field::Namespace => keys::NAMESPACE,
            Field::MinSdk => keys::MIN_SDK,
            Field::TargetSdk => keys::TARGET_SDK,
            Field::CompileSdk => keys::COMPILE_SDK,
            Field::VersionCode => keys::VERSION_CODE,
            Field::VersionName => keys::VERSION_NAME,
            Field::NdkVersion => keys::NDK_VERSION,
            Field::JvmTarget => keys::JVM_TARGET,
            Field::Signing(key) => key,
        }
    }
}

/// Merged view of defaults plus every applied layer
#[derive(Debug, Default)]
struct Layered {
    values: BTreeMap<Field, String>,
}

impl Layered {
    fn seeded(defaults: &BuildDefaults) -> Self {
        let mut layered = Self::default();
        let seeds = [
            (Field::ApplicationId, defaults.application_id.clone()),
            (Field::Namespace, defaults.namespace.clone()),
            (Field::MinSdk, defaults.min_sdk.map(|v| v.to_string())),
            (Field::TargetSdk, defaults.target_sdk.map(|v| v.to_string())),
            (Field::CompileSdk, defaults.compile_sdk.map(|v| v.to_string())),
            (Field::VersionCode, defaults.version_code.map(|v| v.to_string())),
            (Field::VersionName, defaults.version_name.clone()),
            (Field::NdkVersion, defaults.ndk_version.clone()),
            (Field::JvmTarget, defaults.jvm_target.clone()),
        ];
        for (field, value) in seeds {
            if let Some(value) = value {
                layered.set(field, &value);
            }
        }
        layered
    }

    /// Returns whether the value was applied
    fn set(&mut self, field: Field, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        self.values.insert(field, value.to_string());
        true
    }

    fn overlay(&mut self, source: &PropertySource) -> usize {
        let mut applied = 0;
        for (key, value) in source.entries() {
            match Field::from_key(key) {
                Some(field) => {
                    if self.set(field, value) {
                        applied += 1;
                    }
                }
                None => tracing::trace!(origin = source.origin(), key, "Ignoring unrecognized key"),
            }
        }
        applied
    }

    fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    fn required(&self, field: Field) -> Result<&str> {
        self.get(field)
            .ok_or_else(|| ConfigError::MissingRequiredField(field.key().to_string()))
    }

    fn required_u32(&self, field: Field) -> Result<u32> {
        let raw = self.required(field)?;
        raw.trim().parse().map_err(|_| {
            tracing::debug!(field = field.key(), value = raw, "Value is not a non-negative integer");
            ConfigError::MissingRequiredField(field.key().to_string())
        })
    }

    fn signing(&self) -> SigningCredentials {
        let mut creds = SigningCredentials::default();
        for key in signing::SIGNING_KEYS {
            if let Some(value) = self.get(Field::Signing(key)) {
                creds.set(key, value.to_string());
            }
        }
        creds
    }
}

/// Resolves build configurations
///
/// Holds no state besides the stock debug credentials, so one resolver can
/// be shared across threads.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    debug_signing: SigningCredentials,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Resolver using the stock Android debug keystore
    pub fn new() -> Self {
        Self {
            debug_signing: SigningCredentials::debug_default(),
        }
    }

    /// Use different debug credentials when the defaults do not name any
    pub fn with_debug_signing(mut self, credentials: SigningCredentials) -> Self {
        self.debug_signing = credentials;
        self
    }

    /// Resolve `sources` (lowest precedence first) on top of `defaults`
    pub fn resolve(
        &self,
        sources: &[Option<PropertySource>],
        defaults: &BuildDefaults,
    ) -> Result<BuildConfig> {
        let mut merged = Layered::seeded(defaults);

        for (index, source) in sources.iter().enumerate() {
            match source {
                Some(source) => {
                    let applied = merged.overlay(source);
                    tracing::debug!(index, origin = source.origin(), applied, "Applied property source");
                }
                None => tracing::debug!(index, "Skipping absent property source"),
            }
        }

        let debug = self.debug_credentials(defaults)?;
        let (release, release_signing_fallback) = resolve_release_signing(&merged, &debug)?;

        let application_id = merged.required(Field::ApplicationId)?.to_string();
        let min_sdk = merged.required_u32(Field::MinSdk)?;
        let target_sdk = merged.required_u32(Field::TargetSdk)?;
        let compile_sdk = merged.required_u32(Field::CompileSdk)?;
        let version_code = merged.required_u32(Field::VersionCode)?;
        let version_name = merged.required(Field::VersionName)?.to_string();

        let namespace = merged
            .get(Field::Namespace)
            .map_or_else(|| application_id.clone(), String::from);
        let ndk_version = merged.get(Field::NdkVersion).map(String::from);
        let jvm_target = merged
            .get(Field::JvmTarget)
            .unwrap_or(DEFAULT_JVM_TARGET)
            .to_string();

        validate_identifier(keys::APPLICATION_ID, &application_id)?;
        validate_identifier(keys::NAMESPACE, &namespace)?;
        validate_sdk_order(min_sdk, target_sdk, compile_sdk)?;

        tracing::info!(
            application_id = %application_id,
            version_code,
            version_name = %version_name,
            release_signing_fallback,
            "Resolved build configuration"
        );

        Ok(BuildConfigParts {
            application_id,
            namespace,
            min_sdk,
            target_sdk,
            compile_sdk,
            version_code,
            version_name,
            ndk_version,
            jvm_target,
            signing: SigningMap::new(debug, release),
            release_signing_fallback,
        }
        .into())
    }

    fn debug_credentials(&self, defaults: &BuildDefaults) -> Result<SigningCredentials> {
        let debug = defaults
            .debug_signing
            .clone()
            .unwrap_or_else(|| self.debug_signing.clone());

        if debug.is_complete() {
            Ok(debug)
        } else {
            Err(incomplete(&debug))
        }
    }
}

/// Resolve with a default [`ConfigResolver`]
pub fn resolve(sources: &[Option<PropertySource>], defaults: &BuildDefaults) -> Result<BuildConfig> {
    ConfigResolver::default().resolve(sources, defaults)
}

fn resolve_release_signing(
    merged: &Layered,
    debug: &SigningCredentials,
) -> Result<(SigningCredentials, bool)> {
    let release = merged.signing();

    if release.is_empty() {
        tracing::warn!(
            "No release signing credentials supplied; release builds will be signed with the debug keystore"
        );
        return Ok((debug.clone(), true));
    }

    if release.is_complete() {
        Ok((release, false))
    } else {
        Err(incomplete(&release))
    }
}

fn incomplete(creds: &SigningCredentials) -> ConfigError {
    ConfigError::IncompleteSigningCredentials {
        missing: creds.missing_keys().into_iter().map(String::from).collect(),
    }
}

fn validate_identifier(field: &str, value: &str) -> Result<()> {
    if IDENTIFIER.is_match(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

fn validate_sdk_order(min_sdk: u32, target_sdk: u32, compile_sdk: u32) -> Result<()> {
    if min_sdk <= target_sdk && target_sdk <= compile_sdk {
        Ok(())
    } else {
        Err(ConfigError::SdkVersionOrder {
            min_sdk,
            target_sdk,
            compile_sdk,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::BuildVariant;
    use proptest::prelude::*;

    fn defaults() -> BuildDefaults {
        BuildDefaults {
            min_sdk: Some(21),
            target_sdk: Some(33),
            compile_sdk: Some(33),
            version_code: Some(1),
            version_name: Some("1.0".into()),
            ..BuildDefaults::default()
        }
    }

    fn app_source(id: &str) -> Option<PropertySource> {
        Some(PropertySource::from_pairs([(keys::APPLICATION_ID, id)]))
    }

    fn release_source() -> PropertySource {
        PropertySource::from_pairs([
            (signing::STORE_FILE, "/keys/upload.jks"),
            (signing::STORE_PASSWORD, "store-secret"),
            (signing::KEY_ALIAS, "upload"),
            (signing::KEY_PASSWORD, "key-secret"),
        ])
    }

    #[test]
    fn test_layered_overrides() {
        let sources = [
            app_source("com.example.app"),
            Some(PropertySource::from_pairs([(keys::VERSION_CODE, "4")])),
        ];

        let config = resolve(&sources, &defaults()).unwrap();

        assert_eq!(config.application_id(), "com.example.app");
        assert_eq!(config.version_code(), 4);
        assert_eq!(config.min_sdk(), 21);
        assert_eq!(config.target_sdk(), 33);
        assert_eq!(config.compile_sdk(), 33);
        assert_eq!(config.version_name(), "1.0");
        assert_eq!(config.namespace(), "com.example.app");
        assert_eq!(config.jvm_target(), "11");
        assert_eq!(config.ndk_version(), None);
    }

    #[test]
    fn test_later_source_wins() {
        let sources = [
            app_source("com.example.first"),
            None,
            app_source("com.example.second"),
        ];

        let config = resolve(&sources, &defaults()).unwrap();
        assert_eq!(config.application_id(), "com.example.second");
    }

    #[test]
    fn test_absent_sources_are_skipped() {
        let sources = [None, app_source("com.example.app"), None];
        assert!(resolve(&sources, &defaults()).is_ok());
    }

    #[test]
    fn test_no_signing_falls_back_to_debug() {
        let config = resolve(&[app_source("com.example.app")], &defaults()).unwrap();

        assert!(config.release_signing_fallback());
        assert_eq!(
            config.signing(BuildVariant::Release),
            config.signing(BuildVariant::Debug)
        );
        assert_eq!(
            config.signing(BuildVariant::Debug),
            &SigningCredentials::debug_default()
        );
    }

    #[test]
    fn test_complete_release_credentials() {
        let sources = [app_source("com.example.app"), Some(release_source())];
        let config = resolve(&sources, &defaults()).unwrap();

        let release = config.signing(BuildVariant::Release);
        assert!(!config.release_signing_fallback());
        assert_eq!(release.store_file.as_deref(), Some("/keys/upload.jks"));
        assert_eq!(release.key_alias.as_deref(), Some("upload"));
        assert_ne!(release, config.signing(BuildVariant::Debug));
    }

    #[test]
    fn test_release_credentials_can_span_layers() {
        let sources = [
            app_source("com.example.app"),
            Some(PropertySource::from_pairs([
                (signing::STORE_FILE, "/keys/upload.jks"),
                (signing::KEY_ALIAS, "upload"),
            ])),
            Some(PropertySource::from_pairs([
                (signing::STORE_PASSWORD, "s"),
                (signing::KEY_PASSWORD, "k"),
            ])),
        ];

        let config = resolve(&sources, &defaults()).unwrap();
        assert!(config.signing(BuildVariant::Release).is_complete());
    }

    #[test]
    fn test_store_file_without_alias_is_incomplete() {
        let partial = PropertySource::from_pairs(
            release_source()
                .entries()
                .filter(|(k, _)| *k != signing::KEY_ALIAS),
        );

        let err = resolve(&[app_source("com.example.app"), Some(partial)], &defaults()).unwrap_err();

        assert_eq!(
            err,
            ConfigError::IncompleteSigningCredentials {
                missing: vec!["keyAlias".to_string()]
            }
        );
    }

    #[test]
    fn test_blank_signing_values_count_as_absent() {
        let sources = [
            app_source("com.example.app"),
            Some(PropertySource::from_pairs([
                (signing::STORE_FILE, ""),
                (signing::STORE_PASSWORD, "  "),
            ])),
        ];

        let config = resolve(&sources, &defaults()).unwrap();
        assert!(config.release_signing_fallback());
    }

    #[test]
    fn test_sdk_order_violation() {
        let source = PropertySource::from_pairs([
            (keys::APPLICATION_ID, "com.example.app"),
            (keys::MIN_SDK, "21"),
            (keys::TARGET_SDK, "30"),
            (keys::COMPILE_SDK, "19"),
        ]);

        let err = resolve(&[Some(source)], &defaults()).unwrap_err();

        assert_eq!(
            err,
            ConfigError::SdkVersionOrder {
                min_sdk: 21,
                target_sdk: 30,
                compile_sdk: 19
            }
        );
    }

    #[test]
    fn test_min_above_target_is_rejected() {
        let source = PropertySource::from_pairs([(keys::MIN_SDK, "34")]);
        let err = resolve(&[app_source("com.example.app"), Some(source)], &defaults()).unwrap_err();
        assert!(matches!(err, ConfigError::SdkVersionOrder { .. }));
    }

    #[test]
    fn test_invalid_application_ids() {
        for bad in ["app", "com..example", "1com.example", "com.example-app", "com.example.", " com.example"] {
            let err = resolve(&[app_source(bad)], &defaults()).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidIdentifier { ref field, .. } if field == "applicationId"),
                "{bad} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_valid_application_ids() {
        for good in ["com.example.app", "com.example.once_upon_a_line", "io.Foo2.bar_3"] {
            assert!(resolve(&[app_source(good)], &defaults()).is_ok(), "{good}");
        }
    }

    #[test]
    fn test_namespace_is_validated() {
        let source = PropertySource::from_pairs([
            (keys::APPLICATION_ID, "com.example.app"),
            (keys::NAMESPACE, "example"),
        ]);

        let err = resolve(&[Some(source)], &defaults()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIdentifier { ref field, .. } if field == "namespace"));
    }

    #[test]
    fn test_missing_application_id() {
        let err = resolve(&[], &defaults()).unwrap_err();
        assert_eq!(err, ConfigError::MissingRequiredField("applicationId".into()));
    }

    #[test]
    fn test_missing_version_name() {
        let defaults = BuildDefaults {
            version_name: None,
            ..defaults()
        };
        let err = resolve(&[app_source("com.example.app")], &defaults).unwrap_err();
        assert_eq!(err, ConfigError::MissingRequiredField("versionName".into()));
    }

    #[test]
    fn test_non_numeric_version_code() {
        let source = PropertySource::from_pairs([(keys::VERSION_CODE, "four")]);
        let err = resolve(&[app_source("com.example.app"), Some(source)], &defaults()).unwrap_err();
        assert_eq!(err, ConfigError::MissingRequiredField("versionCode".into()));
    }

    #[test]
    fn test_blank_value_does_not_clear_lower_layer() {
        let source = PropertySource::from_pairs([(keys::VERSION_NAME, "")]);
        let config = resolve(&[app_source("com.example.app"), Some(source)], &defaults()).unwrap();
        assert_eq!(config.version_name(), "1.0");
    }

    #[test]
    fn test_toolkit_aliases() {
        let local = PropertySource::parse(
            "sdk.dir=/opt/android-sdk\nflutter.versionName=2.3.1\nflutter.versionCode=17\nflutter.minSdkVersion=23\nflutter.ndkVersion=26.1.10909125\n",
        )
        .unwrap();

        let config = resolve(&[app_source("com.example.app"), Some(local)], &defaults()).unwrap();

        assert_eq!(config.version_name(), "2.3.1");
        assert_eq!(config.version_code(), 17);
        assert_eq!(config.min_sdk(), 23);
        assert_eq!(config.ndk_version(), Some("26.1.10909125"));
    }

    #[test]
    fn test_alias_and_canonical_key_last_applied_wins() {
        let source = PropertySource::from_pairs([
            (toolkit_keys::VERSION_CODE, "5"),
            (keys::VERSION_CODE, "6"),
        ]);
        let config = resolve(&[app_source("com.example.app"), Some(source)], &defaults()).unwrap();
        assert_eq!(config.version_code(), 6);
    }

    #[test]
    fn test_defaults_debug_signing_override() {
        let custom = SigningCredentials {
            store_file: Some("keys/team-debug.keystore".into()),
            store_password: Some("android".into()),
            key_alias: Some("team".into()),
            key_password: Some("android".into()),
        };
        let defaults = BuildDefaults {
            debug_signing: Some(custom.clone()),
            ..defaults()
        };

        let config = resolve(&[app_source("com.example.app")], &defaults).unwrap();

        assert_eq!(config.signing(BuildVariant::Debug), &custom);
        assert_eq!(config.signing(BuildVariant::Release), &custom);
    }

    #[test]
    fn test_partial_debug_signing_override_rejected() {
        let defaults = BuildDefaults {
            debug_signing: Some(SigningCredentials {
                store_file: Some("keys/debug.keystore".into()),
                ..SigningCredentials::default()
            }),
            ..defaults()
        };

        let err = resolve(&[app_source("com.example.app")], &defaults).unwrap_err();
        assert!(matches!(err, ConfigError::IncompleteSigningCredentials { .. }));
    }

    #[test]
    fn test_resolver_with_debug_signing() {
        let custom = SigningCredentials {
            store_file: Some("/ci/debug.keystore".into()),
            ..SigningCredentials::debug_default()
        };
        let resolver = ConfigResolver::new().with_debug_signing(custom.clone());

        let config = resolver
            .resolve(&[app_source("com.example.app")], &defaults())
            .unwrap();
        assert_eq!(config.signing(BuildVariant::Debug), &custom);
    }

    #[test]
    fn test_full_config_as_defaults() {
        let config = resolve(
            &[app_source("com.example.app"), Some(release_source())],
            &defaults(),
        )
        .unwrap();

        let again = resolve(&[Some(config.to_property_source())], &BuildDefaults::from(&config)).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn test_property_source_omits_fallback_signing() {
        let config = resolve(&[app_source("com.example.app")], &defaults()).unwrap();
        let rendered = config.to_property_source();

        assert_eq!(rendered.get(signing::STORE_FILE), None);
        assert_eq!(rendered.get(keys::APPLICATION_ID), Some("com.example.app"));
        assert_eq!(rendered.get(keys::JVM_TARGET), Some("11"));
    }

    #[test]
    fn test_resolver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigResolver>();
        assert_send_sync::<BuildConfig>();
    }

    const KEYS: &[&str] = &[
        keys::APPLICATION_ID,
        keys::NAMESPACE,
        keys::MIN_SDK,
        keys::TARGET_SDK,
        keys::COMPILE_SDK,
        keys::VERSION_CODE,
        keys::VERSION_NAME,
        toolkit_keys::VERSION_CODE,
        signing::STORE_FILE,
        signing::STORE_PASSWORD,
        signing::KEY_ALIAS,
        signing::KEY_PASSWORD,
        "sdk.dir",
    ];

    fn arb_entry() -> impl Strategy<Value = (String, String)> {
        (
            prop::sample::select(KEYS),
            "([a-z]{1,6}(\\.[a-z]{1,6}){0,2})|([0-9]{1,2})",
        )
            .prop_map(|(k, v)| (k.to_string(), v))
    }

    fn arb_sources() -> impl Strategy<Value = Vec<Option<PropertySource>>> {
        prop::collection::vec(
            prop::option::of(prop::collection::vec(arb_entry(), 0..6).prop_map(PropertySource::from_pairs)),
            0..4,
        )
    }

    fn arb_defaults() -> impl Strategy<Value = BuildDefaults> {
        (
            prop::option::of(16u32..=34),
            prop::option::of(16u32..=35),
            prop::option::of(16u32..=35),
            prop::option::of(1u32..500),
            prop::option::of("[0-9]\\.[0-9]"),
        )
            .prop_map(|(min_sdk, target_sdk, compile_sdk, version_code, version_name)| BuildDefaults {
                min_sdk,
                target_sdk,
                compile_sdk,
                version_code,
                version_name,
                ..BuildDefaults::default()
            })
    }

    fn arb_valid_input() -> impl Strategy<Value = (Vec<Option<PropertySource>>, BuildDefaults)> {
        (
            16u32..=24,
            0u32..=8,
            0u32..=2,
            1u32..=10_000,
            "[a-z]{2,8}\\.[a-z]{2,8}(\\.[a-z][a-z0-9_]{0,7})?",
            prop::option::of("[a-z0-9]{1,8}"),
            any::<bool>(),
        )
            .prop_map(|(min, target_delta, compile_delta, code, app_id, ndk, signed)| {
                let defaults = BuildDefaults {
                    min_sdk: Some(min),
                    target_sdk: Some(min + target_delta),
                    compile_sdk: Some(min + target_delta + compile_delta),
                    version_code: Some(1),
                    version_name: Some("1.0".into()),
                    ..BuildDefaults::default()
                };
                let mut overrides = PropertySource::from_pairs([
                    (keys::APPLICATION_ID, app_id),
                    (keys::VERSION_CODE, code.to_string()),
                ]);
                if let Some(ndk) = ndk {
                    overrides.insert(keys::NDK_VERSION, ndk);
                }
                let signing = signed.then(release_source);
                (vec![Some(overrides), None, signing], defaults)
            })
    }

    proptest! {
        #[test]
        fn resolution_is_deterministic(sources in arb_sources(), defaults in arb_defaults()) {
            let first = resolve(&sources, &defaults);
            let second = resolve(&sources, &defaults);

            prop_assert_eq!(&first, &second);
            if let (Ok(a), Ok(b)) = (first, second) {
                prop_assert_eq!(
                    a.to_property_source().to_properties_string(),
                    b.to_property_source().to_properties_string()
                );
            }
        }

        #[test]
        fn resolution_is_idempotent((sources, defaults) in arb_valid_input()) {
            let config = resolve(&sources, &defaults).unwrap();
            let again = resolve(&[Some(config.to_property_source())], &defaults).unwrap();

            prop_assert_eq!(again, config);
        }

        #[test]
        fn unsigned_release_aliases_debug(sources in arb_sources(), defaults in arb_defaults()) {
            let unsigned: Vec<Option<PropertySource>> = sources
                .into_iter()
                .map(|s| s.map(|s| {
                    PropertySource::from_pairs(
                        s.entries().filter(|(k, _)| !signing::SIGNING_KEYS.contains(k)),
                    )
                }))
                .collect();

            if let Ok(config) = resolve(&unsigned, &defaults) {
                prop_assert!(config.release_signing_fallback());
                prop_assert_eq!(
                    config.signing(BuildVariant::Release),
                    config.signing(BuildVariant::Debug)
                );
            }
        }
    }
}
