//! # Localization Module
//!
//! Fluent message bundles for every user-facing string the bot sends.
//! Resources are embedded at compile time from `locales/<lang>/main.ftl`.

use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use std::collections::HashMap;
use std::sync::OnceLock;
use unic_langid::LanguageIdentifier;

/// Locales with an embedded resource file
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "fr"];

const RESOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/main.ftl")),
    ("fr", include_str!("../locales/fr/main.ftl")),
];

/// Localization manager for the collate bot
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    default_language: String,
}

impl Default for LocalizationManager {
    /// An empty manager: every lookup reports a missing translation
    fn default() -> Self {
        Self {
            bundles: HashMap::new(),
            default_language: "en".to_string(),
        }
    }
}

impl LocalizationManager {
    /// Create a localization manager with every supported locale loaded
    pub fn new() -> Result<Self> {
        Self::with_default_language("en")
    }

    /// Create a localization manager falling back to `default_language`
    pub fn with_default_language(default_language: &str) -> Result<Self> {
        if !SUPPORTED_LANGUAGES.contains(&default_language) {
            return Err(anyhow!("unsupported default language: {default_language}"));
        }

        let mut bundles = HashMap::new();
        for (lang, source) in RESOURCES {
            let locale: LanguageIdentifier = lang.parse()?;
            bundles.insert(lang.to_string(), Self::create_bundle(locale, source)?);
        }

        Ok(Self {
            bundles,
            default_language: default_language.to_string(),
        })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(
        locale: LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Placeables are spliced into chat text; isolation marks would leak into it.
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("invalid resource for {locale}: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("conflicting messages for {locale}: {errors:?}"))?;

        Ok(bundle)
    }

    /// Resolve a Telegram language code to a loaded locale
    pub fn resolve_language<'a>(&'a self, language_code: Option<&str>) -> &'a str {
        language_code
            .and_then(primary_subtag)
            .and_then(|lang| {
                self.bundles
                    .get_key_value(lang.as_str())
                    .map(|(key, _)| key.as_str())
            })
            .unwrap_or(&self.default_language)
    }

    /// Get a localized message in the language matching `language_code`
    pub fn get_message_in_language(
        &self,
        key: &str,
        language_code: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let lang = self.resolve_language(Some(language_code));
        let bundle = match self.bundles.get(lang) {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {key}"),
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {key}"),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {key}"),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, value.to_string());
            }
            fluent_args
        });

        let mut errors = vec![];
        bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors)
            .into_owned()
    }
}

/// Lowercased primary language subtag of a BCP 47 code ("fr-CA" -> "fr")
fn primary_subtag(code: &str) -> Option<String> {
    code.split(['-', '_'])
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Global localization instance
static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager.
///
/// Calling it again after a successful initialization is a no-op.
pub fn init_localization(default_language: &str) -> Result<()> {
    let manager = LocalizationManager::with_default_language(default_language)?;
    let _ = LOCALIZATION_MANAGER.set(manager);
    Ok(())
}

/// Get the global localization manager, loading the English default on first use
pub fn get_localization_manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER.get_or_init(|| LocalizationManager::new().unwrap_or_default())
}

/// Resolve a Telegram language code to a supported locale
pub fn detect_language(language_code: Option<&str>) -> String {
    get_localization_manager()
        .resolve_language(language_code)
        .to_string()
}

/// Get a localized message in the sender's language
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    let manager = get_localization_manager();
    let lang = manager.resolve_language(language_code).to_string();
    manager.get_message_in_language(key, &lang, None)
}

/// Get a localized message with arguments in the sender's language
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    let manager = get_localization_manager();
    let lang = manager.resolve_language(language_code).to_string();
    let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
    manager.get_message_in_language(key, &lang, Some(&args_map))
}
