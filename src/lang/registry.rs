//! Language registry: built-in metadata table and override resolution.
//!
//! The registry never fails: any code that is neither a custom override
//! nor a built-in entry resolves to a generic fallback (uppercased code,
//! globe flag, the code itself as API locale). Built-ins are held in a
//! `OnceLock`-initialized map so lookups stay cheap.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

/// Flag shown for languages the built-in table does not know.
pub const GENERIC_FLAG: &str = "\u{1F310}"; // 🌐

/// Resolved display metadata for one language code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Language code as it appears in the file name (e.g., "en", "zh_CN")
    pub code: String,
    /// Locale code the remote translation API expects (e.g., "en-US")
    pub api_code: String,
    /// Human-readable language name
    pub name: String,
    /// Flag emoji for display surfaces
    pub flag: String,
}

/// User-supplied override for one language code.
///
/// Every field is optional; missing fields fall back to the built-in
/// entry (or to the generic fallback for unknown codes).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomLanguage {
    pub name: Option<String>,
    pub flag: Option<String>,
    #[serde(rename = "apiCode", alias = "api_code")]
    pub api_code: Option<String>,
}

/// Built-in table: (code, api locale, name, flag).
const BUILTIN: &[(&str, &str, &str, &str)] = &[
    // English variants
    ("en", "en-US", "English", "\u{1F1FA}\u{1F1F8}"),
    ("en_US", "en-US", "English (US)", "\u{1F1FA}\u{1F1F8}"),
    ("en_GB", "en-GB", "English (UK)", "\u{1F1EC}\u{1F1E7}"),
    ("en_AU", "en-AU", "English (Australia)", "\u{1F1E6}\u{1F1FA}"),
    // Chinese variants
    ("zh", "zh-CN", "Chinese", "\u{1F1E8}\u{1F1F3}"),
    ("zh_CN", "zh-CN", "Chinese (Simplified)", "\u{1F1E8}\u{1F1F3}"),
    ("zh_TW", "zh-TW", "Chinese (Traditional)", "\u{1F1F9}\u{1F1FC}"),
    ("zh_HK", "zh-TW", "Chinese (Hong Kong)", "\u{1F1ED}\u{1F1F0}"),
    // European languages
    ("fr", "fr-FR", "French", "\u{1F1EB}\u{1F1F7}"),
    ("fr_FR", "fr-FR", "French (France)", "\u{1F1EB}\u{1F1F7}"),
    ("fr_CA", "fr-CA", "French (Canada)", "\u{1F1E8}\u{1F1E6}"),
    ("de", "de-DE", "German", "\u{1F1E9}\u{1F1EA}"),
    ("de_DE", "de-DE", "German (Germany)", "\u{1F1E9}\u{1F1EA}"),
    ("de_AT", "de-AT", "German (Austria)", "\u{1F1E6}\u{1F1F9}"),
    ("de_CH", "de-CH", "German (Switzerland)", "\u{1F1E8}\u{1F1ED}"),
    ("it", "it-IT", "Italian", "\u{1F1EE}\u{1F1F9}"),
    ("it_IT", "it-IT", "Italian", "\u{1F1EE}\u{1F1F9}"),
    ("es", "es-ES", "Spanish", "\u{1F1EA}\u{1F1F8}"),
    ("es_ES", "es-ES", "Spanish (Spain)", "\u{1F1EA}\u{1F1F8}"),
    ("es_MX", "es-MX", "Spanish (Mexico)", "\u{1F1F2}\u{1F1FD}"),
    ("es_AR", "es-AR", "Spanish (Argentina)", "\u{1F1E6}\u{1F1F7}"),
    ("pt", "pt-PT", "Portuguese", "\u{1F1F5}\u{1F1F9}"),
    ("pt_PT", "pt-PT", "Portuguese (Portugal)", "\u{1F1F5}\u{1F1F9}"),
    ("pt_BR", "pt-BR", "Portuguese (Brazil)", "\u{1F1E7}\u{1F1F7}"),
    ("nl", "nl-NL", "Dutch", "\u{1F1F3}\u{1F1F1}"),
    ("nl_NL", "nl-NL", "Dutch", "\u{1F1F3}\u{1F1F1}"),
    ("nl_BE", "nl-BE", "Dutch (Belgium)", "\u{1F1E7}\u{1F1EA}"),
    ("pl", "pl-PL", "Polish", "\u{1F1F5}\u{1F1F1}"),
    ("pl_PL", "pl-PL", "Polish", "\u{1F1F5}\u{1F1F1}"),
    ("ru", "ru-RU", "Russian", "\u{1F1F7}\u{1F1FA}"),
    ("ru_RU", "ru-RU", "Russian", "\u{1F1F7}\u{1F1FA}"),
    ("uk", "uk-UA", "Ukrainian", "\u{1F1FA}\u{1F1E6}"),
    ("uk_UA", "uk-UA", "Ukrainian", "\u{1F1FA}\u{1F1E6}"),
    ("cs", "cs-CZ", "Czech", "\u{1F1E8}\u{1F1FF}"),
    ("cs_CZ", "cs-CZ", "Czech", "\u{1F1E8}\u{1F1FF}"),
    ("sk", "sk-SK", "Slovak", "\u{1F1F8}\u{1F1F0}"),
    ("hu", "hu-HU", "Hungarian", "\u{1F1ED}\u{1F1FA}"),
    ("ro", "ro-RO", "Romanian", "\u{1F1F7}\u{1F1F4}"),
    ("bg", "bg-BG", "Bulgarian", "\u{1F1E7}\u{1F1EC}"),
    ("el", "el-GR", "Greek", "\u{1F1EC}\u{1F1F7}"),
    ("sv", "sv-SE", "Swedish", "\u{1F1F8}\u{1F1EA}"),
    ("da", "da-DK", "Danish", "\u{1F1E9}\u{1F1F0}"),
    ("no", "no-NO", "Norwegian", "\u{1F1F3}\u{1F1F4}"),
    ("fi", "fi-FI", "Finnish", "\u{1F1EB}\u{1F1EE}"),
    // Asian languages
    ("ja", "ja-JP", "Japanese", "\u{1F1EF}\u{1F1F5}"),
    ("ja_JP", "ja-JP", "Japanese", "\u{1F1EF}\u{1F1F5}"),
    ("ko", "ko-KR", "Korean", "\u{1F1F0}\u{1F1F7}"),
    ("ko_KR", "ko-KR", "Korean", "\u{1F1F0}\u{1F1F7}"),
    ("th", "th-TH", "Thai", "\u{1F1F9}\u{1F1ED}"),
    ("th_TH", "th-TH", "Thai", "\u{1F1F9}\u{1F1ED}"),
    ("vi", "vi-VN", "Vietnamese", "\u{1F1FB}\u{1F1F3}"),
    ("vi_VN", "vi-VN", "Vietnamese", "\u{1F1FB}\u{1F1F3}"),
    ("id", "id-ID", "Indonesian", "\u{1F1EE}\u{1F1E9}"),
    ("id_ID", "id-ID", "Indonesian", "\u{1F1EE}\u{1F1E9}"),
    ("ms", "ms-MY", "Malay", "\u{1F1F2}\u{1F1FE}"),
    ("ms_MY", "ms-MY", "Malay", "\u{1F1F2}\u{1F1FE}"),
    ("cn_MY", "ms-MY", "Malay", "\u{1F1F2}\u{1F1FE}"),
    ("tl", "tl-PH", "Filipino", "\u{1F1F5}\u{1F1ED}"),
    ("km", "km-KH", "Khmer", "\u{1F1F0}\u{1F1ED}"),
    ("km_KH", "km-KH", "Khmer", "\u{1F1F0}\u{1F1ED}"),
    ("lo", "lo-LA", "Lao", "\u{1F1F1}\u{1F1E6}"),
    ("my", "my-MM", "Myanmar (Burmese)", "\u{1F1F2}\u{1F1F2}"),
    // South Asian languages
    ("hi", "hi-IN", "Hindi", "\u{1F1EE}\u{1F1F3}"),
    ("bn", "bn-BD", "Bengali", "\u{1F1E7}\u{1F1E9}"),
    ("ta", "ta-IN", "Tamil", "\u{1F1EE}\u{1F1F3}"),
    ("te", "te-IN", "Telugu", "\u{1F1EE}\u{1F1F3}"),
    ("mr", "mr-IN", "Marathi", "\u{1F1EE}\u{1F1F3}"),
    ("gu", "gu-IN", "Gujarati", "\u{1F1EE}\u{1F1F3}"),
    ("pa", "pa-IN", "Punjabi", "\u{1F1EE}\u{1F1F3}"),
    ("ur", "ur-PK", "Urdu", "\u{1F1F5}\u{1F1F0}"),
    ("ne", "ne-NP", "Nepali", "\u{1F1F3}\u{1F1F5}"),
    ("si", "si-LK", "Sinhala", "\u{1F1F1}\u{1F1F0}"),
    // Middle Eastern languages
    ("ar", "ar-SA", "Arabic", "\u{1F1F8}\u{1F1E6}"),
    ("ar_SA", "ar-SA", "Arabic (Saudi Arabia)", "\u{1F1F8}\u{1F1E6}"),
    ("ar_AE", "ar-AE", "Arabic (UAE)", "\u{1F1E6}\u{1F1EA}"),
    ("ar_EG", "ar-EG", "Arabic (Egypt)", "\u{1F1EA}\u{1F1EC}"),
    ("he", "he-IL", "Hebrew", "\u{1F1EE}\u{1F1F1}"),
    ("fa", "fa-IR", "Persian", "\u{1F1EE}\u{1F1F7}"),
    ("tr", "tr-TR", "Turkish", "\u{1F1F9}\u{1F1F7}"),
    // African languages
    ("sw", "sw-KE", "Swahili", "\u{1F1F0}\u{1F1EA}"),
    ("af", "af-ZA", "Afrikaans", "\u{1F1FF}\u{1F1E6}"),
    ("am", "am-ET", "Amharic", "\u{1F1EA}\u{1F1F9}"),
    // Other languages
    ("ca", "ca-ES", "Catalan", "\u{1F1EA}\u{1F1F8}"),
    ("eu", "eu-ES", "Basque", "\u{1F1EA}\u{1F1F8}"),
    ("gl", "gl-ES", "Galician", "\u{1F1EA}\u{1F1F8}"),
    ("hr", "hr-HR", "Croatian", "\u{1F1ED}\u{1F1F7}"),
    ("sr", "sr-RS", "Serbian", "\u{1F1F7}\u{1F1F8}"),
    ("sl", "sl-SI", "Slovenian", "\u{1F1F8}\u{1F1EE}"),
    ("et", "et-EE", "Estonian", "\u{1F1EA}\u{1F1EA}"),
    ("lv", "lv-LV", "Latvian", "\u{1F1F1}\u{1F1FB}"),
    ("lt", "lt-LT", "Lithuanian", "\u{1F1F1}\u{1F1F9}"),
];

/// Built-in table keyed by code (initialized lazily).
static TABLE: OnceLock<HashMap<&'static str, &'static (&'static str, &'static str, &'static str, &'static str)>> =
    OnceLock::new();

fn table() -> &'static HashMap<&'static str, &'static (&'static str, &'static str, &'static str, &'static str)>
{
    TABLE.get_or_init(|| BUILTIN.iter().map(|entry| (entry.0, entry)).collect())
}

/// Resolve display metadata for a language code.
///
/// Resolution priority per field: custom override, then the built-in
/// table, then the generic fallback. Total: never fails, unknown codes
/// get `{name: CODE, flag: 🌐, api_code: code}`.
pub fn resolve(code: &str, custom: Option<&HashMap<String, CustomLanguage>>) -> LanguageInfo {
    let base = match table().get(code) {
        Some(&&(_, api_code, name, flag)) => LanguageInfo {
            code: code.to_string(),
            api_code: api_code.to_string(),
            name: name.to_string(),
            flag: flag.to_string(),
        },
        None => LanguageInfo {
            code: code.to_string(),
            api_code: code.to_string(),
            name: code.to_uppercase(),
            flag: GENERIC_FLAG.to_string(),
        },
    };

    let Some(overrides) = custom.and_then(|map| map.get(code)) else {
        return base;
    };

    LanguageInfo {
        code: base.code,
        api_code: overrides.api_code.clone().unwrap_or(base.api_code),
        name: overrides.name.clone().unwrap_or(base.name),
        flag: overrides.flag.clone().unwrap_or(base.flag),
    }
}
