//! Target language codes the service is known to accept.
//!
//! The list is advisory. Codes outside it are still sent; the service is the
//! authority and rejects what it cannot handle.

/// ISO 639-1 codes (plus regional variants) accepted as `target_lang`.
pub const SUPPORTED_TARGET_LANGUAGES: &[&str] = &[
    "af", "am", "ar", "az", "be", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en",
    "es", "et", "eu", "fa", "fi", "fr", "ga", "gl", "gu", "ha", "he", "hi", "hr", "hu", "hy",
    "id", "ig", "is", "it", "ja", "ka", "kk", "km", "kn", "ko", "ky", "lo", "lt", "lv", "mk",
    "ml", "mn", "mr", "ms", "mt", "my", "ne", "nl", "no", "pa", "pl", "ps", "pt", "pt-BR",
    "ro", "ru", "si", "sk", "sl", "so", "sq", "sr", "sv", "sw", "ta", "te", "tg", "th", "tl",
    "tr", "uk", "ur", "uz", "vi", "xh", "yo", "zh", "zh-CN", "zh-TW", "zu",
];

/// Whether `code` is in [`SUPPORTED_TARGET_LANGUAGES`].
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_TARGET_LANGUAGES.contains(&code)
}
