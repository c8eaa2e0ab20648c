//! Language utilities for ISO language code handling
//!
//! This module validates the language codes given on the command line or in
//! the configuration, and turns them into the codes the translation service
//! expects. ISO 639-1 (2-letter), ISO 639-2/T and ISO 639-2/B (3-letter) codes
//! are accepted, optionally followed by a region or script subtag (`pt-BR`,
//! `zh_Hant`).

use anyhow::{anyhow, Result};
use isolang::Language;

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("dut", "nld"),
    ("fre", "fra"),
    ("geo", "kat"),
    ("ger", "deu"),
    ("gre", "ell"),
    ("ice", "isl"),
    ("mac", "mkd"),
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Split `pt-BR` / `zh_Hant` into the lowercased base code and the subtag.
fn split_code(code: &str) -> (String, Option<&str>) {
    let trimmed = code.trim();
    match trimmed.split_once(['-', '_']) {
        Some((base, subtag)) => (base.to_lowercase(), Some(subtag).filter(|s| !s.is_empty())),
        None => (trimmed.to_lowercase(), None),
    }
}

/// Map a base code to its language.
fn lookup(base: &str) -> Option<Language> {
    match base.len() {
        2 => Language::from_639_1(base),
        3 => {
            let terminological = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bibliographic, _)| *bibliographic == base)
                .map(|(_, terminological)| *terminological)
                .unwrap_or(base);
            Language::from_639_3(terminological)
        }
        _ => None,
    }
}

/// Resolve a language code to its ISO language
pub fn resolve_language(code: &str) -> Result<Language> {
    let (base, _) = split_code(code);
    lookup(&base).ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Validate that a language code names a known language
pub fn validate_language_code(code: &str) -> Result<()> {
    resolve_language(code).map(|_| ())
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    Ok(resolve_language(code)?.to_639_3().to_string())
}

/// Code to send to the translation service.
///
/// The 2-letter code is preferred, falling back to the 3-letter code for
/// languages without one. A region or script subtag is kept (`zh-CN`).
pub fn service_language_code(code: &str) -> Result<String> {
    let (base, subtag) = split_code(code);
    let language = lookup(&base).ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
    let primary = language.to_639_1().unwrap_or_else(|| language.to_639_3());

    Ok(match subtag {
        Some(subtag) => format!("{}-{}", primary, subtag),
        None => primary.to_string(),
    })
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (resolve_language(code1), resolve_language(code2)) {
        (Ok(language1), Ok(language2)) => language1 == language2,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    Ok(resolve_language(code)?.to_name().to_string())
}
