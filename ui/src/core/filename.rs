//! Character name -> history file name.

use sha2::{Digest, Sha256};

/// Prefix used when a name has no representable characters at all.
const HASH_TAG: &str = "char_";
const HASH_HEX_LEN: usize = 8;

/// Filesystem-safe stem for a character's history file.
///
/// Keeps ASCII letters, digits, `_` and `-`; everything else becomes `_`, runs
/// of `_` collapse and edge underscores are trimmed. Names that sanitize to
/// nothing (e.g. entirely non-Latin) get a stable digest of their UTF-8 bytes.
pub fn safe_file_stem(name: &str) -> String {
    let mut safe = String::with_capacity(name.len());
    for ch in name.chars() {
        let keep = ch.is_ascii_alphanumeric() || ch == '_' || ch == '-';
        let mapped = if keep { ch } else { '_' };
        if mapped == '_' && safe.ends_with('_') {
            continue;
        }
        safe.push(mapped);
    }

    let trimmed = safe.trim_matches('_');
    if trimmed.is_empty() {
        hashed_stem(name)
    } else {
        trimmed.to_string()
    }
}

/// Relative path of a character's history file inside the data root.
pub fn history_path(name: &str) -> String {
    format!("players/{}.json", safe_file_stem(name))
}

fn hashed_stem(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    let hex = hex::encode(digest);
    format!("{HASH_TAG}{}", &hex[..HASH_HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(safe_file_stem("CHUCHU_STAINING"), "CHUCHU_STAINING");
        assert_eq!(safe_file_stem("Cyclone-King_v2"), "Cyclone-King_v2");
    }

    #[test]
    fn collapses_and_trims_replacements() {
        assert_eq!(safe_file_stem("  Frost  Bolt Queen! "), "Frost_Bolt_Queen");
        assert_eq!(safe_file_stem("__a__b__"), "a_b");
        assert_eq!(safe_file_stem("Ünïcode Nàme"), "n_code_N_me");
    }

    #[test]
    fn unrepresentable_names_hash_deterministically() {
        let first = safe_file_stem("死神");
        let second = safe_file_stem("死神");
        assert_eq!(first, second);
        assert!(first.starts_with(HASH_TAG));
        assert_eq!(first.len(), HASH_TAG.len() + HASH_HEX_LEN);
        assert_ne!(first, safe_file_stem("魔王"));
    }

    #[test]
    fn history_path_uses_players_dir() {
        assert_eq!(history_path("Tank Mode"), "players/Tank_Mode.json");
    }
}
