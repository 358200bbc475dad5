use uuid::Uuid;

/// Key-assignment policy consulted once per translatable string during
/// extraction. `old_key` is the key stamped on the matching field of the
/// previous tree, or empty if there is no previous value. The returned key
/// is stored on the field and used as the translation-map entry; the engine
/// never mints keys itself.
///
/// Keys returned for independent subtrees are assumed collision-free; the
/// engine does not detect colliding keys.
pub trait KeyGetter {
    fn get_key(&self, old_key: &str, text: &str) -> String;
}

/// Deterministic key derived from the text content: a UUIDv5 over the nil
/// namespace. Identical text yields the identical key wherever it appears,
/// so one translation covers every occurrence.
pub fn content_key(text: &str) -> String {
    Uuid::new_v5(&Uuid::nil(), text.as_bytes()).to_string()
}

/// Source-language policy: always re-key from the current text.
pub struct ContentKeys;

impl KeyGetter for ContentKeys {
    fn get_key(&self, _old_key: &str, text: &str) -> String {
        content_key(text)
    }
}

/// Secondary-language policy: keep the key the source language assigned so
/// translations line up across locales, minting only for fields the source
/// has never seen.
pub struct ReuseKeys;

impl KeyGetter for ReuseKeys {
    fn get_key(&self, old_key: &str, text: &str) -> String {
        if !old_key.is_empty() {
            return old_key.to_string();
        }
        content_key(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_key_is_deterministic() {
        assert_eq!(content_key("book"), content_key("book"));
        assert_ne!(content_key("book"), content_key("本"));
    }

    #[test]
    fn reuse_keeps_old_key() {
        let old = content_key("book");
        assert_eq!(ReuseKeys.get_key(&old, "本"), old);
        assert_eq!(ReuseKeys.get_key("", "本"), content_key("本"));
    }
}
