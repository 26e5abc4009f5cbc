//! English to Urdu lookup table.
//!
//! A [`Dictionary`] is built once and then only read. The built-in table is
//! available through [`Dictionary::builtin`]; deployments can extend it with
//! a JSON object file at startup.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::{KhulasaError, Result};

/// Built-in entries. Keys are lowercase English, values are Urdu script.
const URDU_ENTRIES: &[(&str, &str)] = &[
    ("a", "ایک"),
    ("about", "کے بارے میں"),
    ("after", "بعد"),
    ("all", "تمام"),
    ("also", "بھی"),
    ("an", "ایک"),
    ("and", "اور"),
    ("are", "ہیں"),
    ("article", "مضمون"),
    ("as", "جیسے"),
    ("at", "پر"),
    ("be", "ہونا"),
    ("because", "کیونکہ"),
    ("before", "پہلے"),
    ("blog", "بلاگ"),
    ("book", "کتاب"),
    ("but", "لیکن"),
    ("by", "کی طرف سے"),
    ("can", "سکتا"),
    ("city", "شہر"),
    ("company", "کمپنی"),
    ("country", "ملک"),
    ("data", "ڈیٹا"),
    ("day", "دن"),
    ("education", "تعلیم"),
    ("first", "پہلا"),
    ("for", "کے لیے"),
    ("from", "سے"),
    ("good", "اچھا"),
    ("government", "حکومت"),
    ("has", "ہے"),
    ("have", "ہیں"),
    ("he", "وہ"),
    ("health", "صحت"),
    ("how", "کیسے"),
    ("i", "میں"),
    ("important", "اہم"),
    ("in", "میں"),
    ("information", "معلومات"),
    ("is", "ہے"),
    ("it", "یہ"),
    ("its", "اس کا"),
    ("life", "زندگی"),
    ("many", "بہت سے"),
    ("market", "بازار"),
    ("money", "پیسہ"),
    ("more", "زیادہ"),
    ("new", "نیا"),
    ("news", "خبر"),
    ("no", "نہیں"),
    ("not", "نہیں"),
    ("of", "کا"),
    ("on", "پر"),
    ("or", "یا"),
    ("our", "ہمارا"),
    ("people", "لوگ"),
    ("report", "رپورٹ"),
    ("research", "تحقیق"),
    ("school", "اسکول"),
    ("she", "وہ"),
    ("study", "مطالعہ"),
    ("summary", "خلاصہ"),
    ("system", "نظام"),
    ("technology", "ٹیکنالوجی"),
    ("that", "وہ"),
    ("the", "دی"),
    ("their", "ان کا"),
    ("they", "وہ"),
    ("this", "یہ"),
    ("time", "وقت"),
    ("to", "کو"),
    ("was", "تھا"),
    ("water", "پانی"),
    ("we", "ہم"),
    ("were", "تھے"),
    ("what", "کیا"),
    ("when", "جب"),
    ("where", "کہاں"),
    ("which", "جو"),
    ("who", "کون"),
    ("why", "کیوں"),
    ("will", "گا"),
    ("with", "کے ساتھ"),
    ("work", "کام"),
    ("world", "دنیا"),
    ("year", "سال"),
    ("yes", "ہاں"),
    ("you", "آپ"),
    ("your", "آپ کا"),
];

static BUILTIN: LazyLock<Dictionary> = LazyLock::new(|| Dictionary::from_pairs(URDU_ENTRIES.iter().copied()));

/// Immutable mapping from lowercase source word to target word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    /// Returns the built-in English to Urdu table.
    pub fn builtin() -> &'static Dictionary {
        &BUILTIN
    }

    /// Builds a dictionary from `(word, translation)` pairs.
    ///
    /// Keys are lowercased; when two keys collide the later pair wins.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();
        Self { entries }
    }

    /// Parses a JSON object of `"word": "translation"` entries.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| KhulasaError::DictionaryError(e.to_string()))?;

        if let Some(key) = raw.keys().find(|k| k.trim().is_empty()) {
            return Err(KhulasaError::DictionaryError(format!("invalid empty key {:?}", key)));
        }

        Ok(Self::from_pairs(raw))
    }

    /// Loads a dictionary from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KhulasaError::FileNotFound(path.to_path_buf()));
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Built-in table extended (and overridden) by the entries in `path`.
    pub fn extended_from_file(path: &Path) -> Result<Self> {
        let extra = Self::load(path)?;
        let mut merged = Self::builtin().clone();
        merged.entries.extend(extra.entries);
        tracing::debug!(path = %path.display(), entries = merged.len(), "loaded extension dictionary");
        Ok(merged)
    }

    /// Looks up an already-lowercased word.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
