//! In-process store with Redis semantics for the primitives in `KvStore`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use regex::Regex;

use common::{StoreError, StoreResult};

use super::KvStore;

#[derive(Debug, Clone)]
enum Value {
    Scalar(String),
    Hash(HashMap<String, String>),
}

/// Shared in-memory store.
///
/// Clones share the same data. Keys enumerate in lexicographic order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> StoreResult<MutexGuard<'_, BTreeMap<String, Value>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::connection("memory store lock poisoned"))
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries()?.contains_key(key))
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match self.entries()?.get(key) {
            Some(Value::Scalar(value)) => Ok(Some(value.clone())),
            Some(Value::Hash(_)) => Err(StoreError::WrongType),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries()?
            .insert(key.to_string(), Value::Scalar(value.to_string()));
        Ok(())
    }

    async fn get_hash(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        match self.entries()?.get(key) {
            Some(Value::Hash(fields)) => Ok(fields.clone()),
            Some(Value::Scalar(_)) => Err(StoreError::WrongType),
            None => Ok(HashMap::new()),
        }
    }

    async fn set_hash(&self, key: &str, fields: &HashMap<String, String>) -> StoreResult<()> {
        let mut entries = self.entries()?;
        match entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Hash(HashMap::new()))
        {
            Value::Hash(existing) => {
                existing.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
                Ok(())
            }
            Value::Scalar(_) => Err(StoreError::WrongType),
        }
    }

    async fn increment(&self, key: &str) -> StoreResult<i64> {
        let mut entries = self.entries()?;
        let current = match entries.get(key) {
            Some(Value::Scalar(raw)) => raw
                .parse::<i64>()
                .map_err(|_| StoreError::command("ERR value is not an integer or out of range"))?,
            Some(Value::Hash(_)) => return Err(StoreError::WrongType),
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::command("ERR increment or decrement would overflow"))?;
        entries.insert(key.to_string(), Value::Scalar(next.to_string()));
        Ok(next)
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let matcher = glob_to_regex(pattern)?;
        Ok(self
            .entries()?
            .keys()
            .filter(|key| matcher.is_match(key))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Translate a Redis glob (`*`, `?`, `[...]`, `[^...]`, `\x`) into an
/// anchored regex.
fn glob_to_regex(pattern: &str) -> StoreResult<Regex> {
    let mut out = String::from("(?s)^");
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push_str(&regex::escape(escaped.encode_utf8(&mut [0; 4])));
                }
            }
            '[' => {
                out.push('[');
                let mut closed = false;
                let mut first = true;
                while let Some(c) = chars.next() {
                    match c {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '^' if first => out.push('^'),
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                push_class_char(&mut out, escaped);
                            }
                        }
                        c => push_class_char(&mut out, c),
                    }
                    first = false;
                }
                if !closed {
                    return Err(StoreError::command(format!(
                        "unterminated character class in pattern {:?}",
                        pattern
                    )));
                }
                out.push(']');
            }
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push('$');

    Regex::new(&out)
        .map_err(|e| StoreError::command(format!("invalid pattern {:?}: {}", pattern, e)))
}

fn push_class_char(out: &mut String, c: char) {
    if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
        out.push('\\');
    }
    out.push(c);
}
