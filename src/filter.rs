//! Stack filter compiler: `key=value` tokens to list-request query parameters.

use std::collections::BTreeMap;
use tracing::debug;

/// Keys with this prefix address nested operation fields and keep their case.
pub const OPERATION_PREFIX: &str = "latestOperation";

/// Alias accepted for the operation initiator.
const INITIATOR_ALIAS: &str = "initiator";

/// Compile raw filter tokens into a query-parameter mapping.
///
/// Tokens that do not split into exactly one key and one value are dropped. Keys
/// are lower-cased unless they start with [`OPERATION_PREFIX`], `initiator` is
/// rewritten to `latestOperation.initiator`, and later duplicates win. Values are
/// passed through untouched.
pub fn compile_filters<I, S>(tokens: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut query = BTreeMap::new();
    for token in tokens {
        let token = token.as_ref();
        let parts: Vec<&str> = token.split('=').collect();
        if parts.len() != 2 {
            debug!(token, "Dropping malformed filter token");
            continue;
        }
        query.insert(normalize_key(parts[0]), parts[1].to_string());
    }
    query
}

fn normalize_key(raw: &str) -> String {
    if raw.starts_with(OPERATION_PREFIX) {
        return raw.to_string();
    }
    let key = raw.to_lowercase();
    if key == INITIATOR_ALIAS {
        format!("{}.{}", OPERATION_PREFIX, INITIATOR_ALIAS)
    } else {
        key
    }
}
