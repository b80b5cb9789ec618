//! Discover which entities a checkpoint log carries pose records for

use crate::checkpoint::{CheckpointLogReader, LogSource};

/// Name of the entity a key refers to, given the suffix it matched.
///
/// This is the dot-delimited segment right before the suffix, so
/// `.gams.frames.p1_base_footprint.origin` with `.origin` yields
/// `p1_base_footprint`.
pub fn entity_name<'k>(key: &'k str, suffix: &str) -> Option<&'k str> {
    let end = key.find(suffix)?;
    key[..end]
        .trim_end_matches('.')
        .rsplit('.')
        .next()
        .filter(|name| !name.is_empty())
}

/// Distinct entity names, in first-seen order, for every key containing
/// one of `suffixes`. Consumes the reader.
pub fn discover_entities<S, T>(reader: CheckpointLogReader<S>, suffixes: &[T]) -> Vec<String>
where
    S: LogSource,
    T: AsRef<str>,
{
    let mut entities: Vec<String> = Vec::new();

    for entry in reader {
        let name = suffixes
            .iter()
            .find_map(|suffix| entity_name(&entry.key, suffix.as_ref()));

        if let Some(name) = name {
            if !entities.iter().any(|e| e == name) {
                tracing::debug!("Discovered entity {:?} from {:?}", name, entry.key);
                entities.push(name.to_string());
            }
        }
    }

    entities
}
