//! Equality filters over statement records.

use crate::statement::literal::StatementValue;
use crate::statement::record::TransactionRecord;

/// A conjunction of `field == value` conditions.
///
/// An empty spec matches every record. A condition on a name outside the
/// record schema never matches.
///
/// ```rust
/// use coinsph_api_client::statement::FilterSpec;
///
/// let filters = FilterSpec::new()
///     .with("entry_type", "deposit")
///     .with("status", "done");
/// assert_eq!(filters.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    conditions: Vec<(String, StatementValue)>,
}

impl FilterSpec {
    /// An empty filter that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FilterSpec::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<StatementValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Require `field` to equal `value`, replacing any earlier condition on it.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<StatementValue>) {
        let field = field.into();
        let value = value.into();
        match self.conditions.iter_mut().find(|(f, _)| *f == field) {
            Some(condition) => condition.1 = value,
            None => self.conditions.push((field, value)),
        }
    }

    /// Whether no conditions are set.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Iterate over `(field, value)` conditions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatementValue)> {
        self.conditions.iter().map(|(f, v)| (f.as_str(), v))
    }

    /// Whether every condition holds for `record`.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| record.field(field) == Some(expected))
    }
}

impl<K, V> FromIterator<(K, V)> for FilterSpec
where
    K: Into<String>,
    V: Into<StatementValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut spec = FilterSpec::new();
        for (field, value) in iter {
            spec.insert(field, value);
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::record::TRANSACTION_FIELD_COUNT;
    use rust_decimal::Decimal;

    fn record(entry_type: &str, amount: i64) -> TransactionRecord {
        let mut values = vec![StatementValue::Null; TRANSACTION_FIELD_COUNT];
        values[0] = entry_type.into();
        values[3] = amount.into();
        TransactionRecord::from_values(values).unwrap()
    }

    #[test]
    fn test_empty_spec_matches_everything() {
        assert!(FilterSpec::new().matches(&record("deposit", 1)));
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let spec = FilterSpec::new()
            .with("entry_type", "deposit")
            .with("amount", Decimal::new(50, 0));
        assert!(spec.matches(&record("deposit", 50)));
        assert!(!spec.matches(&record("deposit", 51)));
        assert!(!spec.matches(&record("withdrawal", 50)));
    }

    #[test]
    fn test_null_condition_matches_null_field() {
        let spec = FilterSpec::new().with("order_id", None::<&str>);
        assert!(spec.matches(&record("deposit", 1)));
    }

    #[test]
    fn test_unknown_field_never_matches() {
        let spec = FilterSpec::new().with("not_a_field", StatementValue::Null);
        assert!(!spec.matches(&record("deposit", 1)));
    }

    #[test]
    fn test_insert_replaces_condition() {
        let spec: FilterSpec = [("entry_type", "deposit"), ("entry_type", "withdrawal")]
            .into_iter()
            .collect();
        assert_eq!(spec.len(), 1);
        assert!(spec.matches(&record("withdrawal", 1)));
    }
}
