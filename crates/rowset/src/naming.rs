//! Column naming policies.
//!
//! A policy computes the exposed name of a result column from its
//! source-table qualifier and its label. Qualified names render as
//! `qualifier/label`; when the driver does not know the source table, the
//! qualifier is the empty string and the rendered name falls back to the
//! bare label.
//!
//! Casing functions are always invoked with a non-null string — an unknown
//! qualifier arrives as `""`, never a sentinel — so they can be written as
//! simple total `&str -> String` functions.
//!
//! Unqualified policies make no attempt to deduplicate colliding labels
//! across joined tables; later columns shadow earlier ones on keyed lookup.
//! This is a documented speed trade-off.

use std::sync::Arc;

/// Casing function applied to one name segment.
pub type Casing = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Ready-made lower-casing function.
pub fn lower() -> Casing {
    Arc::new(|s: &str| s.to_lowercase())
}

/// Ready-made upper-casing function.
pub fn upper() -> Casing {
    Arc::new(|s: &str| s.to_uppercase())
}

/// Configured column-naming policy.
#[derive(Clone, Default)]
pub struct NamingPolicy {
    qualified: bool,
    label_casing: Option<Casing>,
    qualifier_casing: Option<Casing>,
}

impl NamingPolicy {
    /// Qualified names, segments as-is.
    pub fn qualified() -> Self {
        Self {
            qualified: true,
            ..Self::default()
        }
    }

    /// Bare labels, as-is.
    pub fn unqualified() -> Self {
        Self::default()
    }

    /// Qualified names with the same casing applied to both segments
    /// independently.
    pub fn qualified_with(casing: Casing) -> Self {
        Self {
            qualified: true,
            label_casing: Some(casing.clone()),
            qualifier_casing: Some(casing),
        }
    }

    /// Bare labels with casing applied.
    pub fn unqualified_with(casing: Casing) -> Self {
        Self {
            qualified: false,
            label_casing: Some(casing),
            qualifier_casing: None,
        }
    }

    /// Override the label casing only.
    pub fn label_casing(mut self, casing: Casing) -> Self {
        self.label_casing = Some(casing);
        self
    }

    /// Override the qualifier casing only.
    pub fn qualifier_casing(mut self, casing: Casing) -> Self {
        self.qualifier_casing = Some(casing);
        self
    }

    /// Compute the exposed name for a column.
    ///
    /// `qualifier` may be empty (unknown source table); it is still passed
    /// through the qualifier casing function as-is.
    pub fn name_of(&self, qualifier: &str, label: &str) -> String {
        let label = match &self.label_casing {
            Some(f) => f(label),
            None => label.to_string(),
        };
        if !self.qualified {
            return label;
        }
        let qualifier = match &self.qualifier_casing {
            Some(f) => f(qualifier),
            None => qualifier.to_string(),
        };
        if qualifier.is_empty() {
            label
        } else {
            format!("{qualifier}/{label}")
        }
    }
}

impl std::fmt::Debug for NamingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamingPolicy")
            .field("qualified", &self.qualified)
            .field("label_casing", &self.label_casing.is_some())
            .field("qualifier_casing", &self.qualifier_casing.is_some())
            .finish()
    }
}
