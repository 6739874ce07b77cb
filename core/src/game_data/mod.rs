//! Display names for raw log identifiers.
//!
//! The engine never interprets names itself; it asks a [`NameResolver`]
//! supplied at construction. [`BuiltinNames`] ships the bundled tables.

mod drops;
mod enemies;

pub use drops::drop_display_name;
pub use enemies::enemy_display_name;

/// Maps raw identifiers to display names, one method per domain.
///
/// Every method defaults to returning the identifier unchanged.
pub trait NameResolver {
    /// `raw` is the agent identifier as logged, instance digits included.
    fn enemy_name(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn drop_name(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn animal_name(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Raw identifiers, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNames;

impl NameResolver for IdentityNames {}

/// The bundled enemy and drop tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinNames;

impl NameResolver for BuiltinNames {
    fn enemy_name(&self, raw: &str) -> String {
        enemy_display_name(raw)
    }

    fn drop_name(&self, raw: &str) -> String {
        drop_display_name(raw)
    }
}

type NameFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// A resolver assembled from closures. Domains without one fall back to the
/// raw identifier.
#[derive(Default)]
pub struct FnNames {
    enemy: Option<NameFn>,
    drop: Option<NameFn>,
    animal: Option<NameFn>,
}

impl FnNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enemy(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.enemy = Some(Box::new(f));
        self
    }

    pub fn with_drop(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.drop = Some(Box::new(f));
        self
    }

    pub fn with_animal(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.animal = Some(Box::new(f));
        self
    }
}

impl NameResolver for FnNames {
    fn enemy_name(&self, raw: &str) -> String {
        self.enemy.as_ref().map_or_else(|| raw.to_string(), |f| f(raw))
    }

    fn drop_name(&self, raw: &str) -> String {
        self.drop.as_ref().map_or_else(|| raw.to_string(), |f| f(raw))
    }

    fn animal_name(&self, raw: &str) -> String {
        self.animal.as_ref().map_or_else(|| raw.to_string(), |f| f(raw))
    }
}

impl std::fmt::Debug for FnNames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnNames")
            .field("enemy", &self.enemy.is_some())
            .field("drop", &self.drop.is_some())
            .field("animal", &self.animal.is_some())
            .finish()
    }
}
