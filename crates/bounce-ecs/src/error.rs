use crate::entity::Entity;

/// Contract violations reported by the world.
///
/// None of these are retryable: they indicate a system used the world
/// incorrectly, and are surfaced to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    #[error("entity {0} is not alive")]
    UnknownEntity(Entity),

    #[error("entity {entity} already has a `{component}` component")]
    DuplicateComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("entity {entity} has no `{component}` component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("element `{0}` already exists")]
    DuplicateElement(&'static str),

    #[error("element `{0}` does not exist")]
    MissingElement(&'static str),
}
