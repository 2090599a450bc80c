use super::ActionMask;

/// Executable action resolved from the catalog, tagged by the context it
/// belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionHandle<O, B> {
    Overworld(O),
    Battle(B),
}

impl<O, B> ActionHandle<O, B> {
    /// Name of the context this handle executes against.
    pub const fn context(&self) -> &'static str {
        match self {
            Self::Overworld(_) => "overworld",
            Self::Battle(_) => "battle",
        }
    }
}

/// Ordered list of actions legal right now for the active context.
///
/// A catalog is never stored across steps: after any execution the active
/// context may have changed, so callers rebuild it from the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionCatalog<O, B> {
    Overworld(Vec<O>),
    Battle(Vec<B>),
}

impl<O, B> ActionCatalog<O, B> {
    pub fn len(&self) -> usize {
        match self {
            Self::Overworld(actions) => actions.len(),
            Self::Battle(actions) => actions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the context the catalog was built from.
    pub const fn context(&self) -> &'static str {
        match self {
            Self::Overworld(_) => "overworld",
            Self::Battle(_) => "battle",
        }
    }

    /// Legality mask over the fixed index space.
    pub fn mask(&self) -> ActionMask {
        ActionMask::from_catalog_len(self.len())
    }

    /// Consumes the catalog and returns the action at `index`, if any.
    pub fn take(self, index: usize) -> Option<ActionHandle<O, B>> {
        match self {
            Self::Overworld(mut actions) if index < actions.len() => {
                Some(ActionHandle::Overworld(actions.swap_remove(index)))
            }
            Self::Battle(mut actions) if index < actions.len() => {
                Some(ActionHandle::Battle(actions.swap_remove(index)))
            }
            _ => None,
        }
    }
}
