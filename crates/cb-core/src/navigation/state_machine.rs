use tracing::debug;

use crate::catalog::ItemKey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavigationState {
    #[default]
    NoSelection,
    Selected { key: ItemKey },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// The user picked an item from a listing or a reference.
    ItemPicked { key: ItemKey },
    /// The location changed outside the controller: initial load or back/forward.
    /// `target` is `None` when the location does not carry both parameters.
    LocationChanged { target: Option<ItemKey> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Resolve `key`, project it and make it the visible selection.
    Show { key: ItemKey, record_history: bool },
}

pub struct NavigationStateMachine;

impl NavigationStateMachine {
    pub fn transition(
        state: NavigationState,
        event: NavigationEvent,
    ) -> (NavigationState, Vec<NavigationAction>) {
        let (next, actions) = match (state, event) {
            (_, NavigationEvent::ItemPicked { key }) => (
                NavigationState::Selected { key: key.clone() },
                vec![NavigationAction::Show {
                    key,
                    record_history: true,
                }],
            ),
            (_, NavigationEvent::LocationChanged { target: Some(key) }) => (
                NavigationState::Selected { key: key.clone() },
                vec![NavigationAction::Show {
                    key,
                    record_history: false,
                }],
            ),
            // No complete selection in the location: nothing is selected any
            // more, but the last view stays on screen.
            (_, NavigationEvent::LocationChanged { target: None }) => {
                (NavigationState::NoSelection, Vec::new())
            }
        };

        debug!(state = ?next, actions = actions.len(), "navigation transition");
        (next, actions)
    }
}
