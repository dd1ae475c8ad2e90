//! Address-bar driven navigation.
//!
//! ```text
//! NavigationStateMachine (cb-core)
//!   ├── State:  NoSelection | Selected(type, id)
//!   ├── Event:  ItemPicked | LocationChanged
//!   └── Action: Show { key, record_history }
//!
//! NavigationController (cb-app)
//!   ├── receives user picks and history changes
//!   ├── feeds them to the state machine
//!   └── executes actions (resolve, project, push history)
//! ```

mod deep_link;
mod state_machine;

pub use deep_link::{location_with_selection, selection_from_location, ID_PARAM, TYPE_PARAM};
pub use state_machine::{
    NavigationAction, NavigationEvent, NavigationState, NavigationStateMachine,
};
