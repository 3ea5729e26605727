//! Index-based selection models for list views.
//!
//! A selection model tracks which indices of an ordered, mutable list are
//! selected, plus a lead (focus) index and an anchor index for range
//! selection. It never sees the list's items: when the host mutates the list
//! it hands the model a [`Permutation`] describing where every old index
//! went.
//!
//! Three models share the [`ListSelection`] contract:
//!
//! - [`SelectionModel`]: multi-select.
//! - [`SingleSelectionModel`]: at most one selected index.
//! - [`CheckSelectModel`]: multi-select with a check-select mode driven by
//!   the selection size.
//!
//! [`SelectionController`] maps decoded pointer and key input onto any of
//! them.

pub mod change;
pub mod check_select;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod model;
pub mod permutation;
pub mod set;
pub mod single;
pub mod traits;

pub use change::{IndexChange, Listener, ListenerId, SelectionChange};
pub use check_select::CheckSelectModel;
pub use config::{ControllerConfig, SelectionConfig};
pub use controller::SelectionController;
pub use error::{Result, SelectionError};
pub use event::{Key, Modifiers, MouseButton, PointerEvent, PointerPhase};
pub use model::SelectionModel;
pub use permutation::Permutation;
pub use set::{SelectionSet, Snapshot};
pub use single::SingleSelectionModel;
pub use traits::ListSelection;
