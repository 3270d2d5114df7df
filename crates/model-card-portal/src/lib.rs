//! Model Card Portal
//!
//! Front-end state for the model card registry. Views are plain serializable
//! structs with pure `reduce` transitions; data comes in through
//! [`model_card_client`] and goes out as a [`Panel`] that a renderer
//! switches over.

pub mod card_form;
pub mod detail_view;
pub mod list_view;
pub mod load;
pub mod messages;
pub mod panel;
pub mod render;
pub mod wizard;

#[cfg(test)]
pub(crate) mod testing;

pub use card_form::{CardForm, FormField, FormMode};
pub use detail_view::{DetailAction, DetailTab, DetailView};
pub use list_view::{Effect, ListAction, ListView};
pub use load::{Applied, LoadGuard, LoadState, LoadTicket};
pub use messages::Operation;
pub use panel::Panel;
pub use render::render_panel;
pub use wizard::{CreateWizard, SubmitStage, WizardAction, WizardError, WizardOutcome, WizardStep};
