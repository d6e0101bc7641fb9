pub mod action;
pub mod error;
pub mod machine;
pub mod state;
pub mod steps;
pub mod validate;

pub use action::WizardAction;
pub use error::{ValidationError, WizardError};
pub use machine::{advance, reduce, retreat};
pub use state::{SourceType, WizardState, WizardStep};
