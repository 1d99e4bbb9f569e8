//! Deal state and the components that render it.

mod context;
pub use context::{use_deals, DealsContext, DealsProvider};

mod actions;
pub use actions::{DealActions, VisibilityPopover};

mod badge;
pub use badge::{BackButton, StageBadge};

mod table;
pub use table::DealsTable;

mod kanban;
pub use kanban::KanbanBoard;

mod form;
pub use form::DealFormView;
