//! UI Components
//!
//! Reusable Leptos components.

mod error_banner;
mod item_row;
mod local_todo;
mod login_form;
mod new_item_form;
mod register_form;
mod suggestion_panel;
mod workout_list;

pub use error_banner::ErrorBanner;
pub use item_row::ItemRow;
pub use local_todo::LocalTodoApp;
pub use login_form::LoginForm;
pub use new_item_form::NewItemForm;
pub use register_form::RegisterForm;
pub use suggestion_panel::SuggestionPanel;
pub use workout_list::WorkoutList;
