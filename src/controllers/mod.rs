pub mod auth;
pub mod books;
pub mod colleges;
pub mod papers;
pub mod settings;
mod store;
pub mod users;

pub use auth::AuthController;
pub use books::BooksController;
pub use colleges::CollegesController;
pub use papers::PapersController;
pub use settings::SettingsController;
pub use users::UsersController;
