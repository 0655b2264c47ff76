//! HTML page handlers.

mod dashboard;
mod home;
mod login;
mod logout;

pub use dashboard::dashboard_handler;
pub use home::home_handler;
pub use login::{
    DEMO_EMAIL, DEMO_PASSWORD, INVALID_EMAIL, LoginForm, login_page_handler,
    login_submit_handler,
};
pub use logout::logout_handler;
