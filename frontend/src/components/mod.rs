pub mod dashboard;
pub mod data_table;
pub mod forgot_password_page;
pub mod home;
pub mod login_page;
pub mod media_update;
pub mod navigation;
pub mod reset_password_page;
pub mod send_mail;
pub mod services_manager;
pub mod toast;
pub mod transactions;
pub mod users;
