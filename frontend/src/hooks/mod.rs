pub mod use_media;
pub mod use_services;
pub mod use_session;
pub mod use_table_state;
pub mod use_toast;
pub mod use_transactions;
pub mod use_users;
