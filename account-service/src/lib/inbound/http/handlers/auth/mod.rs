pub mod login;
pub mod login_token;
