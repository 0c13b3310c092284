pub mod delete_account;
pub mod get_account;
pub mod get_account_details;
pub mod list_accounts;
pub mod purge_account;
pub mod register;
pub mod update_account;
