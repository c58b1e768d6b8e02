pub mod articles;
pub mod carousel;
pub mod comments;
pub mod config;
pub mod constants;
pub mod contact;
pub mod error;
pub mod forms;
pub mod lower_case_string;
pub mod navbar;
pub mod page_compilers;
pub mod site;
pub mod storage;
pub mod theme;
pub mod utils;
pub mod view;
