pub mod add;
pub mod configure;
pub mod done;
pub mod export;
pub mod handlers;
pub mod import;
pub mod logout;
pub mod projects;
pub mod view;
