pub mod abbrevs;
pub mod build;
pub mod dispatch;
pub mod info;
pub mod search;
pub mod show;
