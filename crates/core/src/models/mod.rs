pub mod account;
pub mod advice;
pub mod category;
pub mod document;
pub mod goal;
pub mod settings;
pub mod summary;
pub mod transaction;
