pub mod advisor_service;
pub mod ledger_service;
pub mod notifier;
pub mod summary_service;
