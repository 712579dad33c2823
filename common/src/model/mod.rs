pub mod entry;
pub mod entry_meta;
pub mod form;
pub mod settings;
