pub mod header;
pub mod loading_bar;
pub mod filter_bar;
pub mod pagination;
pub mod procesos_table;
pub mod procesos;
