//! different utility modules used throughout the project
/// logging setup and csv input/output of data and trails
pub mod logger;
/// png plots of graph trails
pub mod plots;
/// engine settings from defaults, task documents or TOML files
pub mod settings;
/// tables of solutions and features for the terminal
pub mod summary_table;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
