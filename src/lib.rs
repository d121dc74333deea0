pub mod agenda;
pub mod calendar;
pub mod config;
pub mod diary;
pub mod midas;
pub mod provider;
pub mod stats;
pub mod ui;
