pub mod dto;
pub mod web;
