pub mod board;
pub mod buff;
pub mod component;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod fen;
pub mod game;
pub mod piece;
pub mod profile;
pub mod tree;
pub mod validator;
