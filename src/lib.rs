//! Chirpy - a small microblogging service.
//!
//! Users register with an email and password, log in for a signed bearer
//! token, and post short "chirps" that are screened for banned words.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod moderation;
pub mod web;

pub use auth::{CredentialHasher, TokenService};
pub use config::Config;
pub use db::{Chirp, ChirpRepository, Database, NewChirp, NewUser, User, UserRepository};
pub use error::{ChirpyError, Result};
pub use web::WebServer;
