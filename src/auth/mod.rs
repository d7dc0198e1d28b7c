//! Authentication for the UnbelievaBoat API.
//!
//! Every request carries the application token verbatim in the
//! `Authorization` header; there is no signing or nonce.

mod token;

pub use token::Token;
