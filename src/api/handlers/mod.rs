//! HTTP request handlers for the redirect endpoint.

pub mod redirect;

pub use redirect::redirect_handler;
