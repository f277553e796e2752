//! Auth Handlers

pub(crate) mod login;
pub(crate) mod me;
pub(crate) mod refresh;
pub(crate) mod register;
pub(crate) mod token;
