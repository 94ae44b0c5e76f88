//! Client-side state on top of the API client.
//!
//! Four small pieces:
//! - [`AuthSession`]: anonymous/authenticated state, loaded from the store
//!   and moved by sign-in and sign-out.
//! - [`CartSession`]: owns the durable cart code and a local mirror of the
//!   server cart; mutations hit the backend first and touch the mirror only
//!   on success.
//! - [`guard_signed_in`] / [`guard_admin`]: route guards that either allow
//!   or redirect to sign-in with the attempted path attached.
//! - [`Debouncer`]: 500 ms input coalescing for interactive search.

mod auth;
mod cart;
mod debounce;
mod error;
mod guard;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::{AuthSession, AuthState};
pub use cart::CartSession;
pub use debounce::{Debouncer, DEBOUNCE_DELAY};
pub use error::SessionError;
pub use guard::{guard_admin, guard_signed_in, GuardOutcome, SIGNIN_ROUTE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        guard_admin, guard_signed_in, AuthSession, AuthState, CartSession, Debouncer,
        GuardOutcome, SessionError,
    };
}
