//! Validation of requested byte amounts.
//!
//! Readers accept any primitive integer as an amount so that signed
//! arithmetic on the caller side can be passed straight through. The checks
//! run in a fixed order:
//!
//! 1. a negative amount is [`FetchError::InvalidArgument`];
//! 2. a zero amount always succeeds, even on an exhausted reader;
//! 3. an exhausted reader is [`FetchError::EndOfStream`];
//! 4. an amount above the unread count is [`FetchError::OutOfRange`].

use crate::errors::{FetchError, Result};

/// Converts `amount` to a `usize`, rejecting negative values.
///
/// Values too large for `usize` saturate, since no buffer can satisfy them
/// anyway.
pub(crate) fn to_usize<C>(name: &'static str, amount: C) -> Result<usize>
where
    C: num::PrimInt,
{
    if amount < C::zero() {
        return Err(FetchError::InvalidArgument {
            name,
            value: amount.to_i128().unwrap_or(i128::MIN),
        });
    }
    Ok(amount.to_usize().unwrap_or(usize::MAX))
}

/// Validates a request for `amount` bytes against `available` unread bytes,
/// returning the amount as a `usize`.
pub(crate) fn check_request<C>(name: &'static str, amount: C, available: usize) -> Result<usize>
where
    C: num::PrimInt,
{
    let amount = to_usize(name, amount)?;
    if amount == 0 {
        return Ok(0);
    }
    if available == 0 {
        return Err(FetchError::EndOfStream);
    }
    if amount > available {
        return Err(FetchError::OutOfRange {
            requested: amount,
            available,
        });
    }
    Ok(amount)
}
