//! Parsing and validation of standalone email addresses.
//!
//! The goal of this crate is to never classify a valid email address as
//! invalid; this is in contrast to the overly strict email address validation
//! behavior often seen on the Internet. The underlying mailbox grammar
//! accepts certain addresses that are invalid according to the RFCs and
//! Wikipedia (underscores in domain labels, local-parts over 64 characters,
//! hyphens at the edges of domain labels), and so does this crate.
//!
//! The mailbox grammar itself also accepts addresses of the form
//! _Barry Gibbs \<bg@example.com\>_ (display name and email address). This
//! crate accepts only the bare address form (_bg@example.com_) and reports
//! everything else with a specific [`AddressError`].
//!
//! # Examples
//!
//! ```
//! use emailaddress::Address;
//!
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! let address = "user.name+tag@example.com".parse::<Address>()?;
//! assert_eq!(address.local_part(), "user.name+tag");
//! assert_eq!(address.domain(), "example.com");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs, unsafe_code)]

mod address;
mod mailbox;

pub use crate::{
    address::{Address, AddressError},
    mailbox::SyntaxError,
};

/// Parses an email address into its local-part and domain.
///
/// No trimming is performed on the input: most callers will want to use
/// [`str::trim`] before invoking this function.
///
/// # Examples
///
/// ```
/// let address = emailaddress::parse("simple@example.com").unwrap();
/// assert_eq!(address.local_part(), "simple");
/// assert_eq!(address.domain(), "example.com");
/// ```
pub fn parse(email: &str) -> Result<Address, AddressError> {
    let result = email.parse();

    #[cfg(feature = "tracing")]
    if let Err(error) = &result {
        tracing::debug!("rejected email address: {}", error);
    }

    result
}

/// Returns whether the email address is of valid format.
///
/// Shorthand for `parse(email).is_ok()`: true exactly when [`parse`] reports
/// no error. Most callers will want to use [`str::trim`] before invoking this
/// function.
///
/// # Examples
///
/// ```
/// assert!(emailaddress::is_valid("simple@example.com"));
/// assert!(!emailaddress::is_valid("Barry Gibbs <bg@example.com>"));
/// ```
pub fn is_valid(email: &str) -> bool {
    parse(email).is_ok()
}
