//! Representation of a standalone email address

use std::{
    error::Error,
    ffi::OsStr,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::mailbox::{Mailbox, SyntaxError};

/// A validated standalone email address, split into local-part and domain.
///
/// The address is kept exactly as it was supplied: on success,
/// `local_part() + "@" + domain()` reassembles the input character for
/// character, and the split point is the last `@` of the input.
///
/// # Examples
///
/// You can create an `Address` by parsing a string:
///
/// ```
/// use emailaddress::Address;
///
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let address = "user@email.com".parse::<Address>()?;
/// assert_eq!(address.local_part(), "user");
/// assert_eq!(address.domain(), "email.com");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Address {
    /// Complete address
    serialized: String,
    /// Index into `serialized` of the last '@'
    at_start: usize,
}

impl Address {
    /// Gets the local-part of the `Address`, everything before the last `@`.
    ///
    /// # Examples
    ///
    /// ```
    /// use emailaddress::Address;
    ///
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// let address = "\"john..doe\"@example.org".parse::<Address>()?;
    /// assert_eq!(address.local_part(), "\"john..doe\"");
    /// # Ok(())
    /// # }
    /// ```
    pub fn local_part(&self) -> &str {
        &self.serialized[..self.at_start]
    }

    /// Gets the domain of the `Address`, everything after the last `@`.
    ///
    /// # Examples
    ///
    /// ```
    /// use emailaddress::Address;
    ///
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// let address = "user@email.com".parse::<Address>()?;
    /// assert_eq!(address.domain(), "email.com");
    /// # Ok(())
    /// # }
    /// ```
    pub fn domain(&self) -> &str {
        &self.serialized[self.at_start + 1..]
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.serialized)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(val: &str) -> Result<Self, AddressError> {
        let at_start = check_address(val)?;
        Ok(Address {
            serialized: val.into(),
            at_start,
        })
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(serialized: String) -> Result<Self, AddressError> {
        let at_start = check_address(&serialized)?;
        Ok(Address {
            serialized,
            at_start,
        })
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.serialized
    }
}

impl AsRef<OsStr> for Address {
    fn as_ref(&self) -> &OsStr {
        self.serialized.as_ref()
    }
}

fn check_address(val: &str) -> Result<usize, AddressError> {
    // No implicit trimming: callers that want it must trim beforehand.
    if val.trim().len() != val.len() {
        return Err(AddressError::SurroundingWhitespace);
    }

    // The grammar treats `<addr>` as an address with an empty display name;
    // the standalone contract only covers the bare address token.
    if val.starts_with('<') && val.ends_with('>') {
        return Err(AddressError::AngleBrackets);
    }

    let mailbox = val.parse::<Mailbox>().map_err(AddressError::Malformed)?;

    if mailbox.name.is_some() {
        return Err(AddressError::NotStandalone);
    }

    // The grammar guarantees at least one '@' in anything it accepts. The
    // split works on the original input, not on what the grammar produced.
    match val.rfind('@') {
        Some(at_start) => Ok(at_start),
        None => unreachable!("mailbox grammar accepted {val:?} without an '@'"),
    }
}

/// Errors in email address validation
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AddressError {
    /// Leading or trailing whitespace around the address
    SurroundingWhitespace,
    /// Address wrapped in angle brackets
    AngleBrackets,
    /// The mailbox grammar rejected the address
    Malformed(SyntaxError),
    /// A display name accompanied the address
    NotStandalone,
}

impl Error for AddressError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AddressError::Malformed(inner) => Some(inner),
            _ => None,
        }
    }
}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AddressError::SurroundingWhitespace => {
                f.write_str("white space around email address")
            }
            AddressError::AngleBrackets => f.write_str("angle brackets around email address"),
            AddressError::Malformed(inner) => write!(f, "failed to parse address: {inner}"),
            AddressError::NotStandalone => f.write_str("not standalone email address"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn simple_address() {
        let addr = "simple@example.com".parse::<Address>().unwrap();
        assert_eq!(addr.local_part(), "simple");
        assert_eq!(addr.domain(), "example.com");
        assert_eq!(addr.to_string(), "simple@example.com");
    }

    #[test]
    fn splits_at_the_last_at_sign() {
        let addr = "user%example.com@example.org".parse::<Address>().unwrap();
        assert_eq!(addr.local_part(), "user%example.com");
        assert_eq!(addr.domain(), "example.org");
    }

    #[test]
    fn quoted_local_part_keeps_its_quotes() {
        let addr = "\" \"@example.org".parse::<Address>().unwrap();
        assert_eq!(addr.local_part(), "\" \"");
        assert_eq!(addr.domain(), "example.org");
    }

    #[test]
    fn try_from_string() {
        let addr = Address::try_from(String::from("simple@example.com")).unwrap();
        assert_eq!(addr.local_part(), "simple");
        assert_eq!(addr.domain(), "example.com");
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        for val in [" ", " simple@example.com", "simple@example.com ", " simple@example.com "] {
            assert_eq!(
                val.parse::<Address>().unwrap_err(),
                AddressError::SurroundingWhitespace,
                "{val:?}",
            );
        }
    }

    #[test]
    fn rejects_angle_brackets() {
        for val in ["<simple@example.com>", "<<simple@example.com>>"] {
            assert_eq!(
                val.parse::<Address>().unwrap_err(),
                AddressError::AngleBrackets,
                "{val:?}",
            );
        }
    }

    #[test]
    fn rejects_display_name() {
        assert_eq!(
            "Barry Gibbs <bg@example.com>".parse::<Address>().unwrap_err(),
            AddressError::NotStandalone,
        );
    }

    #[test]
    fn rejects_grammar_errors() {
        let err = "Abc.example.com".parse::<Address>().unwrap_err();
        assert!(matches!(err, AddressError::Malformed(_)), "{err:?}");
        assert!(err.to_string().starts_with("failed to parse address: "));
    }

    #[test]
    fn whitespace_guard_precedes_the_grammar() {
        // Malformed in more than one way, but the first guard decides.
        assert_eq!(
            " not an address ".parse::<Address>().unwrap_err(),
            AddressError::SurroundingWhitespace,
        );
    }

    #[test]
    fn malformed_error_exposes_its_source() {
        let err = "Abc.example.com".parse::<Address>().unwrap_err();
        assert!(err.source().is_some());
        assert!(AddressError::NotStandalone.source().is_none());
    }
}
