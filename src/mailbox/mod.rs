//! Generic RFC 2822 mailbox parsing.
//!
//! The grammar lives behind this narrow facade so that its permissive quirks
//! stay in one place: the rest of the crate only sees [`Mailbox::from_str`]
//! and the parsed fields. The grammar accepts both the bare _user@domain_
//! form and the _Display Name \<user@domain\>_ form, and tolerates several
//! technically invalid addresses (underscores in domain labels, over-long
//! local-parts, hyphens at label edges). Callers must not tighten any of
//! that.

mod parsers;

use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use chumsky::prelude::*;

/// A mailbox as the grammar sees it: an optional display name plus the
/// user and domain halves of the addr-spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mailbox {
    pub(crate) name: Option<String>,
    pub(crate) user: String,
    pub(crate) domain: String,
}

impl FromStr for Mailbox {
    type Err = SyntaxError;

    fn from_str(src: &str) -> Result<Mailbox, SyntaxError> {
        // Anchored at both ends: a mailbox followed by anything else (a
        // stray '>', a second address, a comma list) is not a mailbox.
        let (name, (user, domain)) = parsers::mailbox()
            .then_ignore(end())
            .parse(src)
            .map_err(SyntaxError::new)?;

        Ok(Mailbox { name, user, domain })
    }
}

/// Syntax error produced by the mailbox grammar.
///
/// Carries the grammar's own description of the failure; the text is
/// reported verbatim through [`AddressError::Malformed`].
///
/// [`AddressError::Malformed`]: crate::AddressError::Malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    message: String,
}

impl SyntaxError {
    fn new(errors: Vec<Simple<char>>) -> Self {
        let message = errors
            .first()
            .map_or_else(|| String::from("invalid mailbox"), ToString::to_string);
        SyntaxError { message }
    }
}

impl Error for SyntaxError {}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mailbox(src: &str) -> Mailbox {
        src.parse().unwrap_or_else(|err| panic!("{src:?}: {err}"))
    }

    #[test]
    fn bare_address() {
        let mbox = mailbox("kayo@example.com");
        assert_eq!(mbox.name, None);
        assert_eq!(mbox.user, "kayo");
        assert_eq!(mbox.domain, "example.com");
    }

    #[test]
    fn named_address() {
        let mbox = mailbox("Barry Gibbs <bg@example.com>");
        assert_eq!(mbox.name.as_deref(), Some("Barry Gibbs"));
        assert_eq!(mbox.user, "bg");
        assert_eq!(mbox.domain, "example.com");
    }

    #[test]
    fn quoted_display_name() {
        let mbox = mailbox("\"Barry Gibbs\" <bg@example.com>");
        assert_eq!(mbox.name.as_deref(), Some("Barry Gibbs"));
    }

    #[test]
    fn empty_display_name_is_none() {
        // The standalone guards never let this form through, but the grammar
        // itself accepts it.
        let mbox = mailbox("<kayo@example.com>");
        assert_eq!(mbox.name, None);
    }

    #[test]
    fn comment_before_the_address() {
        let mbox = mailbox("(comment)kayo@example.com");
        assert_eq!(mbox.name, None);
        assert_eq!(mbox.user, "kayo");
        assert_eq!(mbox.domain, "example.com");
    }

    #[test]
    fn quoted_local_part() {
        let mbox = mailbox("\"john..doe\"@example.org");
        assert_eq!(mbox.user, "john..doe");
        assert_eq!(mbox.domain, "example.org");
    }

    #[test]
    fn dotless_domain() {
        let mbox = mailbox("admin@mailserver1");
        assert_eq!(mbox.domain, "mailserver1");
    }

    #[test]
    fn tolerated_invalid_forms() {
        // Invalid according to the RFCs and Wikipedia, accepted here.
        mailbox("i_like_underscore@but_its_not_allowed_in_this_part.example.com");
        mailbox("simple@-example.com-");
        mailbox("1234567890123456789012345678901234567890123456789012345678901234+x@example.com");
    }

    #[test]
    fn trailing_input_is_an_error() {
        for src in [
            "simple@example.com>",
            "A@b@c@example.com",
            "a@b.com, c@d.com",
        ] {
            assert!(src.parse::<Mailbox>().is_err(), "{src:?}");
        }
    }

    #[test]
    fn syntax_error_carries_a_message() {
        let err = "Abc.example.com".parse::<Mailbox>().unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
