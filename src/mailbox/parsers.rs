//! RFC 2822 mailbox grammar, including the obsolete addressing forms.
//!
//! Rule names and structure follow the RFC sections they implement. The only
//! entry point is [`mailbox`]; everything else is an internal rule.

use chumsky::prelude::*;

// Core rules
// https://datatracker.ietf.org/doc/html/rfc2234#section-6.1

// CRLF           =  CR LF
//                        ; Internet standard newline
fn crlf() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    just('\r').chain(just('\n'))
}

// WSP            =  SP / HTAB
//                        ; white space
fn wsp() -> impl Parser<char, char, Error = Simple<char>> {
    one_of([' ', '\t'])
}

// Primitive tokens
// https://datatracker.ietf.org/doc/html/rfc2822#section-3.2.1

// NO-WS-CTL       =       %d1-8 /         ; US-ASCII control characters
//                         %d11 /          ;  that do not include the
//                         %d12 /          ;  carriage return, line feed,
//                         %d14-31 /       ;  and white space characters
//                         %d127
fn no_ws_ctl() -> impl Parser<char, char, Error = Simple<char>> {
    filter(|c: &char| matches!(u32::from(*c), 1..=8 | 11 | 12 | 14..=31 | 127))
}

// text            =       %d1-9 /         ; Characters excluding CR and LF
//                         %d11 /
//                         %d12 /
//                         %d14-127
fn text() -> impl Parser<char, char, Error = Simple<char>> {
    filter(|c: &char| matches!(u32::from(*c), 1..=9 | 11 | 12 | 14..=127))
}

// Quoted characters
// https://datatracker.ietf.org/doc/html/rfc2822#section-3.2.2

// quoted-pair     =       ("\" text) / obs-qp
fn quoted_pair() -> impl Parser<char, char, Error = Simple<char>> {
    choice((just('\\').ignore_then(text()), obs_qp()))
}

// Folding white space and comments
// https://datatracker.ietf.org/doc/html/rfc2822#section-3.2.3

// FWS             =       ([*WSP CRLF] 1*WSP) /   ; Folding white space
//                         obs-FWS
fn fws() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    // NOTE: obs-FWS leads to recursion, skipping it
    wsp()
        .repeated()
        .chain::<char, _, _>(crlf())
        .or_not()
        .flatten()
        .chain::<char, _, _>(wsp().repeated().at_least(1))
}

// ctext           =       NO-WS-CTL /     ; Non white space controls
//
//                         %d33-39 /       ; The rest of the US-ASCII
//                         %d42-91 /       ;  characters not including "(",
//                         %d93-126        ;  ")", or "\"
fn ctext() -> impl Parser<char, char, Error = Simple<char>> {
    filter(|c: &char| matches!(u32::from(*c), 33..=39 | 42..=91 | 93..=126))
}

// comment         =       "(" *([FWS] ccontent) [FWS] ")"
fn comment() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    recursive(|comment| {
        // ccontent = ctext / quoted-pair / comment
        let ccontent = choice((
            ctext().repeated().exactly(1),
            quoted_pair().repeated().exactly(1),
            comment,
        ));

        fws()
            .or_not()
            .ignore_then(ccontent)
            .repeated()
            .flatten()
            .then_ignore(fws().or_not())
            .delimited_by(just('(').ignored(), just(')').ignored())
    })
}

// CFWS            =       *([FWS] comment) (([FWS] comment) / FWS)
fn cfws() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    fws().or(fws()
        .or_not()
        .flatten()
        .chain::<char, _, _>(comment())
        .repeated()
        .at_least(1)
        .flatten()
        .chain::<char, _, _>(fws().or_not().flatten()))
}

// Atom
// https://datatracker.ietf.org/doc/html/rfc2822#section-3.2.4

// atext           =       ALPHA / DIGIT / ; Any character except controls,
//                         "!" / "#" /     ;  SP, and specials.
//                         "$" / "%" /     ;  Used for atoms
//                         "&" / "'" /
//                         "*" / "+" /
//                         "-" / "/" /
//                         "=" / "?" /
//                         "^" / "_" /
//                         "`" / "{" /
//                         "|" / "}" /
//                         "~"
fn atext() -> impl Parser<char, char, Error = Simple<char>> {
    filter(|c: &char| c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(*c))
}

// atom            =       [CFWS] 1*atext [CFWS]
fn atom() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    cfws()
        .or_not()
        .ignore_then(atext().repeated().at_least(1))
        .then_ignore(cfws().or_not())
}

// dot-atom        =       [CFWS] dot-atom-text [CFWS]
fn dot_atom() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    cfws()
        .or_not()
        .ignore_then(dot_atom_text())
        .then_ignore(cfws().or_not())
}

// dot-atom-text   =       1*atext *("." 1*atext)
fn dot_atom_text() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    atext().repeated().at_least(1).chain(
        just('.')
            .chain(atext().repeated().at_least(1))
            .repeated()
            .at_least(1)
            .flatten(),
    )
}

// Quoted strings
// https://datatracker.ietf.org/doc/html/rfc2822#section-3.2.5

// qtext           =       NO-WS-CTL /     ; Non white space controls
//
//                         %d33 /          ; The rest of the US-ASCII
//                         %d35-91 /       ;  characters not including "\"
//                         %d93-126        ;  or the quote character
fn qtext() -> impl Parser<char, char, Error = Simple<char>> {
    filter(|c: &char| matches!(u32::from(*c), 33 | 35..=91 | 93..=126))
}

// qcontent        =       qtext / quoted-pair
fn qcontent() -> impl Parser<char, char, Error = Simple<char>> {
    choice((qtext(), quoted_pair()))
}

// quoted-string   =       [CFWS]
//                         DQUOTE *([FWS] qcontent) [FWS] DQUOTE
//                         [CFWS]
fn quoted_string() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    cfws()
        .or_not()
        .ignore_then(fws().or_not().ignore_then(qcontent()).repeated())
        .then_ignore(fws().or_not())
        .delimited_by(just('"').ignored(), just('"').ignored())
        .collect()
}

// Miscellaneous tokens
// https://datatracker.ietf.org/doc/html/rfc2822#section-3.2.6

// word            =       atom / quoted-string
fn word() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    choice((atom(), quoted_string()))
}

// Address specification
// https://datatracker.ietf.org/doc/html/rfc2822#section-3.4

// mailbox         =       name-addr / addr-spec
pub(super) fn mailbox(
) -> impl Parser<char, (Option<String>, (String, String)), Error = Simple<char>> {
    choice((addr_spec().map(|addr| (None, addr)), name_addr()))
}

// name-addr       =       [display-name] angle-addr
fn name_addr() -> impl Parser<char, (Option<String>, (String, String)), Error = Simple<char>> {
    // NOTE: display-name does not follow the RFC here in order to be
    // more flexible.
    cfws().or_not().ignore_then(just('"').or_not()).ignore_then(
        take_until(just('"').or_not().ignore_then(angle_addr())).map(|(display_name, address)| {
            (
                if display_name.is_empty() {
                    None
                } else {
                    Some(String::from_iter(display_name))
                },
                address,
            )
        }),
    )
}

// angle-addr      =       [CFWS] "<" addr-spec ">" [CFWS] / obs-angle-addr
fn angle_addr() -> impl Parser<char, (String, String), Error = Simple<char>> {
    cfws()
        .or_not()
        .ignore_then(addr_spec().delimited_by(just('<').ignored(), just('>').ignored()))
        .then_ignore(cfws().or_not())
}

// Addr-spec specification
// https://datatracker.ietf.org/doc/html/rfc2822#section-3.4.1

// addr-spec       =       local-part "@" domain
fn addr_spec() -> impl Parser<char, (String, String), Error = Simple<char>> {
    local_part()
        .collect()
        .then_ignore(just('@'))
        .then(domain().collect())
}

// local-part      =       dot-atom / quoted-string / obs-local-part
fn local_part() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    choice((dot_atom(), quoted_string(), obs_local_part()))
}

// domain          =       dot-atom / domain-literal / obs-domain
fn domain() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    choice((dot_atom(), domain_literal(), obs_domain()))
}

// domain-literal  =       [CFWS] "[" *([FWS] dcontent) [FWS] "]" [CFWS]
fn domain_literal() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    cfws()
        .or_not()
        .ignore_then(
            fws()
                .or_not()
                .ignore_then(dcontent())
                .repeated()
                .then_ignore(fws().or_not())
                .delimited_by(just('[').ignored(), just(']').ignored()),
        )
        .then_ignore(cfws().or_not())
}

// dcontent        =       dtext / quoted-pair
fn dcontent() -> impl Parser<char, char, Error = Simple<char>> {
    choice((dtext(), quoted_pair()))
}

// dtext           =       NO-WS-CTL /     ; Non white space controls
//
//                         %d33-90 /       ; The rest of the US-ASCII
//                         %d94-126        ;  characters not including "[",
//                                         ;  "]", or "\"
fn dtext() -> impl Parser<char, char, Error = Simple<char>> {
    choice((
        no_ws_ctl(),
        filter(|c: &char| matches!(u32::from(*c), 33..=90 | 94..=126)),
    ))
}

// Miscellaneous obsolete tokens
// https://datatracker.ietf.org/doc/html/rfc2822#section-4.1

// obs-qp          =       "\" (%d0-127)
fn obs_qp() -> impl Parser<char, char, Error = Simple<char>> {
    just('\\').ignore_then(filter(|c: &char| u32::from(*c) <= 127))
}

// Obsolete addressing
// https://datatracker.ietf.org/doc/html/rfc2822#section-4.4

// obs-local-part  =       word *("." word)
fn obs_local_part() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    word().chain(just('.').chain(word()).repeated().flatten())
}

// obs-domain      =       atom *("." atom)
fn obs_domain() -> impl Parser<char, Vec<char>, Error = Simple<char>> {
    atom().chain(just('.').chain(atom()).repeated().flatten())
}
