//! Address parsing for envelope commands and headers.

/// An address split into its envelope and header forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedAddress {
    /// Angle-bracket wrapped bare address for `MAIL FROM` / `RCPT TO`.
    pub envelope: String,
    /// Form written into the `From:` / `To:` header.
    pub header: String,
}

impl ParsedAddress {
    /// Parses a free-form address.
    ///
    /// `"Display Name <user@host>"` keeps the whole string as the header form
    /// and uses `<user@host>` on the envelope. Anything else is treated as a
    /// bare address and wrapped in angle brackets for both.
    ///
    /// No syntax validation beyond that shape check is performed.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        match split_display_name(input) {
            Some(inner) => Self {
                envelope: format!("<{inner}>"),
                header: input.to_string(),
            },
            None => {
                let wrapped = format!("<{input}>");
                Self {
                    envelope: wrapped.clone(),
                    header: wrapped,
                }
            }
        }
    }
}

/// Returns the bracketed part of `"prefix <inner>"`, if the input has that shape.
fn split_display_name(input: &str) -> Option<&str> {
    let body = input.strip_suffix('>')?;
    let open = body.rfind(" <")?;
    if open == 0 {
        return None;
    }
    Some(&body[open + 2..])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_name_form() {
        let parsed = ParsedAddress::parse("Deno Land <root@deno.land>");
        assert_eq!(parsed.envelope, "<root@deno.land>");
        assert_eq!(parsed.header, "Deno Land <root@deno.land>");
    }

    #[test]
    fn test_bare_address() {
        let parsed = ParsedAddress::parse("root@deno.land");
        assert_eq!(parsed.envelope, "<root@deno.land>");
        assert_eq!(parsed.header, "<root@deno.land>");
    }

    #[test]
    fn test_bracketed_without_display_name() {
        // No prefix before the space, so this is not the display-name form.
        let parsed = ParsedAddress::parse(" <root@deno.land>");
        assert_eq!(parsed.envelope, "< <root@deno.land>>");
    }

    #[test]
    fn test_trailing_text_after_bracket() {
        let parsed = ParsedAddress::parse("Name <a@b.c> extra");
        assert_eq!(parsed.envelope, "<Name <a@b.c> extra>");
    }

    #[test]
    fn test_last_bracket_wins() {
        let parsed = ParsedAddress::parse("A <x> B <a@b.c>");
        assert_eq!(parsed.envelope, "<a@b.c>");
        assert_eq!(parsed.header, "A <x> B <a@b.c>");
    }

    proptest! {
        #[test]
        fn prop_display_name_envelope_is_bracketed_address(
            name in "[A-Za-z][A-Za-z ]{0,20}",
            local in "[a-z0-9._]{1,16}",
            domain in "[a-z0-9]{1,12}\\.[a-z]{2,6}",
        ) {
            let addr = format!("{local}@{domain}");
            let input = format!("{name} <{addr}>");
            let parsed = ParsedAddress::parse(&input);
            prop_assert_eq!(&parsed.envelope, &format!("<{addr}>"));
            prop_assert!(!parsed.envelope.contains(' '));
            prop_assert_eq!(parsed.header, input);
        }

        #[test]
        fn prop_bare_address_wrapped(
            local in "[a-z0-9._]{1,16}",
            domain in "[a-z0-9]{1,12}\\.[a-z]{2,6}",
        ) {
            let addr = format!("{local}@{domain}");
            let parsed = ParsedAddress::parse(&addr);
            prop_assert_eq!(&parsed.envelope, &format!("<{addr}>"));
            prop_assert_eq!(&parsed.header, &parsed.envelope);
            prop_assert!(!parsed.envelope.contains(' '));
        }
    }
}
