// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the TinyDNS line parser
//!
//! This module covers:
//! - Parser primitives (type tag, comment stripping, colon splitting)
//! - Line classification in forward and reverse mode
//! - Zone suffix matching
//! - Reverse pointer computation

#[cfg(test)]
mod tests {
    use crate::tinydns_parser::{
        classify_line, is_reverse_pointer, relative_name, reverse_pointer, reverse_relative_name,
        split_fields,
    };
    use crate::tinydns_types::{Classified, NormalizedType, TypeTag, ZoneMode};
    use crate::types::PopulateError;

    fn entry_fields(line: &str, mode: ZoneMode) -> Vec<String> {
        match classify_line(line, mode) {
            Classified::Entry(entry) => entry.fields,
            other => panic!("expected entry for {:?}, got {:?}", line, other),
        }
    }

    // ========== Parsing Primitives ==========

    #[test]
    fn test_parse_type_tag() {
        use crate::tinydns_parser::type_tag;
        assert_eq!(type_tag("+www").unwrap(), ("www", TypeTag::Address));
        assert_eq!(type_tag("=www").unwrap().1, TypeTag::AddressWithPointer);
        assert_eq!(type_tag("Cwww").unwrap().1, TypeTag::Alias);
        assert!(type_tag("Zwww").is_err());
        assert!(type_tag("").is_err());
    }

    #[test]
    fn test_strip_comment() {
        use crate::tinydns_parser::strip_comment;
        assert_eq!(strip_comment("a:b # note").unwrap().1, "a:b ");
        assert_eq!(strip_comment("a:b").unwrap().1, "a:b");
        assert_eq!(strip_comment("#all comment").unwrap().1, "");
    }

    #[test]
    fn test_raw_fields_collapse_colon_runs() {
        use crate::tinydns_parser::raw_fields;
        assert_eq!(raw_fields("a::b:::c").unwrap().1, vec!["a", "b", "c"]);
        assert_eq!(raw_fields("a:").unwrap().1, vec!["a", ""]);
        assert_eq!(raw_fields("").unwrap().1, vec![""]);
    }

    #[test]
    fn test_split_fields_trims_whitespace() {
        assert_eq!(
            split_fields(" www.example.com : 192.0.2.1 :300\r"),
            vec!["www.example.com", "192.0.2.1", "300"]
        );
    }

    // ========== Line Classifier ==========

    #[test]
    fn test_classify_forward_types() {
        let cases = [
            ("=a.example.com:192.0.2.1", NormalizedType::A),
            ("+a.example.com:192.0.2.1", NormalizedType::A),
            ("Ca.example.com:b.example.com", NormalizedType::Cname),
            (".example.com::ns1.example.com", NormalizedType::Ns),
            ("@example.com::mx.example.com:10", NormalizedType::Mx),
        ];

        for (line, expected) in cases {
            match classify_line(line, ZoneMode::Forward) {
                Classified::Entry(entry) => assert_eq!(entry.record_type, expected, "{}", line),
                other => panic!("unexpected {:?} for {}", other, line),
            }
        }
    }

    #[test]
    fn test_classify_forward_ignores_pointer() {
        assert_eq!(
            classify_line("^1.2.0.192.in-addr.arpa:a.example.com", ZoneMode::Forward),
            Classified::Ignored(TypeTag::Pointer)
        );
    }

    #[test]
    fn test_classify_skips_unknown_and_empty() {
        assert_eq!(classify_line("", ZoneMode::Forward), Classified::Skipped);
        assert_eq!(
            classify_line("Zexample.com:ns1.example.com.:hostmaster", ZoneMode::Forward),
            Classified::Skipped
        );
        assert_eq!(
            classify_line("'example.com:v=spf1 -all", ZoneMode::Forward),
            Classified::Skipped
        );
        assert_eq!(classify_line("# comment", ZoneMode::Forward), Classified::Skipped);
    }

    #[test]
    fn test_classify_reverse_mode() {
        match classify_line("=a.example.com:192.0.2.1", ZoneMode::Reverse) {
            Classified::Entry(entry) => assert_eq!(entry.record_type, NormalizedType::Ptr),
            other => panic!("unexpected {:?}", other),
        }
        match classify_line("^1.2.0.192.in-addr.arpa:a.example.com", ZoneMode::Reverse) {
            Classified::Entry(entry) => assert_eq!(entry.record_type, NormalizedType::Ptr),
            other => panic!("unexpected {:?}", other),
        }

        for line in [
            "+a.example.com:192.0.2.1",
            "Ca.example.com:b.example.com",
            ".example.com::ns1.example.com",
            "@example.com::mx.example.com:10",
        ] {
            assert_eq!(classify_line(line, ZoneMode::Reverse), Classified::Skipped);
        }
    }

    #[test]
    fn test_classify_strips_trailing_comment() {
        assert_eq!(
            entry_fields("+a.example.com:192.0.2.1:60 # web server", ZoneMode::Forward),
            vec!["a.example.com", "192.0.2.1", "60"]
        );
    }

    #[test]
    fn test_classify_comment_has_no_escape() {
        // a `#` inside a value still starts the comment
        assert_eq!(
            entry_fields("Ca.example.com:b\\#c.example.com", ZoneMode::Forward),
            vec!["a.example.com", "b\\"]
        );
    }

    #[test]
    fn test_classify_type_only_line() {
        assert_eq!(entry_fields("+", ZoneMode::Forward), vec![""]);
    }

    #[test]
    fn test_classify_mx_with_empty_ip_column() {
        assert_eq!(
            entry_fields("@example.com::mx.example.com:10:300", ZoneMode::Forward),
            vec!["example.com", "mx.example.com", "10", "300"]
        );
    }

    // ========== Name Matcher ==========

    #[test]
    fn test_relative_name() {
        assert_eq!(
            relative_name("www.example.com", "example.com."),
            Some("www".to_string())
        );
        assert_eq!(
            relative_name("a.b.example.com", "example.com."),
            Some("a.b".to_string())
        );
        assert_eq!(relative_name("example.com", "example.com."), Some(String::new()));
    }

    #[test]
    fn test_relative_name_trailing_dot_and_case() {
        assert_eq!(
            relative_name("WWW.Example.COM.", "example.com."),
            Some("www".to_string())
        );
    }

    #[test]
    fn test_relative_name_rejects_empty_labels() {
        assert_eq!(relative_name("a..example.com", "example.com."), None);
        assert_eq!(relative_name("..example.com", "example.com."), None);
        assert_eq!(relative_name(".a.example.com", "example.com."), None);
        assert_eq!(relative_name("a..b.example.com", "example.com."), None);
        assert_eq!(
            relative_name("a.b.example.com", "example.com."),
            Some("a.b".to_string())
        );
    }

    #[test]
    fn test_relative_name_outside_zone() {
        assert_eq!(relative_name("www.example.org", "example.com."), None);
        assert_eq!(relative_name("wwwexample.com", "example.com."), None);
        assert_eq!(relative_name("com", "example.com."), None);
        assert_eq!(relative_name("", "example.com."), None);
        assert_eq!(relative_name(".example.com", "example.com."), None);
    }

    #[test]
    fn test_reverse_relative_name_requires_label() {
        assert_eq!(
            reverse_relative_name("4.3.2.1.in-addr.arpa", "3.2.1.in-addr.arpa."),
            Some("4".to_string())
        );
        assert_eq!(
            reverse_relative_name("3.2.1.in-addr.arpa", "3.2.1.in-addr.arpa."),
            None
        );
        assert_eq!(
            reverse_relative_name("4.3.2.9.in-addr.arpa", "3.2.1.in-addr.arpa."),
            None
        );
    }

    // ========== Reverse-Pointer Resolver ==========

    #[test]
    fn test_reverse_pointer() {
        assert_eq!(reverse_pointer("1.2.3.4").unwrap(), "4.3.2.1.in-addr.arpa");
        assert_eq!(
            reverse_pointer("192.0.2.10").unwrap(),
            "10.2.0.192.in-addr.arpa"
        );
    }

    #[test]
    fn test_reverse_pointer_invalid_address() {
        for bad in ["", "1.2.3", "1.2.3.256", "host.example.com", "2001:db8::1"] {
            match reverse_pointer(bad) {
                Err(PopulateError::InvalidAddress(addr)) => assert_eq!(addr, bad),
                other => panic!("expected InvalidAddress for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_is_reverse_pointer() {
        assert!(is_reverse_pointer("4.3.2.1.in-addr.arpa"));
        assert!(is_reverse_pointer("4.3.2.1.IN-ADDR.ARPA."));
        assert!(!is_reverse_pointer("host.example.com"));
    }
}
