//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use crate::parser::{Error, HeaderCursor, HttpRequest, Method, parse_request};

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.0\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.method, Method::GET);
        assert_eq!(result.target, "/index.html");
        assert_eq!(result.version, "HTTP/1.0");
        assert_eq!(result.get_header("Host").unwrap(), "example.com");
    }

    #[test]
    fn test_parse_request_without_headers() {
        let result = parse_request(b"HEAD / HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::HEAD);
        assert_eq!(result.target, "/");
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_head_section_without_blank_line() {
        // The connection reader may hand over the head up to the last header's CRLF.
        let result = parse_request(b"GET / HTTP/1.0\r\nAccept: */*\r\n").unwrap();
        assert_eq!(result.headers.len(), 1);
    }

    #[test]
    fn test_bytes_after_blank_line_are_ignored() {
        let request = b"GET / HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello";
        let result = parse_request(request).unwrap();
        assert_eq!(result.headers.len(), 1);
        assert_eq!(result.content_length(), Some(5));
    }

    #[test]
    fn test_unsupported_methods_are_classified_not_rejected() {
        let result = parse_request(b"POST / HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::Other("POST".to_string()));
        assert!(!result.method.is_supported());

        // Method tokens are case-sensitive
        let result = parse_request(b"get / HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.method, Method::Other("get".to_string()));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!(Method::HEAD.to_string(), "HEAD");
        assert_eq!(Method::Other("DELETE".to_string()).to_string(), "DELETE");
    }

    #[test]
    fn test_empty_request() {
        let result = parse_request(b"");
        assert!(matches!(result, Err(Error::EmptyRequest)));
    }

    #[test]
    fn test_request_line_without_crlf() {
        let result = parse_request(b"GET / HTTP/1.0");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_incomplete_request_line() {
        for request in [
            &b"GET\r\n\r\n"[..],
            b"GET /index.html\r\n\r\n",
            b"GET /index.html \r\n\r\n",
            b" /index.html HTTP/1.0\r\n\r\n",
            b"GET  HTTP/1.0\r\n\r\n",
            b"GET / HTTP/1.0 extra\r\n\r\n",
        ] {
            let result = parse_request(request);
            assert!(
                matches!(result, Err(Error::MalformedRequestLine(_))),
                "expected malformed request line for {:?}",
                String::from_utf8_lossy(request)
            );
        }
    }

    #[test]
    fn test_header_without_separator() {
        let result = parse_request(b"GET / HTTP/1.0\r\nInvalidHeader\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedHeaderLine(ref l)) if l == "InvalidHeader"));

        // The separator is colon followed by a space
        let result = parse_request(b"GET / HTTP/1.0\r\nHost:example.com\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedHeaderLine(_))));
    }

    #[test]
    fn test_unterminated_header_line() {
        let result = parse_request(b"GET / HTTP/1.0\r\nHost: example.com");
        assert!(matches!(result, Err(Error::MalformedHeaderLine(ref l)) if l == "Host: example.com"));
    }

    #[test]
    fn test_invalid_utf8() {
        let result = parse_request(b"GET / HTTP/1.0\r\nX-Test: \xFF\xFE\r\n\r\n");
        assert!(matches!(result, Err(Error::InvalidEncoding)));
    }

    #[test]
    fn test_duplicate_headers_are_preserved_in_order() {
        let request = b"GET / HTTP/1.0\r\nX-Test: value1\r\nx-test: value2\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.get_header("X-TEST").unwrap(), "value1");
        let all: Vec<&str> = result.get_headers("x-Test").collect();
        assert_eq!(all, vec!["value1", "value2"]);
        // Names are stored verbatim
        assert_eq!(result.headers[1].0, "x-test");
    }

    #[test]
    fn test_header_value_with_colons() {
        let request = b"GET / HTTP/1.0\r\nReferer: http://example.com:8080/\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result.get_header("referer").unwrap(), "http://example.com:8080/");
    }

    #[test]
    fn test_target_path_and_query() {
        let result = parse_request(b"GET /search?q=a%20b&page=2 HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.target, "/search?q=a%20b&page=2");
        assert_eq!(result.path(), "/search");
        assert_eq!(result.query(), Some("q=a%20b&page=2"));

        let result = parse_request(b"GET /plain HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.path(), "/plain");
        assert_eq!(result.query(), None);
    }

    #[test]
    fn test_content_length_lookup_is_case_insensitive() {
        let request = HttpRequest::new(
            Method::GET,
            "/".to_string(),
            "HTTP/1.0".to_string(),
            vec![("content-length".to_string(), "12".to_string())],
        );
        assert!(request.has_header("Content-Length"));
        assert_eq!(request.content_length(), Some(12));

        let request = HttpRequest::new(
            Method::GET,
            "/".to_string(),
            "HTTP/1.0".to_string(),
            vec![("Content-Length".to_string(), "lots".to_string())],
        );
        assert_eq!(request.content_length(), None);
    }

    #[test]
    fn test_cursor_advances_monotonically() {
        let mut cursor = HeaderCursor::new("a b\r\nc\r\n");
        assert_eq!(cursor.next_by(" "), Some("a"));
        assert_eq!(cursor.next_by("\r\n"), Some("b"));
        assert_eq!(cursor.next_by(" "), None);
        // A failed search does not move the cursor
        assert_eq!(cursor.remaining(), "c\r\n");
        assert_eq!(cursor.next_by("\r\n"), Some("c"));
        assert!(!cursor.has_remaining());
        assert_eq!(cursor.next_by("\r\n"), None);
    }
}
