/// Whether a decoded payload looks like a web address worth offering as a link.
/// Case-sensitive `http` prefix on the payload as decoded; the rest is not validated.
pub fn is_web_address(payload: &str) -> bool {
    payload.starts_with("http")
}

#[cfg(test)]
mod payload_tests {
    use test_case::test_case;

    use super::is_web_address;

    #[test_case("https://google.com", true)]
    #[test_case("http://localhost:8080/x", true)]
    #[test_case("http", true)]
    #[test_case("httpfoo", true)]
    #[test_case("HTTPS://EXAMPLE.ORG", false)]
    #[test_case("  https://padded.io", false)]
    #[test_case("ftp://files.example", false)]
    #[test_case("WIFI:S:home;T:WPA;P:secret;;", false)]
    #[test_case("", false)]
    #[test_case("ht", false)]
    fn test_is_web_address(payload: &str, exp: bool) {
        assert_eq!(is_web_address(payload), exp);
    }
}
