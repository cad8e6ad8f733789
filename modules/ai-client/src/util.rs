/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_multibyte_characters() {
        let text = "Punta Umbría";
        let truncated = truncate_to_char_boundary(text, 11);
        assert!(truncated.len() <= 11);
        assert!(text.starts_with(truncated));
        assert_eq!(truncated, "Punta Umbr");
    }

    #[test]
    fn truncate_within_bounds() {
        assert_eq!(truncate_to_char_boundary("Huelva", 100), "Huelva");
    }
}
