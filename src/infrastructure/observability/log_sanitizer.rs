const MAX_VISIBLE_CHARS: usize = 100;

/// Shortens user-entered text (goods descriptions, reviews) for log lines and
/// masks any email addresses inside it.
pub fn sanitize_text(text: &str) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if flattened.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = flattened.chars().count();
    let shortened = if total > MAX_VISIBLE_CHARS {
        let visible: String = flattened.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", visible, total)
    } else {
        flattened
    };

    shortened
        .split(' ')
        .map(|word| {
            if word.contains('@') {
                mask_email(word)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps the first character of the local part and the domain:
/// `jane.doe@example.com` becomes `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => String::from("[REDACTED]"),
    }
}
