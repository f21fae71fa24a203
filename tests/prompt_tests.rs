use linksum::ai::prompt::{
    ARTICLE_FENCE, MAX_SUMMARY_CHARS, SYSTEM_PROMPT, build_summary_prompt, sanitize_article,
    summary_instructions,
};
use openai_api_rs::v1::chat_completion::{Content, MessageRole};

#[test]
fn test_sanitize_article_strips_control_chars() {
    // Test control character removal for sanitization
    let input_with_control = "Summary with \u{007F} control \u{0000} chars";
    let expected = "Summary with  control  chars";
    assert_eq!(sanitize_article(input_with_control), expected);
}

#[test]
fn test_sanitize_article_keeps_layout() {
    let article = "Heading\n\tIndented line\nLast line";
    assert_eq!(sanitize_article(article), article);
}

#[test]
fn test_instructions_embed_article_between_fences() {
    let prompt = summary_instructions("The body of the article.");
    let fenced = format!("{ARTICLE_FENCE}\nThe body of the article.\n{ARTICLE_FENCE}");
    assert!(prompt.contains(&fenced));
    assert!(prompt.contains(&format!("{MAX_SUMMARY_CHARS} characters or fewer")));
}

#[test]
fn test_instructions_describe_slack_markup() {
    let prompt = summary_instructions("x");
    for marker in ["*important*", "1.", "•", ">"] {
        assert!(prompt.contains(marker), "missing formatting rule for {marker}");
    }
}

#[test]
fn test_build_summary_prompt_roles() {
    let messages = build_summary_prompt("Article text");
    assert_eq!(messages.len(), 2);

    assert!(matches!(messages[0].role, MessageRole::system));
    assert!(matches!(&messages[0].content, Content::Text(t) if t == SYSTEM_PROMPT));

    assert!(matches!(messages[1].role, MessageRole::user));
    match &messages[1].content {
        Content::Text(t) => assert!(t.ends_with(&format!("Article text\n{ARTICLE_FENCE}"))),
        _ => panic!("user message should be text"),
    }
}
