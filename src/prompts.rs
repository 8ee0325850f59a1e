pub const SUMMARIZE: &str = include_str!("../data/prompts/summarize.txt");
pub const ALT_TEXT: &str = include_str!("../data/prompts/alt_text.txt");
pub const ALT_TEXT_KEYWORD: &str = include_str!("../data/prompts/alt_text_keyword.txt");
pub const ALT_TEXT_RULES: &str = include_str!("../data/prompts/alt_text_rules.txt");
pub const ANALYZE_DEFAULT: &str = include_str!("../data/prompts/analyze.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
