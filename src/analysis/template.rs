//! Template rendering for concept insight / explanation text
//!
//! Placeholders look like `{hitCount}`. Each placeholder is substituted at its
//! first occurrence only; later repeats stay literal. Placeholders absent from
//! the template are a no-op.

/// Replace the first occurrence of `{name}` for each `(name, value)` pair, in order
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in values {
        let placeholder = format!("{{{}}}", name);
        out = out.replacen(&placeholder, value, 1);
    }
    out
}
