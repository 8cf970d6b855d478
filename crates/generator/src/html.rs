pub use press_kit_core::text::html_escape;
use serde_json::Value;

/// `<script type="application/ld+json">` block for a schema value.
///
/// `</` is written as `<\/` so CMS text cannot close the script element.
pub fn json_ld_script(value: &Value) -> String {
    let json = value.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{}</script>"#, json)
}
