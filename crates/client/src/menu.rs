use press_kit_core::text::decode_html_entities;
use press_kit_core::{Menu, MenuItem, RawMenuItem};
use serde_json::Value;

/// Turn a CMS menu link into a site-relative route.
///
/// The CMS origin is dropped, `/category/x` becomes `/x` (categories are
/// served from the root slug route) and a trailing slash is removed.
pub fn clean_href(href: &str, cms_origin: &str) -> String {
    let mut href = href.trim();
    if href.is_empty() {
        return String::new();
    }

    // only a whole origin counts: `https://cms.example.com.evil` is external
    if !cms_origin.is_empty()
        && let Some(rest) = href.strip_prefix(cms_origin)
        && (rest.is_empty() || rest.starts_with(['/', '?', '#']))
    {
        href = rest;
    }

    let mut cleaned = match href.strip_prefix("/category/") {
        Some(rest) => format!("/{}", rest),
        None => href.to_string(),
    };

    if cleaned.is_empty() {
        cleaned.push('/');
    }
    if cleaned.len() > 1 && cleaned.ends_with('/') {
        cleaned.pop();
    }
    cleaned
}

pub fn clean_menu(items: Vec<RawMenuItem>, cms_origin: &str) -> Menu {
    Menu {
        items: items
            .into_iter()
            .map(|item| clean_item(item, cms_origin))
            .collect(),
    }
}

fn clean_item(item: RawMenuItem, cms_origin: &str) -> MenuItem {
    let parent_id = id_string(&item.menu_item_parent).filter(|p| p != "0");
    MenuItem {
        id: id_string(&item.id).unwrap_or_default(),
        label: decode_html_entities(&item.name),
        uri: clean_href(&item.href, cms_origin),
        parent_id,
        icon: item.icon.filter(|s| !s.is_empty()),
        icon_image: item.icon_image.filter(|s| !s.is_empty()),
        children: item
            .children
            .into_iter()
            .map(|child| clean_item(child, cms_origin))
            .collect(),
    }
}

/// Menu ids arrive as numbers or strings depending on the plugin
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
