//! Streaming HTML sanitizer.

use lol_html::{RewriteStrSettings, comments, element, rewrite_str};

use crate::SanitizeError;
use crate::schema::SanitizeSchema;

/// Rewrites `html` so only what `schema` allows remains.
///
/// Stripped tags disappear with their content, other unknown tags are
/// unwrapped, disallowed attributes and unsafe `href`s are dropped, class
/// lists are filtered and normalized, and comments are removed. Text is passed
/// through untouched, so already-escaped entities stay escaped.
pub fn sanitize_html(html: &str, schema: &SanitizeSchema) -> Result<String, SanitizeError> {
    let settings = RewriteStrSettings {
        element_content_handlers: vec![
            element!("*", |el| {
                let tag = el.tag_name().to_ascii_lowercase();
                if schema.strips(&tag) {
                    log::warn!("sanitizer stripped <{tag}>");
                    el.remove();
                    return Ok(());
                }
                if !schema.allows_tag(&tag) {
                    log::warn!("sanitizer unwrapped <{tag}>");
                    el.remove_and_keep_content();
                    return Ok(());
                }

                let attributes: Vec<(String, String)> = el
                    .attributes()
                    .iter()
                    .map(|attr| (attr.name(), attr.value()))
                    .collect();

                for (name, value) in attributes {
                    let keep = schema.allows_attribute(&name)
                        && (name != "href" || schema.allows_url(&value));
                    if !keep {
                        log::warn!("sanitizer removed `{name}` from <{tag}>");
                        el.remove_attribute(&name);
                        continue;
                    }
                    if name == "class" {
                        match schema.filter_classes(&value) {
                            Some(classes) if classes == value => {}
                            Some(classes) => {
                                log::warn!("sanitizer narrowed class `{value}` to `{classes}`");
                                el.set_attribute("class", &classes)?
                            }
                            None => {
                                log::warn!("sanitizer dropped class `{value}` from <{tag}>");
                                el.remove_attribute("class")
                            }
                        }
                    }
                }
                Ok(())
            }),
            comments!("*", |comment| {
                comment.remove();
                Ok(())
            }),
        ],
        ..RewriteStrSettings::new()
    };

    Ok(rewrite_str(html, settings)?)
}
