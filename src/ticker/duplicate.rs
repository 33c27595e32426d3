use crate::dom::node::{Document, Fragment, NodeId};
use crate::foundation::error::TickerResult;

/// Build a track holding `content` twice and make it the row's only child.
///
/// Returns `None` (leaving the row untouched) when there is nothing to duplicate.
pub fn build_track(
    doc: &mut Document,
    row: NodeId,
    content: &Fragment,
    track_class: &str,
) -> TickerResult<Option<NodeId>> {
    if content.is_empty() {
        return Ok(None);
    }
    let track = doc.create_element("div");
    doc.set_attr(track, "class", track_class)?;
    for _copy in 0..2 {
        for node in doc.instantiate_fragment(content) {
            doc.append_child(track, node)?;
        }
    }
    doc.replace_children(row, &[track])?;
    Ok(Some(track))
}

#[cfg(test)]
#[path = "../../tests/unit/ticker/duplicate.rs"]
mod tests;
